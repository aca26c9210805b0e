use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{domain::ViewId, protocol::Endpoint};

use client_core::{RequestOutcome, Settlement};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::reducer::{apply_ui_event, submit_endpoint, DeskState};

pub const APP_TITLE: &str = "WMS API Tester";

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub base_url: String,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    startup: StartupConfig,
    state: DeskState,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            startup,
            state: DeskState::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.state, event);
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(APP_TITLE);
                ui.add_space(12.0);
                ui.weak(&self.startup.base_url);
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status);
                let in_flight = self.state.coordinator.in_flight();
                if in_flight > 0 {
                    ui.separator();
                    ui.weak(format!("{in_flight} in flight"));
                }
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = &self.state.status_banner else {
            return;
        };
        let color = ui.visuals().error_fg_color;
        let mut dismissed = false;
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.0, color))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(color, &banner.message);
                    if ui.small_button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.state.status_banner = None;
        }
        ui.add_space(8.0);
    }

    fn show_tabs(&mut self, ui: &mut egui::Ui) {
        let active = self.state.coordinator.active_view();
        ui.horizontal(|ui| {
            for view in ViewId::ALL {
                if ui.selectable_label(active == view, view.title()).clicked() {
                    self.state.coordinator.select_view(view);
                }
            }
        });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let view = self.state.coordinator.active_view();

        for field in view.fields() {
            ui.label(field.label);
            let mut buf = self.state.coordinator.field(field.name).to_string();
            let resp = ui.add(
                egui::TextEdit::singleline(&mut buf)
                    .id_salt(field.name)
                    .desired_width(f32::INFINITY),
            );
            if resp.changed() {
                self.state.coordinator.set_field(field.name, buf);
            }
            ui.add_space(6.0);
        }

        ui.horizontal_wrapped(|ui| {
            for &endpoint in Endpoint::for_view(view) {
                let enabled = self.state.coordinator.can_submit(endpoint);
                let button = egui::Button::new(endpoint.action_label());
                if ui.add_enabled(enabled, button).clicked() {
                    submit_endpoint(&mut self.state, &self.cmd_tx, endpoint);
                }
            }
        });
    }

    fn show_outcome(&mut self, ui: &mut egui::Ui) {
        match self.state.coordinator.outcome() {
            RequestOutcome::Idle => {}
            RequestOutcome::Pending => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
            }
            RequestOutcome::Settled(settlement @ Settlement::Failure(_)) => {
                let color = ui.visuals().error_fg_color;
                ui.colored_label(color, settlement.display_text());
            }
            RequestOutcome::Settled(settlement @ Settlement::Success(_)) => {
                ui.horizontal(|ui| {
                    ui.strong("API response:");
                    if let Some(at) = self.state.settled_at {
                        ui.weak(at.format("%H:%M:%S").to_string());
                    }
                });
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        egui::ScrollArea::both()
                            .auto_shrink([false, true])
                            .max_height(ui.available_height())
                            .show(ui, |ui| {
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(settlement.display_text()).monospace(),
                                    )
                                    .selectable(true),
                                );
                            });
                    });
            }
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            self.show_tabs(ui);
            ui.separator();
            ui.add_space(6.0);
            self.show_form(ui);
            ui.add_space(12.0);
            self.show_outcome(ui);
        });

        // Settlements arrive off-thread; poll for them.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
