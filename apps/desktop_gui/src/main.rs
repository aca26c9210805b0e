use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{config::normalize_base_url, load_settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{app::APP_TITLE, DesktopGuiApp, StartupConfig};

/// Desktop tester for the WMS REST API.
#[derive(Debug, Parser)]
#[command(name = "wms-desk")]
struct Args {
    /// API base url; overrides the settings file and environment.
    #[arg(long)]
    base_url: Option<String>,

    /// TOML settings file. Ignored when absent.
    #[arg(long, default_value = "wms_desk.toml")]
    config: PathBuf,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut settings = load_settings(Some(&args.config)).context("failed to load settings")?;
    if let Some(base_url) = args.base_url.as_deref() {
        settings.base_url = normalize_base_url(base_url);
    }
    tracing::info!(base_url = %settings.base_url, "starting desktop shell");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.base_url.clone());

    let startup = StartupConfig {
        base_url: settings.base_url,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop shell exited with error: {err}"))
}
