//! Reducer-like transitions of desk state in response to UI actions and
//! backend events. Everything here runs on the UI thread.

use chrono::{DateTime, Local};
use client_core::{Coordinator, PendingRequest, SubmitError};
use crossbeam_channel::Sender;
use shared::protocol::Endpoint;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct DeskState {
    pub coordinator: Coordinator,
    pub status: String,
    pub status_banner: Option<StatusBanner>,
    /// Local time the displayed outcome settled.
    pub settled_at: Option<DateTime<Local>>,
}

impl DeskState {
    pub fn new() -> Self {
        Self {
            status: "Waiting for backend worker".to_string(),
            ..Default::default()
        }
    }
}

pub fn submit_endpoint(state: &mut DeskState, cmd_tx: &Sender<BackendCommand>, endpoint: Endpoint) {
    let PendingRequest { ticket, request } = match state.coordinator.submit(endpoint) {
        Ok(pending) => pending,
        Err(SubmitError::MissingFields(missing)) => {
            state.status = format!("Fill in: {}", missing.join(", "));
            return;
        }
        Err(err) => {
            state.status = err.to_string();
            state.settled_at = Some(Local::now());
            return;
        }
    };

    state.settled_at = None;
    state.status = format!("Request #{} sent: {}", ticket.0, endpoint.action_label());
    let cmd = BackendCommand::Execute { ticket, request };
    if let Err(err) = dispatch_backend_command(cmd_tx, cmd, &mut state.status) {
        let ui_error = UiError::from_message(UiErrorContext::Dispatch, err.reason());
        state.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: format!("{} error: {}", err_label(ui_error.category()), ui_error.message()),
        });
        state.coordinator.settle(ticket, Err(err));
        state.settled_at = Some(Local::now());
    }
}

pub fn apply_ui_event(state: &mut DeskState, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            state.status = message;
        }
        UiEvent::Error(err) => {
            state.status = format!("{} error: {}", err_label(err.category()), err.message());
            if err.context() == UiErrorContext::BackendStartup {
                state.status_banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Error,
                    message: state.status.clone(),
                });
            }
        }
        UiEvent::RequestSettled { ticket, result } => {
            let ok = result.is_ok();
            if state.coordinator.settle(ticket, result) {
                state.settled_at = Some(Local::now());
                state.status = if ok {
                    format!("Request #{} settled", ticket.0)
                } else {
                    format!("Request #{} failed", ticket.0)
                };
            }
        }
    }
}
