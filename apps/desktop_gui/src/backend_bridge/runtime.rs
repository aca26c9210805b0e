//! Runtime bridge between UI command queue and backend event intake.
//!
//! The worker thread owns a tokio runtime and the HTTP transport. Every
//! command is issued on its own task; nothing is cancelled or reordered.

use std::{sync::Arc, thread};

use client_core::{HttpTransport, WmsTransport};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Queues `event` for the UI without blocking. Returns whether it was queued.
fn notify_ui(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(event)) => {
            tracing::warn!(kind = event.kind(), "ui event queue full; dropping event");
            false
        }
        Err(TrySendError::Disconnected(event)) => {
            tracing::warn!(kind = event.kind(), "ui event channel closed; dropping event");
            false
        }
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, base_url: String) {
    thread::spawn(move || {
        notify_ui(&ui_tx, UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                notify_ui(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let transport = match HttpTransport::new(&base_url) {
            Ok(transport) => Arc::new(transport),
            Err(err) => {
                notify_ui(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )),
                );
                tracing::error!(%base_url, "failed to build http transport: {err}");
                return;
            }
        };

        notify_ui(
            &ui_tx,
            UiEvent::Info(format!("Backend worker ready ({})", transport.base_url())),
        );
        tracing::info!(base_url = %transport.base_url(), "backend worker ready");

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Execute { ticket, request } => {
                        let transport = Arc::clone(&transport);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let result = transport.execute(&request).await;
                            if !notify_ui(&ui_tx, UiEvent::RequestSettled { ticket, result }) {
                                tracing::warn!(ticket = ticket.0, "settlement not delivered");
                            }
                        });
                    }
                }
            }
            tracing::info!("ui command queue closed; backend worker stopping");
        });
    });
}
