//! Backend commands queued from UI to backend worker.

use client_core::RequestTicket;
use shared::protocol::ApiRequest;

pub enum BackendCommand {
    Execute {
        ticket: RequestTicket,
        request: ApiRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Execute { request, .. } => request.endpoint.name(),
        }
    }
}
