//! View-request coordination: the active view, per-view form fields, and the
//! outcome of the most recently settled request.
//!
//! The coordinator is owned by a single event loop. It never performs I/O
//! itself: `submit` hands back a [`PendingRequest`] for the caller to issue
//! and the caller reports completion through `settle`. Requests are neither
//! queued nor cancelled, so with several in flight the last one to settle
//! decides what is displayed.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use shared::{
    domain::{FormFields, ViewId},
    error::RequestBuildError,
    protocol::{ApiRequest, Endpoint},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{error::ClientError, transport::WmsTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    Success(Value),
    Failure(String),
}

impl Settlement {
    /// Pretty-printed JSON for a success, the reason for a failure.
    pub fn display_text(&self) -> String {
        match self {
            Settlement::Success(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Settlement::Failure(reason) => reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestOutcome {
    #[default]
    Idle,
    Pending,
    Settled(Settlement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub request: ApiRequest,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("required fields are empty: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("could not build request: {0}")]
    InvalidRequest(#[from] RequestBuildError),
}

#[derive(Debug, Default)]
pub struct Coordinator {
    active: ViewId,
    fields: HashMap<ViewId, FormFields>,
    outcome: RequestOutcome,
    in_flight: BTreeSet<RequestTicket>,
    next_ticket: u64,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> ViewId {
        self.active
    }

    pub fn select_view(&mut self, view: ViewId) {
        if self.active != view {
            debug!(from = ?self.active, to = ?view, "switching view");
        }
        self.active = view;
    }

    /// Updates a field of the active view. No validation happens here.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields
            .entry(self.active)
            .or_default()
            .set(name, value);
    }

    /// Value of `name` on the active view; empty when never set.
    pub fn field(&self, name: &str) -> &str {
        self.fields
            .get(&self.active)
            .map(|fields| fields.get(name))
            .unwrap_or_default()
    }

    pub fn fields(&self, view: ViewId) -> Option<&FormFields> {
        self.fields.get(&view)
    }

    pub fn missing_fields(&self, endpoint: Endpoint) -> Vec<&'static str> {
        match self.fields.get(&endpoint.view()) {
            Some(fields) => endpoint.missing_fields(fields),
            None => endpoint.required_fields().to_vec(),
        }
    }

    /// Gate for the submit control of `endpoint`.
    pub fn can_submit(&self, endpoint: Endpoint) -> bool {
        self.missing_fields(endpoint).is_empty()
    }

    pub fn outcome(&self) -> &RequestOutcome {
        &self.outcome
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.outcome, RequestOutcome::Pending)
    }

    /// Issued requests that have not settled yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Builds the request for `endpoint` from the fields of its view and
    /// marks the outcome pending.
    ///
    /// Empty required fields leave all state untouched.
    pub fn submit(&mut self, endpoint: Endpoint) -> Result<PendingRequest, SubmitError> {
        let missing = self.missing_fields(endpoint);
        if !missing.is_empty() {
            debug!(endpoint = endpoint.name(), ?missing, "submit gated on empty fields");
            return Err(SubmitError::MissingFields(missing));
        }

        let empty = FormFields::default();
        let fields = self.fields.get(&endpoint.view()).unwrap_or(&empty);
        let request = match endpoint.build_request(fields) {
            Ok(request) => request,
            Err(err) => {
                warn!(endpoint = endpoint.name(), error = %err, "failed to build request");
                self.outcome = RequestOutcome::Settled(Settlement::Failure(
                    ClientError::InvalidRequest(err.clone()).reason(),
                ));
                return Err(SubmitError::InvalidRequest(err));
            }
        };

        self.next_ticket += 1;
        let ticket = RequestTicket(self.next_ticket);
        self.in_flight.insert(ticket);
        self.outcome = RequestOutcome::Pending;
        info!(
            ticket = ticket.0,
            endpoint = endpoint.name(),
            target = %request.target,
            in_flight = self.in_flight.len(),
            "request submitted"
        );

        Ok(PendingRequest { ticket, request })
    }

    /// Records the completion of `ticket`. Returns false for a ticket that
    /// was never issued or has already settled.
    pub fn settle(&mut self, ticket: RequestTicket, result: Result<Value, ClientError>) -> bool {
        if !self.in_flight.remove(&ticket) {
            warn!(ticket = ticket.0, "ignoring settlement for unknown ticket");
            return false;
        }

        let settlement = match result {
            Ok(value) => {
                info!(ticket = ticket.0, "request settled");
                Settlement::Success(value)
            }
            Err(err) => {
                let reason = err.reason();
                warn!(ticket = ticket.0, %reason, "request failed");
                Settlement::Failure(reason)
            }
        };
        self.outcome = RequestOutcome::Settled(settlement);
        true
    }

    /// Submits `endpoint`, issues it through `transport`, and settles it.
    pub async fn run(
        &mut self,
        endpoint: Endpoint,
        transport: &dyn WmsTransport,
    ) -> Result<&RequestOutcome, SubmitError> {
        let pending = self.submit(endpoint)?;
        let result = transport.execute(&pending.request).await;
        self.settle(pending.ticket, result);
        Ok(&self.outcome)
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
