pub mod config;
pub mod coordinator;
pub mod error;
pub mod transport;

pub use config::{load_settings, Settings};
pub use coordinator::{
    Coordinator, PendingRequest, RequestOutcome, RequestTicket, Settlement, SubmitError,
};
pub use error::ClientError;
pub use transport::{HttpTransport, WmsTransport};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
