//! Status fetch errors

use std::time::Duration;
use thiserror::Error;

/// Errors a status fetch can produce
///
/// Transport crates map their own error types into this one so the poller
/// never depends on how a snapshot was retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (connection, TLS, DNS, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote service answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body returned by the service
        message: String,
    },

    /// The response body could not be decoded into a snapshot
    #[error("failed to decode status response: {0}")]
    Decode(String),

    /// A single fetch exceeded its own time budget
    #[error("status fetch did not finish within {0:?}")]
    TimedOut(Duration),
}

impl FetchError {
    /// Check if the remote service rejected the credentials or the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    /// Check if the remote service failed on its side
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}
