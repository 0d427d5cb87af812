//! Failures of a notification lookup

use taskwait_core::FetchError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Why a notification could not be read
#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable HTTP response (connection refused, TLS, reset, ...)
    #[error("notification request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-2xx status; `message` is the raw body
    #[error("notifications API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    /// A 2xx body that is not a notification
    #[error("unreadable notification: {0}")]
    ParseError(String),
}

impl ClientError {
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Unknown notification uuid, or one the token may not see
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status: 400..=499, .. })
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status: 500.., .. })
    }
}

impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::RequestFailed(e) if e.is_decode() => FetchError::Decode(e.to_string()),
            ClientError::RequestFailed(e) => FetchError::Transport(e.to_string()),
            ClientError::ApiError { status, message } => FetchError::Api { status, message },
            ClientError::ParseError(message) => FetchError::Decode(message),
        }
    }
}
