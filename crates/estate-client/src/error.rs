//! Error types for live API calls.

use thiserror::Error;

/// Errors returned by a [`LiveClient`](crate::LiveClient) call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Client could not be constructed.
    #[error("Client configuration error: {0}")]
    Config(String),

    /// Connection, timeout or body read failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Application answered with a non-success status.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// Body was not the expected JSON document.
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// The run's cancellation token fired before the response arrived.
    #[error("Request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Status(status.as_u16())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
