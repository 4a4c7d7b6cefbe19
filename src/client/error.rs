//! Client error types
//!
//! Errors of the HTTP transport. The optimistic store never hands these to
//! the drag layer: a failed persist turns into a rollback plus a notice.

use thiserror::Error;

use crate::shared::ConfigError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Request could not be sent or the connection dropped
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Request failed with {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Whether the server rejected the request as referring to missing rows
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
