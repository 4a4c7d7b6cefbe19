/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and services and can be converted
 * to HTTP responses.
 *
 * # Error Categories
 *
 * ## Lookup Errors
 *
 * `NotFound` covers both missing rows and rows owned by another
 * organization; the two are deliberately indistinguishable to the caller.
 *
 * ## Persistence Errors
 *
 * Any `sqlx::Error` surfaces as `Database`. Inside a batch transaction this
 * aborts the whole batch; the transaction is rolled back when dropped.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use boardflow::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("card", 42);
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Entity missing or not visible to the caller's organization
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"board"`
        entity: &'static str,
        /// Requested identifier
        id: i64,
    },

    /// Organization context missing from the request
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// The server runs without a database pool
    #[error("Database is not configured")]
    DatabaseUnavailable,

    /// Persistence failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request content rejected by shared validation
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a not-found error
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404 Not Found
    /// - `Unauthorized` - 401 Unauthorized
    /// - `DatabaseUnavailable` - 503 Service Unavailable
    /// - `Database` - 500 Internal Server Error
    /// - `SharedError` - 400 Bad Request
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error message
    ///
    /// Database errors are reported generically; the detail goes to the log.
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized { message } => message.clone(),
            Self::Database(_) => "Database operation failed".to_string(),
            other => other.to_string(),
        }
    }
}
