/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The optional SQLite pool (absent when the database failed to load)
 * - The audit writer used after create/update/delete
 *
 * Nothing else is shared between requests. Each batch order-update runs in
 * its own transaction and relies on the storage engine for atomicity.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(db_pool): State<Option<SqlitePool>>) {
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::audit::AuditWriter;
use crate::backend::error::BackendError;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database could not be opened. Handlers go
    /// through [`require_pool`] which turns that into a 503.
    pub db_pool: Option<SqlitePool>,

    /// Fire-and-forget audit log writer
    pub audit: AuditWriter,
}

impl AppState {
    pub fn new(db_pool: Option<SqlitePool>) -> Self {
        let audit = AuditWriter::new(db_pool.clone());
        Self { db_pool, audit }
    }
}

/// Borrow the pool or fail with `DatabaseUnavailable`
pub fn require_pool(db_pool: &Option<SqlitePool>) -> Result<&SqlitePool, BackendError> {
    db_pool.as_ref().ok_or(BackendError::DatabaseUnavailable)
}

/// Implement FromRef for Option<SqlitePool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<SqlitePool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Implement FromRef for AuditWriter
impl FromRef<AppState> for AuditWriter {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.audit.clone()
    }
}
