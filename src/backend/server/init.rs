/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the database pool (optional; failures are logged)
 * 2. Create the application state
 * 3. Create the router with all routes
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient: when the database cannot be
/// opened or migrated the server still starts and data routes answer 503.
pub async fn create_app(config: &ServerConfig) -> Router<()> {
    tracing::info!("Initializing Boardflow backend server");

    let db_pool = load_database(config).await;
    if db_pool.is_none() {
        tracing::warn!("Starting without a database; board routes will be unavailable");
    }

    build_app(db_pool)
}

/// Build the router around an already opened pool
///
/// Used by `create_app` and by tests that bring their own in-memory pool.
pub fn build_app(db_pool: Option<SqlitePool>) -> Router<()> {
    let app_state = AppState::new(db_pool);
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
