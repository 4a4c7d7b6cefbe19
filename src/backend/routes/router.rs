/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router.
 *
 * # Layers
 *
 * The whole router is wrapped in `TraceLayer`, so every request gets a
 * tracing span. Unknown paths fall through to a JSON 404.
 */

use axum::{http::StatusCode, Json, Router};
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Database pool and audit writer
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new());

    // Fallback handler for 404
    let router = router.fallback(|| async {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Not Found", "status": 404 })),
        )
    });

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}
