/**
 * API Route Handlers
 *
 * Routes for boards, lists, cards and the audit log. Every route expects
 * the `x-org-id` and `x-user-id` headers set by the upstream auth layer.
 *
 * # Routes
 *
 * ## Boards
 * - `GET /api/boards` - Boards of the caller's organization
 * - `POST /api/boards` - Create a board
 * - `GET /api/boards/{board_id}` - Get one board
 * - `DELETE /api/boards/{board_id}` - Delete a board with its lists and cards
 * - `GET /api/boards/{board_id}/lists` - Lists with cards, ordered
 * - `POST /api/boards/{board_id}/lists` - Append a list
 * - `PUT /api/boards/{board_id}/order` - Batch order-update
 *
 * ## Lists
 * - `PATCH /api/lists/{list_id}` - Rename
 * - `DELETE /api/lists/{list_id}` - Delete with its cards
 * - `POST /api/lists/{list_id}/copy` - Duplicate at the end of the board
 * - `POST /api/lists/{list_id}/cards` - Append a card
 *
 * ## Cards
 * - `PATCH /api/cards/{card_id}` - Edit title or description
 * - `DELETE /api/cards/{card_id}` - Delete
 * - `GET /api/cards/{card_id}/audit` - Audit history of a card
 *
 * ## Audit
 * - `GET /api/audit?limit=n` - Recent entries of the organization
 */

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::backend::audit::handlers::{list_card_audit, list_org_audit};
use crate::backend::board::handlers::{
    copy_list, create_board, create_card, create_list, delete_board, delete_card, delete_list, get_board,
    get_lists_with_cards, list_boards, rename_list, update_card, update_order,
};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Boards
        .route("/api/boards", get(list_boards).post(create_board))
        .route("/api/boards/{board_id}", get(get_board).delete(delete_board))
        .route(
            "/api/boards/{board_id}/lists",
            get(get_lists_with_cards).post(create_list),
        )
        .route("/api/boards/{board_id}/order", put(update_order))
        // Lists
        .route("/api/lists/{list_id}", patch(rename_list).delete(delete_list))
        .route("/api/lists/{list_id}/copy", post(copy_list))
        .route("/api/lists/{list_id}/cards", post(create_card))
        // Cards
        .route("/api/cards/{card_id}", patch(update_card).delete(delete_card))
        .route("/api/cards/{card_id}/audit", get(list_card_audit))
        // Audit
        .route("/api/audit", get(list_org_audit))
}
