//! Board HTTP Handlers
//!
//! Thin wrappers over [`db`] plus the batch order-update endpoint. Every
//! successful create, update or delete is followed by an audit entry;
//! `PUT /api/boards/{board_id}/order` is not.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use super::{batch, db};
use crate::backend::audit::{AuditWriter, NewAuditEntry};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::OrgContext;
use crate::backend::server::state::require_pool;
use crate::shared::board::{
    validate_title, CreateBoardRequest, CreateCardRequest, CreateListRequest, UpdateCardRequest, UpdateListRequest,
};
use crate::shared::{
    AuditAction, AuditEntity, BatchOrderRequest, BatchOrderResponse, Board, BoardId, Card, CardId, List, ListId,
    ListWithCards,
};

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

/// `GET /api/boards`
pub async fn list_boards(
    State(db_pool): State<Option<SqlitePool>>,
    ctx: OrgContext,
) -> BackendResult<Json<Vec<Board>>> {
    let pool = require_pool(&db_pool)?;
    Ok(Json(db::list_boards(pool, &ctx.org_id).await?))
}

/// `POST /api/boards`
pub async fn create_board(
    State(db_pool): State<Option<SqlitePool>>,
    State(audit): State<AuditWriter>,
    ctx: OrgContext,
    Json(request): Json<CreateBoardRequest>,
) -> BackendResult<(StatusCode, Json<Board>)> {
    let pool = require_pool(&db_pool)?;
    validate_title("title", &request.title)?;

    let board = db::create_board(pool, &ctx.org_id, request.title.trim()).await?;
    tracing::info!("Board {} created in org {}", board.id, ctx.org_id);

    audit.record(NewAuditEntry::new(&ctx, AuditAction::Create, AuditEntity::Board, board.id, &board.title));
    Ok((StatusCode::CREATED, Json(board)))
}

/// `GET /api/boards/{board_id}`
pub async fn get_board(
    State(db_pool): State<Option<SqlitePool>>,
    ctx: OrgContext,
    Path(board_id): Path<BoardId>,
) -> BackendResult<Json<Board>> {
    let pool = require_pool(&db_pool)?;
    db::get_board(pool, &ctx.org_id, board_id)
        .await?
        .map(Json)
        .ok_or(BackendError::not_found("board", board_id))
}

/// `DELETE /api/boards/{board_id}`
pub async fn delete_board(
    State(db_pool): State<Option<SqlitePool>>,
    State(audit): State<AuditWriter>,
    ctx: OrgContext,
    Path(board_id): Path<BoardId>,
) -> BackendResult<StatusCode> {
    let pool = require_pool(&db_pool)?;
    let board = db::delete_board(pool, &ctx.org_id, board_id)
        .await?
        .ok_or(BackendError::not_found("board", board_id))?;

    audit.record(NewAuditEntry::new(&ctx, AuditAction::Delete, AuditEntity::Board, board.id, &board.title));
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/boards/{board_id}/lists`
///
/// Lists and their cards, ordered by `order` at both levels.
pub async fn get_lists_with_cards(
    State(db_pool): State<Option<SqlitePool>>,
    ctx: OrgContext,
    Path(board_id): Path<BoardId>,
) -> BackendResult<Json<Vec<ListWithCards>>> {
    let pool = require_pool(&db_pool)?;
    db::get_lists_with_cards(pool, &ctx.org_id, board_id)
        .await?
        .map(Json)
        .ok_or(BackendError::not_found("board", board_id))
}

/// `PUT /api/boards/{board_id}/order`
pub async fn update_order(
    State(db_pool): State<Option<SqlitePool>>,
    ctx: OrgContext,
    Path(board_id): Path<BoardId>,
    Json(request): Json<BatchOrderRequest>,
) -> BackendResult<Json<BatchOrderResponse>> {
    let pool = require_pool(&db_pool)?;
    let response = batch::batch_update_order(pool, &ctx.org_id, board_id, &request).await?;
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// `POST /api/boards/{board_id}/lists`
pub async fn create_list(
    State(db_pool): State<Option<SqlitePool>>,
    State(audit): State<AuditWriter>,
    ctx: OrgContext,
    Path(board_id): Path<BoardId>,
    Json(request): Json<CreateListRequest>,
) -> BackendResult<(StatusCode, Json<List>)> {
    let pool = require_pool(&db_pool)?;
    validate_title("title", &request.title)?;

    if db::get_board(pool, &ctx.org_id, board_id).await?.is_none() {
        return Err(BackendError::not_found("board", board_id));
    }

    let list = db::create_list(pool, board_id, request.title.trim()).await?;
    audit.record(NewAuditEntry::new(&ctx, AuditAction::Create, AuditEntity::List, list.id, &list.title));
    Ok((StatusCode::CREATED, Json(list)))
}

/// `PATCH /api/lists/{list_id}`
pub async fn rename_list(
    State(db_pool): State<Option<SqlitePool>>,
    State(audit): State<AuditWriter>,
    ctx: OrgContext,
    Path(list_id): Path<ListId>,
    Json(request): Json<UpdateListRequest>,
) -> BackendResult<Json<List>> {
    let pool = require_pool(&db_pool)?;
    validate_title("title", &request.title)?;

    let list = db::rename_list(pool, &ctx.org_id, list_id, request.title.trim())
        .await?
        .ok_or(BackendError::not_found("list", list_id))?;

    audit.record(NewAuditEntry::new(&ctx, AuditAction::Update, AuditEntity::List, list.id, &list.title));
    Ok(Json(list))
}

/// `DELETE /api/lists/{list_id}`
pub async fn delete_list(
    State(db_pool): State<Option<SqlitePool>>,
    State(audit): State<AuditWriter>,
    ctx: OrgContext,
    Path(list_id): Path<ListId>,
) -> BackendResult<StatusCode> {
    let pool = require_pool(&db_pool)?;
    let list = db::delete_list(pool, &ctx.org_id, list_id)
        .await?
        .ok_or(BackendError::not_found("list", list_id))?;

    audit.record(NewAuditEntry::new(&ctx, AuditAction::Delete, AuditEntity::List, list.id, &list.title));
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/lists/{list_id}/copy`
pub async fn copy_list(
    State(db_pool): State<Option<SqlitePool>>,
    State(audit): State<AuditWriter>,
    ctx: OrgContext,
    Path(list_id): Path<ListId>,
) -> BackendResult<(StatusCode, Json<ListWithCards>)> {
    let pool = require_pool(&db_pool)?;
    let copy = db::copy_list(pool, &ctx.org_id, list_id)
        .await?
        .ok_or(BackendError::not_found("list", list_id))?;

    tracing::info!("List {} copied to {} with {} cards", list_id, copy.list.id, copy.cards.len());
    audit.record(NewAuditEntry::new(&ctx, AuditAction::Create, AuditEntity::List, copy.list.id, &copy.list.title));
    Ok((StatusCode::CREATED, Json(copy)))
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// `POST /api/lists/{list_id}/cards`
pub async fn create_card(
    State(db_pool): State<Option<SqlitePool>>,
    State(audit): State<AuditWriter>,
    ctx: OrgContext,
    Path(list_id): Path<ListId>,
    Json(request): Json<CreateCardRequest>,
) -> BackendResult<(StatusCode, Json<Card>)> {
    let pool = require_pool(&db_pool)?;
    validate_title("title", &request.title)?;

    if db::get_list(pool, &ctx.org_id, list_id).await?.is_none() {
        return Err(BackendError::not_found("list", list_id));
    }

    let card = db::create_card(pool, list_id, request.title.trim(), request.description.as_deref()).await?;
    audit.record(NewAuditEntry::new(&ctx, AuditAction::Create, AuditEntity::Card, card.id, &card.title));
    Ok((StatusCode::CREATED, Json(card)))
}

/// `PATCH /api/cards/{card_id}`
pub async fn update_card(
    State(db_pool): State<Option<SqlitePool>>,
    State(audit): State<AuditWriter>,
    ctx: OrgContext,
    Path(card_id): Path<CardId>,
    Json(mut request): Json<UpdateCardRequest>,
) -> BackendResult<Json<Card>> {
    let pool = require_pool(&db_pool)?;

    if let Some(title) = request.title.take() {
        validate_title("title", &title)?;
        request.title = Some(title.trim().to_string());
    }

    let card = db::update_card(pool, &ctx.org_id, card_id, &request)
        .await?
        .ok_or(BackendError::not_found("card", card_id))?;

    audit.record(NewAuditEntry::new(&ctx, AuditAction::Update, AuditEntity::Card, card.id, &card.title));
    Ok(Json(card))
}

/// `DELETE /api/cards/{card_id}`
pub async fn delete_card(
    State(db_pool): State<Option<SqlitePool>>,
    State(audit): State<AuditWriter>,
    ctx: OrgContext,
    Path(card_id): Path<CardId>,
) -> BackendResult<StatusCode> {
    let pool = require_pool(&db_pool)?;
    let card = db::delete_card(pool, &ctx.org_id, card_id)
        .await?
        .ok_or(BackendError::not_found("card", card_id))?;

    audit.record(NewAuditEntry::new(&ctx, AuditAction::Delete, AuditEntity::Card, card.id, &card.title));
    Ok(StatusCode::NO_CONTENT)
}
