//! Audit HTTP handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db;
use crate::backend::board::db as board_db;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::OrgContext;
use crate::backend::server::state::require_pool;
use crate::shared::{AuditEntity, AuditLog, CardId};

pub const DEFAULT_AUDIT_LIMIT: i64 = 20;
pub const MAX_AUDIT_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
}

impl AuditQuery {
    /// Requested limit clamped to `1..=MAX_AUDIT_LIMIT`
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_AUDIT_LIMIT).clamp(1, MAX_AUDIT_LIMIT)
    }
}

/// `GET /api/audit`
pub async fn list_org_audit(
    State(db_pool): State<Option<SqlitePool>>,
    ctx: OrgContext,
    Query(query): Query<AuditQuery>,
) -> BackendResult<Json<Vec<AuditLog>>> {
    let pool = require_pool(&db_pool)?;
    let entries = db::list_org_entries(pool, &ctx.org_id, query.effective_limit()).await?;
    Ok(Json(entries))
}

/// `GET /api/cards/{card_id}/audit`
pub async fn list_card_audit(
    State(db_pool): State<Option<SqlitePool>>,
    ctx: OrgContext,
    Path(card_id): Path<CardId>,
) -> BackendResult<Json<Vec<AuditLog>>> {
    let pool = require_pool(&db_pool)?;

    if board_db::get_card(pool, &ctx.org_id, card_id).await?.is_none() {
        return Err(BackendError::not_found("card", card_id));
    }

    let entries = db::list_entity_entries(pool, &ctx.org_id, AuditEntity::Card, card_id).await?;
    Ok(Json(entries))
}
