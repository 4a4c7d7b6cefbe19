//! Batch Order-Update
//!
//! Applies a caller-supplied re-numbering of sibling `order` values (and,
//! for cards, a parent reassignment) inside one transaction. Nothing is
//! re-derived here: the optimistic store already computed the complete
//! renumbering of every affected sibling.
//!
//! Items are scoped to the board named in the path. An item that does not
//! resolve inside that board aborts the batch, and dropping the
//! uncommitted transaction rolls every earlier update back.

use std::collections::HashSet;

use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::board::db;
use crate::backend::error::BackendError;
use crate::shared::{BatchOrderItem, BatchOrderRequest, BatchOrderResponse, BoardId, EntityKind, ListId};

/// Persist a full re-numbering for one board
///
/// # Errors
///
/// - `SharedError::ValidationError` (400) for an empty or malformed batch,
///   before anything is written
/// - `NotFound` (404) when the board is not visible to `org_id`, or when
///   any item (or target list) is not part of the board
/// - `Database` (500) for any persistence failure
pub async fn batch_update_order(
    pool: &SqlitePool,
    org_id: &str,
    board_id: BoardId,
    request: &BatchOrderRequest,
) -> Result<BatchOrderResponse, BackendError> {
    request.validate()?;

    if db::get_board(pool, org_id, board_id).await?.is_none() {
        return Err(BackendError::not_found("board", board_id));
    }

    let mut tx = pool.begin().await?;

    let board_lists: HashSet<ListId> = sqlx::query_scalar::<_, i64>("SELECT id FROM lists WHERE board_id = ?")
        .bind(board_id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

    let now = Utc::now();
    let mut count = 0u64;

    for item in &request.items {
        let affected = match request.kind {
            EntityKind::List => {
                sqlx::query(r#"UPDATE lists SET "order" = ?, updated_at = ? WHERE id = ? AND board_id = ?"#)
                    .bind(item.order)
                    .bind(now)
                    .bind(item.id)
                    .bind(board_id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected()
            }
            EntityKind::Card => {
                check_target_list(item, &board_lists)?;
                sqlx::query(
                    r#"
                    UPDATE cards
                    SET "order" = ?, list_id = COALESCE(?, list_id), updated_at = ?
                    WHERE id = ? AND list_id IN (SELECT id FROM lists WHERE board_id = ?)
                    "#,
                )
                .bind(item.order)
                .bind(item.list_id)
                .bind(now)
                .bind(item.id)
                .bind(board_id)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            }
        };

        if affected == 0 {
            tracing::warn!(
                "Batch for board {} references unknown {} {} ({:?}), rolling back",
                board_id,
                request.kind,
                item.id,
                item.title
            );
            return Err(BackendError::not_found(entity_name(request.kind), item.id));
        }
        count += affected;
    }

    tx.commit().await?;

    tracing::debug!("Reordered {} {}s on board {}", count, request.kind, board_id);
    Ok(BatchOrderResponse { success: true, count })
}

fn check_target_list(item: &BatchOrderItem, board_lists: &HashSet<ListId>) -> Result<(), BackendError> {
    match item.list_id {
        Some(list_id) if !board_lists.contains(&list_id) => Err(BackendError::not_found("list", list_id)),
        _ => Ok(()),
    }
}

fn entity_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::List => "list",
        EntityKind::Card => "card",
    }
}
