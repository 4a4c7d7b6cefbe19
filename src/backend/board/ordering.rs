//! Order Assignment
//!
//! Computes the `order` of one freshly created child: `MAX(order) + 1` among
//! the current children of its parent, or `1` when the parent is empty.
//!
//! This is a plain read followed by the caller's insert, with no lock in
//! between. Two creations racing under the same parent can therefore both
//! receive the same value. Read paths break such ties by `created_at`, then
//! `id`, and the next drag reorder of that parent renumbers it to `0..n`.

use sqlx::SqliteExecutor;

use crate::shared::{BoardId, ListId};

/// Container a new child is appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderParent {
    /// A list appended to a board
    Board(BoardId),
    /// A card appended to a list
    List(ListId),
}

/// Order for a child following the given sibling maximum
pub fn next_after(max: Option<i64>) -> i64 {
    max.map_or(1, |m| m + 1)
}

/// Order to assign to one new child of `parent`
///
/// The returned value is strictly greater than every sibling order visible
/// to this read.
pub async fn create_ordered_child<'e, E>(executor: E, parent: OrderParent) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let max = match parent {
        OrderParent::Board(board_id) => {
            sqlx::query_scalar::<_, Option<i64>>(r#"SELECT MAX("order") FROM lists WHERE board_id = ?"#)
                .bind(board_id)
                .fetch_one(executor)
                .await?
        }
        OrderParent::List(list_id) => {
            sqlx::query_scalar::<_, Option<i64>>(r#"SELECT MAX("order") FROM cards WHERE list_id = ?"#)
                .bind(list_id)
                .fetch_one(executor)
                .await?
        }
    };

    let order = next_after(max);
    tracing::debug!("Assigned order {} under {:?} (max {:?})", order, parent, max);
    Ok(order)
}

pub async fn next_list_order<'e, E>(executor: E, board_id: BoardId) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    create_ordered_child(executor, OrderParent::Board(board_id)).await
}

pub async fn next_card_order<'e, E>(executor: E, list_id: ListId) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    create_ordered_child(executor, OrderParent::List(list_id)).await
}
