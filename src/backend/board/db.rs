//! Database operations for boards, lists and cards
//!
//! Every lookup that starts from a caller-supplied id joins back to
//! `boards.org_id`, so rows of another organization are never returned.
//! Sibling reads are ordered by `"order"`, then `created_at`, then `id`.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor, SqlitePool};

use crate::backend::board::ordering;
use crate::shared::board::UpdateCardRequest;
use crate::shared::{Board, BoardId, Card, CardId, List, ListId, ListWithCards};

fn board_from_row(row: &SqliteRow) -> Result<Board, sqlx::Error> {
    Ok(Board {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        org_id: row.try_get("org_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn list_from_row(row: &SqliteRow) -> Result<List, sqlx::Error> {
    Ok(List {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        order: row.try_get("order")?,
        board_id: row.try_get("board_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn card_from_row(row: &SqliteRow) -> Result<Card, sqlx::Error> {
    Ok(Card {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        order: row.try_get("order")?,
        list_id: row.try_get("list_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

/// Create a board for an organization
pub async fn create_board(pool: &SqlitePool, org_id: &str, title: &str) -> Result<Board, sqlx::Error> {
    let now = Utc::now();

    let id = sqlx::query(
        r#"
        INSERT INTO boards (org_id, title, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(org_id)
    .bind(title)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(Board {
        id,
        title: title.to_string(),
        org_id: org_id.to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// Get a board by ID if it belongs to the organization
pub async fn get_board(pool: &SqlitePool, org_id: &str, board_id: BoardId) -> Result<Option<Board>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, title, org_id, created_at, updated_at
        FROM boards
        WHERE id = ? AND org_id = ?
        "#,
    )
    .bind(board_id)
    .bind(org_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(board_from_row).transpose()
}

/// All boards of an organization, newest first
pub async fn list_boards(pool: &SqlitePool, org_id: &str) -> Result<Vec<Board>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, org_id, created_at, updated_at
        FROM boards
        WHERE org_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(org_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(board_from_row).collect()
}

/// Delete a board; lists and cards go with it through the cascade
pub async fn delete_board(pool: &SqlitePool, org_id: &str, board_id: BoardId) -> Result<Option<Board>, sqlx::Error> {
    let Some(board) = get_board(pool, org_id, board_id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM boards WHERE id = ? AND org_id = ?")
        .bind(board_id)
        .bind(org_id)
        .execute(pool)
        .await?;

    Ok(Some(board))
}

/// Board read interface: lists with their cards, both ordered ascending
///
/// Returns `None` when the board does not exist for the organization.
pub async fn get_lists_with_cards(
    pool: &SqlitePool,
    org_id: &str,
    board_id: BoardId,
) -> Result<Option<Vec<ListWithCards>>, sqlx::Error> {
    if get_board(pool, org_id, board_id).await?.is_none() {
        return Ok(None);
    }

    let list_rows = sqlx::query(
        r#"
        SELECT id, title, "order", board_id, created_at, updated_at
        FROM lists
        WHERE board_id = ?
        ORDER BY "order" ASC, created_at ASC, id ASC
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    let card_rows = sqlx::query(
        r#"
        SELECT c.id, c.title, c.description, c."order", c.list_id, c.created_at, c.updated_at
        FROM cards c
        JOIN lists l ON l.id = c.list_id
        WHERE l.board_id = ?
        ORDER BY c."order" ASC, c.created_at ASC, c.id ASC
        "#,
    )
    .bind(board_id)
    .fetch_all(pool)
    .await?;

    let mut cards_by_list: HashMap<ListId, Vec<Card>> = HashMap::new();
    for row in &card_rows {
        let card = card_from_row(row)?;
        cards_by_list.entry(card.list_id).or_default().push(card);
    }

    list_rows
        .iter()
        .map(|row| {
            let list = list_from_row(row)?;
            let cards = cards_by_list.remove(&list.id).unwrap_or_default();
            Ok(ListWithCards { list, cards })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map(Some)
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Get a list by ID if its board belongs to the organization
pub async fn get_list(pool: &SqlitePool, org_id: &str, list_id: ListId) -> Result<Option<List>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT l.id, l.title, l."order", l.board_id, l.created_at, l.updated_at
        FROM lists l
        JOIN boards b ON b.id = l.board_id
        WHERE l.id = ? AND b.org_id = ?
        "#,
    )
    .bind(list_id)
    .bind(org_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(list_from_row).transpose()
}

/// Insert a list with an already assigned order
pub async fn insert_list<'e, E>(executor: E, board_id: BoardId, title: &str, order: i64) -> Result<List, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = Utc::now();

    let id = sqlx::query(
        r#"
        INSERT INTO lists (title, "order", board_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(title)
    .bind(order)
    .bind(board_id)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?
    .last_insert_rowid();

    Ok(List {
        id,
        title: title.to_string(),
        order,
        board_id,
        created_at: now,
        updated_at: now,
    })
}

/// Append a new list to a board
pub async fn create_list(pool: &SqlitePool, board_id: BoardId, title: &str) -> Result<List, sqlx::Error> {
    let order = ordering::next_list_order(pool, board_id).await?;
    insert_list(pool, board_id, title, order).await
}

/// Rename a list
pub async fn rename_list(
    pool: &SqlitePool,
    org_id: &str,
    list_id: ListId,
    title: &str,
) -> Result<Option<List>, sqlx::Error> {
    let Some(mut list) = get_list(pool, org_id, list_id).await? else {
        return Ok(None);
    };
    let now = Utc::now();

    sqlx::query("UPDATE lists SET title = ?, updated_at = ? WHERE id = ?")
        .bind(title)
        .bind(now)
        .bind(list_id)
        .execute(pool)
        .await?;

    list.title = title.to_string();
    list.updated_at = now;
    Ok(Some(list))
}

/// Delete a list and its cards; sibling orders keep their gap
pub async fn delete_list(pool: &SqlitePool, org_id: &str, list_id: ListId) -> Result<Option<List>, sqlx::Error> {
    let Some(list) = get_list(pool, org_id, list_id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM lists WHERE id = ?")
        .bind(list_id)
        .execute(pool)
        .await?;

    Ok(Some(list))
}

/// Duplicate a list and its cards at the end of the same board
///
/// The copy is appended like any new list. Its cards keep their relative
/// order, numbered from 0. Everything happens in one transaction.
pub async fn copy_list(pool: &SqlitePool, org_id: &str, list_id: ListId) -> Result<Option<ListWithCards>, sqlx::Error> {
    let Some(source) = get_list(pool, org_id, list_id).await? else {
        return Ok(None);
    };

    let mut tx = pool.begin().await?;

    let source_cards = sqlx::query(
        r#"
        SELECT id, title, description, "order", list_id, created_at, updated_at
        FROM cards
        WHERE list_id = ?
        ORDER BY "order" ASC, created_at ASC, id ASC
        "#,
    )
    .bind(list_id)
    .fetch_all(&mut *tx)
    .await?
    .iter()
    .map(card_from_row)
    .collect::<Result<Vec<_>, _>>()?;

    let order = ordering::next_list_order(&mut *tx, source.board_id).await?;
    let title = format!("{} - Copy", source.title);
    let list = insert_list(&mut *tx, source.board_id, &title, order).await?;

    let mut cards = Vec::with_capacity(source_cards.len());
    for (position, card) in source_cards.iter().enumerate() {
        let copy = insert_card(
            &mut *tx,
            list.id,
            &card.title,
            card.description.as_deref(),
            position as i64,
        )
        .await?;
        cards.push(copy);
    }

    tx.commit().await?;

    Ok(Some(ListWithCards { list, cards }))
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// Get a card by ID if its board belongs to the organization
pub async fn get_card(pool: &SqlitePool, org_id: &str, card_id: CardId) -> Result<Option<Card>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT c.id, c.title, c.description, c."order", c.list_id, c.created_at, c.updated_at
        FROM cards c
        JOIN lists l ON l.id = c.list_id
        JOIN boards b ON b.id = l.board_id
        WHERE c.id = ? AND b.org_id = ?
        "#,
    )
    .bind(card_id)
    .bind(org_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(card_from_row).transpose()
}

/// Insert a card with an already assigned order
pub async fn insert_card<'e, E>(
    executor: E,
    list_id: ListId,
    title: &str,
    description: Option<&str>,
    order: i64,
) -> Result<Card, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = Utc::now();

    let id = sqlx::query(
        r#"
        INSERT INTO cards (title, description, "order", list_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(order)
    .bind(list_id)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?
    .last_insert_rowid();

    Ok(Card {
        id,
        title: title.to_string(),
        description: description.map(str::to_string),
        order,
        list_id,
        created_at: now,
        updated_at: now,
    })
}

/// Append a new card to a list
pub async fn create_card(
    pool: &SqlitePool,
    list_id: ListId,
    title: &str,
    description: Option<&str>,
) -> Result<Card, sqlx::Error> {
    let order = ordering::next_card_order(pool, list_id).await?;
    insert_card(pool, list_id, title, description, order).await
}

/// Edit title and/or description of a card
pub async fn update_card(
    pool: &SqlitePool,
    org_id: &str,
    card_id: CardId,
    changes: &UpdateCardRequest,
) -> Result<Option<Card>, sqlx::Error> {
    let Some(mut card) = get_card(pool, org_id, card_id).await? else {
        return Ok(None);
    };

    if let Some(title) = &changes.title {
        card.title = title.clone();
    }
    if let Some(description) = &changes.description {
        card.description = Some(description.clone());
    }
    card.updated_at = Utc::now();

    sqlx::query("UPDATE cards SET title = ?, description = ?, updated_at = ? WHERE id = ?")
        .bind(&card.title)
        .bind(&card.description)
        .bind(card.updated_at)
        .bind(card_id)
        .execute(pool)
        .await?;

    Ok(Some(card))
}

/// Delete a card; sibling orders keep their gap
pub async fn delete_card(pool: &SqlitePool, org_id: &str, card_id: CardId) -> Result<Option<Card>, sqlx::Error> {
    let Some(card) = get_card(pool, org_id, card_id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM cards WHERE id = ?")
        .bind(card_id)
        .execute(pool)
        .await?;

    Ok(Some(card))
}
