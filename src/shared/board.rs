//! Board, List and Card Records
//!
//! Plain data records for the three levels of a board. Field names are
//! serialized in camelCase (`listId`, `boardId`, `createdAt`) so the JSON
//! matches what the board UI consumes.
//!
//! `order` is the position of an entity among its siblings. It is only
//! guaranteed to be contiguous and 0-based right after a reorder; creation
//! appends with `max + 1` and deletion leaves gaps. Readers must therefore
//! compare orders, never index by them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Board identifier
pub type BoardId = i64;

/// List identifier
pub type ListId = i64;

/// Card identifier
pub type CardId = i64;

/// Longest title accepted for boards, lists and cards
pub const MAX_TITLE_LEN: usize = 255;

/// Top-level container owned by an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub org_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ordered container of cards within a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub title: String,
    pub order: i64,
    pub board_id: BoardId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Leaf task item within a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub order: i64,
    pub list_id: ListId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A list together with its cards, both ordered by `order` ascending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWithCards {
    #[serde(flatten)]
    pub list: List,
    pub cards: Vec<Card>,
}

/// Request body for creating a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
}

/// Request body for creating a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListRequest {
    pub title: String,
}

/// Request body for renaming a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateListRequest {
    pub title: String,
}

/// Request body for creating a card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for editing a card; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCardRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Check that a title is non-blank and not longer than [`MAX_TITLE_LEN`]
pub fn validate_title(field: &str, title: &str) -> Result<(), SharedError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, "Title is required"));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(SharedError::validation(
            field,
            format!("Title must be at most {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(())
}
