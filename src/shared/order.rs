//! Batch Order-Update Wire Types
//!
//! The request/response shape exchanged between the optimistic board store
//! and the batch order-update endpoint.
//!
//! A request carries the *complete* renumbering of every sibling whose
//! position changed: for a card move that is every card of the source list
//! and, when different, every card of the destination list. The server
//! applies the items verbatim inside one transaction and does not re-derive
//! anything.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::shared::board::ListId;
use crate::shared::error::SharedError;

/// Which table a batch targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    List,
    Card,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Card => "card",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a batch re-numbering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOrderItem {
    pub id: i64,
    /// Carried for logging on the server; never written
    #[serde(default)]
    pub title: String,
    pub order: i64,
    /// New parent list, cards only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<ListId>,
}

/// Body of `PUT /api/boards/{board_id}/order`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOrderRequest {
    pub kind: EntityKind,
    pub items: Vec<BatchOrderItem>,
}

impl BatchOrderRequest {
    pub fn new(kind: EntityKind, items: Vec<BatchOrderItem>) -> Self {
        Self { kind, items }
    }

    /// Reject payloads that can only come from a caller bug
    ///
    /// - the item list must not be empty
    /// - orders must be non-negative
    /// - an id may appear only once
    /// - list items must not carry a `listId`
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.items.is_empty() {
            return Err(SharedError::validation("items", "Batch must contain at least one item"));
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if item.order < 0 {
                return Err(SharedError::validation(
                    "order",
                    format!("Order of {} {} must be non-negative", self.kind, item.id),
                ));
            }
            if !seen.insert(item.id) {
                return Err(SharedError::validation(
                    "id",
                    format!("{} {} appears more than once", self.kind, item.id),
                ));
            }
            if self.kind == EntityKind::List && item.list_id.is_some() {
                return Err(SharedError::validation(
                    "listId",
                    format!("list {} cannot be reparented", item.id),
                ));
            }
        }

        Ok(())
    }
}

/// Acknowledgement of a committed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOrderResponse {
    pub success: bool,
    pub count: u64,
}
