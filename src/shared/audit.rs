//! Audit Log Records
//!
//! Audit entries are written after successful create/update/delete of a
//! board, list or card. Reorders are not audit-logged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::error::SharedError;

/// What happened to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for AuditAction {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            other => Err(SharedError::validation("action", format!("Unknown audit action '{}'", other))),
        }
    }
}

/// Kind of entity an audit entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditEntity {
    Board,
    List,
    Card,
}

impl AuditEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Board => "BOARD",
            Self::List => "LIST",
            Self::Card => "CARD",
        }
    }
}

impl FromStr for AuditEntity {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOARD" => Ok(Self::Board),
            "LIST" => Ok(Self::List),
            "CARD" => Ok(Self::Card),
            other => Err(SharedError::validation("entityType", format!("Unknown audit entity '{}'", other))),
        }
    }
}

/// A persisted audit entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: i64,
    pub org_id: String,
    pub action: AuditAction,
    pub entity_type: AuditEntity,
    pub entity_id: i64,
    pub entity_title: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}
