//! Audit Log
//!
//! Records who created, changed or deleted a board, list or card.
//!
//! Writes are fire-and-forget: the handler has already succeeded when the
//! entry is queued, so a failed insert is logged and otherwise ignored.
//! The batch reorder path never writes here.

pub mod db;
pub mod handlers;

use sqlx::SqlitePool;
use tokio::task::JoinHandle;

use crate::backend::middleware::OrgContext;
use crate::shared::{AuditAction, AuditEntity};

/// An audit entry that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub org_id: String,
    pub user_id: String,
    pub action: AuditAction,
    pub entity_type: AuditEntity,
    pub entity_id: i64,
    pub entity_title: String,
}

impl NewAuditEntry {
    pub fn new(
        ctx: &OrgContext,
        action: AuditAction,
        entity_type: AuditEntity,
        entity_id: i64,
        entity_title: impl Into<String>,
    ) -> Self {
        Self {
            org_id: ctx.org_id.clone(),
            user_id: ctx.user_id.clone(),
            action,
            entity_type,
            entity_id,
            entity_title: entity_title.into(),
        }
    }
}

/// Background writer for audit entries
#[derive(Clone, Debug)]
pub struct AuditWriter {
    pool: Option<SqlitePool>,
}

impl AuditWriter {
    pub fn new(pool: Option<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Queue an entry for insertion
    ///
    /// Returns the spawned task, or `None` when there is no database. Callers
    /// normally drop the handle.
    pub fn record(&self, entry: NewAuditEntry) -> Option<JoinHandle<()>> {
        let Some(pool) = self.pool.clone() else {
            tracing::debug!("No database, skipping audit entry {:?}", entry);
            return None;
        };

        Some(tokio::spawn(async move {
            match db::insert_entry(&pool, &entry).await {
                Ok(id) => tracing::debug!(
                    "Audit {} {} {} as entry {}",
                    entry.action.as_str(),
                    entry.entity_type.as_str(),
                    entry.entity_id,
                    id
                ),
                Err(e) => tracing::warn!(
                    "Failed to write audit entry for {} {}: {}",
                    entry.entity_type.as_str(),
                    entry.entity_id,
                    e
                ),
            }
        }))
    }
}
