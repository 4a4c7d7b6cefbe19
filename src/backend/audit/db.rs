//! Audit log persistence

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::NewAuditEntry;
use crate::shared::{AuditAction, AuditEntity, AuditLog};

fn entry_from_row(row: &SqliteRow) -> Result<AuditLog, sqlx::Error> {
    let action: String = row.try_get("action")?;
    let entity_type: String = row.try_get("entity_type")?;

    Ok(AuditLog {
        id: row.try_get("id")?,
        org_id: row.try_get("org_id")?,
        action: action.parse::<AuditAction>().map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        entity_type: entity_type.parse::<AuditEntity>().map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        entity_id: row.try_get("entity_id")?,
        entity_title: row.try_get("entity_title")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Insert one entry and return its id
pub async fn insert_entry(pool: &SqlitePool, entry: &NewAuditEntry) -> Result<i64, sqlx::Error> {
    let id = sqlx::query(
        r#"
        INSERT INTO audit_logs (org_id, action, entity_type, entity_id, entity_title, user_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.org_id)
    .bind(entry.action.as_str())
    .bind(entry.entity_type.as_str())
    .bind(entry.entity_id)
    .bind(&entry.entity_title)
    .bind(&entry.user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Most recent entries of an organization
pub async fn list_org_entries(pool: &SqlitePool, org_id: &str, limit: i64) -> Result<Vec<AuditLog>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, org_id, action, entity_type, entity_id, entity_title, user_id, created_at
        FROM audit_logs
        WHERE org_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(org_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(entry_from_row).collect()
}

/// History of one entity, newest first
pub async fn list_entity_entries(
    pool: &SqlitePool,
    org_id: &str,
    entity_type: AuditEntity,
    entity_id: i64,
) -> Result<Vec<AuditLog>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, org_id, action, entity_type, entity_id, entity_title, user_id, created_at
        FROM audit_logs
        WHERE org_id = ? AND entity_type = ? AND entity_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(org_id)
    .bind(entity_type.as_str())
    .bind(entity_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(entry_from_row).collect()
}
