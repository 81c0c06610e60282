//! Append-only audit trail.
//!
//! Lifecycle and workflow actions emit one record per state change. The
//! sink is best-effort from the caller's point of view: a failed append
//! never rolls back a committed transition, it is logged and the call still
//! succeeds.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// A record to append. `payload` carries the serialized domain event.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub entity_type: &'static str,
    pub entity_id: Uuid,
    pub event_type: &'static str,
    pub actor_id: Option<Uuid>,
    pub payload: serde_json::Value,
}

impl AuditRecord {
    pub fn new(
        entity_type: &'static str,
        entity_id: Uuid,
        event_type: &'static str,
        actor_id: Option<Uuid>,
        event: &impl Serialize,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            event_type,
            actor_id,
            payload: serde_json::to_value(event).unwrap_or(serde_json::Value::Null),
        }
    }
}

/// A stored audit row.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct EventRow {
    pub id: i64,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub event_type: String,
    pub actor_id: Option<Uuid>,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait BaseAuditSink: Send + Sync {
    /// Append one record. Write-once: there is no update or delete.
    async fn append(&self, record: AuditRecord) -> Result<()>;

    /// All records for one entity, oldest first.
    async fn list(&self, entity_type: &str, entity_id: Uuid) -> Result<Vec<EventRow>>;
}

/// Postgres-backed sink writing to the `event_log` table.
pub struct PgAuditSink {
    pool: PgPool,
}

impl PgAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseAuditSink for PgAuditSink {
    async fn append(&self, record: AuditRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO event_log (entity_type, entity_id, event_type, actor_id, payload)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.entity_type)
        .bind(record.entity_id)
        .bind(record.event_type)
        .bind(record.actor_id)
        .bind(&record.payload)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, entity_type: &str, entity_id: Uuid) -> Result<Vec<EventRow>> {
        sqlx::query_as::<_, EventRow>(
            "SELECT * FROM event_log
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY id ASC",
        )
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }
}
