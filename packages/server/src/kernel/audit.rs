//! Audit sink implementations.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::BaseAuditSink;
use crate::domains::absences::events::AbsenceAuditEvent;

/// Writes audit events to the `audit_events` table.
///
/// Runs as its own statement after the workflow write, so a failure here
/// never rolls the state change back.
#[derive(Clone)]
pub struct PostgresAuditSink {
    pool: PgPool,
}

impl PostgresAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseAuditSink for PostgresAuditSink {
    async fn emit(&self, event: &AbsenceAuditEvent) -> Result<()> {
        let before = event
            .before
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .context("Failed to serialize audit snapshot")?;
        let after = serde_json::to_value(&event.after).context("Failed to serialize audit snapshot")?;

        sqlx::query(
            r#"
            INSERT INTO audit_events (action, entity, entity_id, actor_id, before, after, occurred_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.action.to_string())
        .bind(&event.entity)
        .bind(event.entity_id)
        .bind(event.actor)
        .bind(before)
        .bind(after)
        .bind(event.occurred_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert audit event")?;

        Ok(())
    }
}

/// Emits audit events as structured tracing events on the `audit` target.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl BaseAuditSink for TracingAuditSink {
    async fn emit(&self, event: &AbsenceAuditEvent) -> Result<()> {
        let snapshot = serde_json::to_string(&event.after)?;
        info!(
            target: "audit",
            action = %event.action,
            entity = %event.entity,
            entity_id = %event.entity_id,
            actor = %event.actor,
            status = %event.after.status,
            snapshot = %snapshot,
            "Audit event"
        );
        Ok(())
    }
}
