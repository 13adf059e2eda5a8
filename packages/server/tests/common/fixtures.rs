//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use chrono::Utc;
use classroom_core::common::{AbsenceRequestId, GroupId};
use classroom_core::domains::absences::{Group, Session};
use sqlx::PgPool;

/// Create a group with one scheduled session
pub async fn create_group_with_session(pool: &PgPool, name: &str) -> Result<(Group, Session)> {
    let group = Group::create(name, pool).await?;
    let session = Session::create(group.id, &format!("{} - week 1", name), Utc::now(), pool).await?;
    Ok((group, session))
}

/// Create a session in an existing group
pub async fn create_session(pool: &PgPool, group_id: GroupId, title: &str) -> Result<Session> {
    Session::create(group_id, title, Utc::now(), pool).await
}

/// Audit rows recorded for one absence request, as (action, actor_id)
pub async fn audit_trail(pool: &PgPool, id: AbsenceRequestId) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT action, actor_id
        FROM audit_events
        WHERE entity = 'absence_request' AND entity_id = $1
        ORDER BY id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
