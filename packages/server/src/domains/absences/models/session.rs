use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{GroupId, SessionId};

/// Session - one scheduled occurrence of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: SessionId,
    pub group_id: GroupId,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub async fn find_by_id(id: SessionId, pool: &PgPool) -> Result<Option<Self>> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(session)
    }

    /// Schedule a session (catalog management and fixtures only)
    pub async fn create(
        group_id: GroupId,
        title: &str,
        starts_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (group_id, title, starts_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(group_id)
        .bind(title)
        .bind(starts_at)
        .fetch_one(pool)
        .await?;
        Ok(session)
    }
}
