use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::GroupId;

/// Group - a class roster. Read-only context for the absence workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub async fn find_by_id(id: GroupId, pool: &PgPool) -> Result<Option<Self>> {
        let group = sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(group)
    }

    /// Create a group (catalog management and fixtures only)
    pub async fn create(name: &str, pool: &PgPool) -> Result<Self> {
        let group =
            sqlx::query_as::<_, Group>("INSERT INTO groups (name) VALUES ($1) RETURNING *")
                .bind(name)
                .fetch_one(pool)
                .await?;
        Ok(group)
    }
}
