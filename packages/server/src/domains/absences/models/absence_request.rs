use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AbsenceRequestId, GroupId, MemberId, SessionId};

/// Storage ceiling for `reason`, mirrored by a CHECK constraint in the schema.
/// The configurable limit in `WorkflowPolicy` may be lower, never higher.
pub const REASON_CHARS_CEILING: usize = 2000;

/// AbsenceRequest - a member's report of an absence from one session of a group
///
/// `decided_by` and `decided_at` are set together with the status change and
/// only when the status is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AbsenceRequest {
    pub id: AbsenceRequestId,
    pub group_id: GroupId,
    pub session_id: SessionId,
    pub requester_id: MemberId,
    pub reason: String,
    pub status: AbsenceStatus,
    pub decided_by: Option<MemberId>,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

/// Absence request status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "absence_status", rename_all = "snake_case")]
pub enum AbsenceStatus {
    Pending,
    Approved,
    Rejected,
}

impl AbsenceStatus {
    /// Approved and Rejected admit no further transition
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AbsenceStatus::Pending)
    }
}

impl std::fmt::Display for AbsenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbsenceStatus::Pending => write!(f, "pending"),
            AbsenceStatus::Approved => write!(f, "approved"),
            AbsenceStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for AbsenceStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(AbsenceStatus::Pending),
            "approved" => Ok(AbsenceStatus::Approved),
            "rejected" => Ok(AbsenceStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid absence status: {}", s)),
        }
    }
}

/// Validated submission, ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAbsence {
    pub group_id: GroupId,
    pub session_id: SessionId,
    pub reason: String,
}

/// Filter for list queries; `None` fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsenceFilter {
    pub group_id: Option<GroupId>,
    pub status: Option<AbsenceStatus>,
}

impl AbsenceFilter {
    pub fn matches(&self, request: &AbsenceRequest) -> bool {
        self.group_id.map_or(true, |g| g == request.group_id)
            && self.status.map_or(true, |s| s == request.status)
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl AbsenceRequest {
    /// Find absence request by ID
    pub async fn find_by_id(id: AbsenceRequestId, pool: &PgPool) -> Result<Option<Self>> {
        let request =
            sqlx::query_as::<_, AbsenceRequest>("SELECT * FROM absence_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(request)
    }

    /// Insert a new request in the pending state
    pub async fn create(
        new: &NewAbsence,
        requester_id: MemberId,
        created_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        let request = sqlx::query_as::<_, AbsenceRequest>(
            r#"
            INSERT INTO absence_requests (
                group_id,
                session_id,
                requester_id,
                reason,
                status,
                created_at
            )
            VALUES ($1, $2, $3, $4, 'pending', $5)
            RETURNING *
            "#,
        )
        .bind(new.group_id)
        .bind(new.session_id)
        .bind(requester_id)
        .bind(&new.reason)
        .bind(created_at)
        .fetch_one(pool)
        .await?;
        Ok(request)
    }

    /// Record a decision if and only if the request is still pending.
    ///
    /// Status, decider and timestamp are written by one statement. Returns
    /// `None` when no row matched, i.e. the request was already decided or
    /// does not exist.
    pub async fn update_if_pending(
        id: AbsenceRequestId,
        status: AbsenceStatus,
        decided_by: MemberId,
        decided_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let request = sqlx::query_as::<_, AbsenceRequest>(
            r#"
            UPDATE absence_requests
            SET
                status = $2,
                decided_by = $3,
                decided_at = $4
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(decided_by)
        .bind(decided_at)
        .fetch_optional(pool)
        .await?;
        Ok(request)
    }

    /// List requests, newest first
    pub async fn find_filtered(filter: AbsenceFilter, pool: &PgPool) -> Result<Vec<Self>> {
        let requests = sqlx::query_as::<_, AbsenceRequest>(
            r#"
            SELECT * FROM absence_requests
            WHERE ($1::BIGINT IS NULL OR group_id = $1)
              AND ($2::absence_status IS NULL OR status = $2)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(filter.group_id)
        .bind(filter.status)
        .fetch_all(pool)
        .await?;
        Ok(requests)
    }
}
