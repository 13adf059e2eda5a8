// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Workflow rules live in domains/absences/actions and use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAbsenceStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::common::{AbsenceRequestId, GroupId, MemberId, SessionId};
use crate::domains::absences::events::AbsenceAuditEvent;
use crate::domains::absences::models::{
    AbsenceFilter, AbsenceRequest, AbsenceStatus, Group, NewAbsence, Session,
};

// =============================================================================
// Record Store Trait (Infrastructure)
// =============================================================================

/// Transactional storage for absence requests and their read-only context.
#[async_trait]
pub trait BaseAbsenceStore: Send + Sync {
    async fn find_group(&self, id: GroupId) -> Result<Option<Group>>;

    async fn find_session(&self, id: SessionId) -> Result<Option<Session>>;

    async fn find_absence(&self, id: AbsenceRequestId) -> Result<Option<AbsenceRequest>>;

    /// Insert a pending request; the store assigns the id
    async fn insert_absence(
        &self,
        new: &NewAbsence,
        requester_id: MemberId,
        created_at: DateTime<Utc>,
    ) -> Result<AbsenceRequest>;

    /// Conditional update: write status, decider and timestamp in one atomic
    /// step only while the row is still pending. `None` means zero rows
    /// were affected.
    async fn update_if_pending(
        &self,
        id: AbsenceRequestId,
        status: AbsenceStatus,
        decided_by: MemberId,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<AbsenceRequest>>;

    /// Matching requests ordered by creation time, newest first
    async fn list_absences(&self, filter: AbsenceFilter) -> Result<Vec<AbsenceRequest>>;

    /// Cheap round trip used by the health check
    async fn ping(&self) -> Result<()>;
}

// =============================================================================
// Audit Sink Trait (Infrastructure)
// =============================================================================

/// Receives audit events after the state change they describe has been
/// written. Errors are reported to the caller, which must not undo the write.
#[async_trait]
pub trait BaseAuditSink: Send + Sync {
    async fn emit(&self, event: &AbsenceAuditEvent) -> Result<()>;
}
