//! Absence audit events - FACT EVENTS ONLY
//!
//! Every state change the workflow performs produces exactly one event.
//! Actions return the event next to the record and hand it to the audit
//! sink after the primary write has completed.
//!
//! Flow:
//!   create_absence_request → Create { after }
//!   decide_absence_request → Update { before, after }

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{AbsenceRequestId, MemberId};
use crate::domains::absences::models::AbsenceRequest;

/// Entity name recorded on every absence audit event
pub const ABSENCE_ENTITY: &str = "absence_request";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Create => write!(f, "create"),
            AuditAction::Update => write!(f, "update"),
        }
    }
}

/// Immutable record of one create or decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceAuditEvent {
    pub action: AuditAction,
    pub entity: String,
    pub entity_id: AbsenceRequestId,
    pub actor: MemberId,
    /// Snapshot before the change (None for creates)
    pub before: Option<AbsenceRequest>,
    /// Snapshot after the change
    pub after: AbsenceRequest,
    pub occurred_at: DateTime<Utc>,
}

impl AbsenceAuditEvent {
    pub fn created(request: &AbsenceRequest) -> Self {
        Self {
            action: AuditAction::Create,
            entity: ABSENCE_ENTITY.to_string(),
            entity_id: request.id,
            actor: request.requester_id,
            before: None,
            after: request.clone(),
            occurred_at: request.created_at,
        }
    }

    pub fn decided(before: &AbsenceRequest, after: &AbsenceRequest, decider: MemberId) -> Self {
        Self {
            action: AuditAction::Update,
            entity: ABSENCE_ENTITY.to_string(),
            entity_id: after.id,
            actor: decider,
            before: Some(before.clone()),
            after: after.clone(),
            occurred_at: after.decided_at.unwrap_or_else(Utc::now),
        }
    }
}
