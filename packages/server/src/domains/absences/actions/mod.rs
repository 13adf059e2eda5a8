//! Absence workflow actions - business logic functions
//!
//! Actions take the acting member explicitly and return the audit event
//! alongside the record. The event is delivered to the audit sink after the
//! primary write, bounded by `WorkflowPolicy::audit_timeout`; delivery
//! failures and timeouts are logged and never fail the action.
//! Authorization (role checks) happens at the HTTP layer before an action is
//! called.

use chrono::Utc;
use tracing::{info, warn};

use crate::common::{AbsenceRequestId, GroupId, MemberId};
use crate::domains::absences::data::{check_reason, Decision};
use crate::domains::absences::errors::AbsenceError;
use crate::domains::absences::events::AbsenceAuditEvent;
use crate::domains::absences::models::{AbsenceFilter, AbsenceRequest, AbsenceStatus, NewAbsence};
use crate::kernel::ServerDeps;

/// Result of a state-changing action
#[derive(Debug, Clone)]
pub struct AbsenceOutcome {
    pub request: AbsenceRequest,
    pub event: AbsenceAuditEvent,
}

/// Report an absence against a session of a group
/// Returns the pending request and its Create event.
pub async fn create_absence_request(
    new: NewAbsence,
    requester: MemberId,
    deps: &ServerDeps,
) -> Result<AbsenceOutcome, AbsenceError> {
    if !requester.is_valid() {
        return Err(AbsenceError::validation("requester id must be positive"));
    }
    check_reason(&new.reason, deps.policy.max_reason_chars)?;

    info!(
        group_id = %new.group_id,
        session_id = %new.session_id,
        requester = %requester,
        "Creating absence request"
    );

    deps.store
        .find_group(new.group_id)
        .await
        .map_err(AbsenceError::StoreFailure)?
        .ok_or_else(|| AbsenceError::not_found("group", new.group_id))?;

    let session = deps
        .store
        .find_session(new.session_id)
        .await
        .map_err(AbsenceError::StoreFailure)?
        .ok_or_else(|| AbsenceError::not_found("session", new.session_id))?;

    if session.group_id != new.group_id {
        return Err(AbsenceError::InvalidRelation(format!(
            "session {} belongs to group {}, not group {}",
            session.id, session.group_id, new.group_id
        )));
    }

    let request = deps
        .store
        .insert_absence(&new, requester, Utc::now())
        .await
        .map_err(AbsenceError::StoreFailure)?;

    let event = AbsenceAuditEvent::created(&request);
    deliver(&event, deps).await;

    Ok(AbsenceOutcome { request, event })
}

/// Approve or reject a pending absence request
/// Returns the decided request and its Update event.
///
/// Exactly one of any number of concurrent calls for the same pending
/// request succeeds: the transition is a single conditional update, and
/// every loser gets `AlreadyDecided`.
pub async fn decide_absence_request(
    request_id: AbsenceRequestId,
    decider: MemberId,
    decision: Decision,
    deps: &ServerDeps,
) -> Result<AbsenceOutcome, AbsenceError> {
    if !decider.is_valid() {
        return Err(AbsenceError::validation("decider id must be positive"));
    }

    info!(
        absence_id = %request_id,
        decider = %decider,
        decision = ?decision,
        "Deciding absence request"
    );

    // Rows are never deleted, so once this read succeeds a zero-row update
    // below can only mean another decision won.
    let before = deps
        .store
        .find_absence(request_id)
        .await
        .map_err(AbsenceError::StoreFailure)?
        .ok_or_else(|| AbsenceError::not_found("absence request", request_id))?;

    if before.status.is_terminal() {
        return Err(AbsenceError::AlreadyDecided(request_id));
    }

    if !deps.policy.allow_self_decision && before.requester_id == decider {
        return Err(AbsenceError::Forbidden(
            "approvers may not decide their own absence requests".to_string(),
        ));
    }

    let after = deps
        .store
        .update_if_pending(request_id, decision.status(), decider, Utc::now())
        .await
        .map_err(AbsenceError::StoreFailure)?
        .ok_or(AbsenceError::AlreadyDecided(request_id))?;

    let event = AbsenceAuditEvent::decided(&before, &after, decider);
    deliver(&event, deps).await;

    Ok(AbsenceOutcome {
        request: after,
        event,
    })
}

/// Get a single absence request
pub async fn get_absence_request(
    request_id: AbsenceRequestId,
    deps: &ServerDeps,
) -> Result<AbsenceRequest, AbsenceError> {
    deps.store
        .find_absence(request_id)
        .await
        .map_err(AbsenceError::StoreFailure)?
        .ok_or_else(|| AbsenceError::not_found("absence request", request_id))
}

/// List all absence requests, newest first
pub async fn list_absences(
    status: Option<AbsenceStatus>,
    deps: &ServerDeps,
) -> Result<Vec<AbsenceRequest>, AbsenceError> {
    deps.store
        .list_absences(AbsenceFilter {
            group_id: None,
            status,
        })
        .await
        .map_err(AbsenceError::StoreFailure)
}

/// List absence requests of one group, newest first
///
/// An unknown group yields an empty list; only a malformed id is an error.
pub async fn list_absences_by_group(
    group_id: GroupId,
    status: Option<AbsenceStatus>,
    deps: &ServerDeps,
) -> Result<Vec<AbsenceRequest>, AbsenceError> {
    if !group_id.is_valid() {
        return Err(AbsenceError::validation("group_id must be positive"));
    }

    deps.store
        .list_absences(AbsenceFilter {
            group_id: Some(group_id),
            status,
        })
        .await
        .map_err(AbsenceError::StoreFailure)
}

async fn deliver(event: &AbsenceAuditEvent, deps: &ServerDeps) {
    let timeout = deps.policy.audit_timeout;
    match tokio::time::timeout(timeout, deps.audit_sink.emit(event)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(
            error = %e,
            action = %event.action,
            entity_id = %event.entity_id,
            "Failed to deliver audit event"
        ),
        Err(_) => warn!(
            timeout_ms = timeout.as_millis() as u64,
            action = %event.action,
            entity_id = %event.entity_id,
            "Audit delivery timed out"
        ),
    }
}
