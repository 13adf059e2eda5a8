//! Server dependencies for workflow actions (using traits for testability)
//!
//! This module provides the central dependency container used by the
//! absence workflow. External collaborators are trait objects so tests can
//! run the full workflow against in-memory doubles.

use std::sync::Arc;
use std::time::Duration;

use crate::domains::absences::models::REASON_CHARS_CEILING;
use crate::kernel::{BaseAbsenceStore, BaseAuditSink};

// =============================================================================
// WorkflowPolicy
// =============================================================================

/// Policy knobs for the absence workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowPolicy {
    /// Whether an approver may decide an absence they requested themselves
    pub allow_self_decision: bool,
    /// Upper bound on reason length, in chars
    pub max_reason_chars: usize,
    /// How long an action waits on the audit sink before giving up
    pub audit_timeout: Duration,
}

impl WorkflowPolicy {
    pub const DEFAULT_MAX_REASON_CHARS: usize = 1000;
    pub const DEFAULT_AUDIT_TIMEOUT: Duration = Duration::from_secs(2);

    pub fn new(allow_self_decision: bool, max_reason_chars: usize) -> Self {
        Self {
            allow_self_decision,
            // Never exceed what the schema accepts
            max_reason_chars: max_reason_chars.min(REASON_CHARS_CEILING),
            audit_timeout: Self::DEFAULT_AUDIT_TIMEOUT,
        }
    }

    pub fn with_audit_timeout(mut self, audit_timeout: Duration) -> Self {
        self.audit_timeout = audit_timeout;
        self
    }
}

impl Default for WorkflowPolicy {
    fn default() -> Self {
        Self::new(false, Self::DEFAULT_MAX_REASON_CHARS)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseAbsenceStore>,
    pub audit_sink: Arc<dyn BaseAuditSink>,
    pub policy: WorkflowPolicy,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        store: Arc<dyn BaseAbsenceStore>,
        audit_sink: Arc<dyn BaseAuditSink>,
        policy: WorkflowPolicy,
    ) -> Self {
        Self {
            store,
            audit_sink,
            policy,
        }
    }
}
