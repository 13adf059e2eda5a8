// TestDependencies - in-memory implementations for testing
//
// Provides a record store and audit sinks that can be injected into
// ServerDeps for tests and local runs without Postgres.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{BaseAbsenceStore, BaseAuditSink, ServerDeps, WorkflowPolicy};
use crate::common::{AbsenceRequestId, GroupId, MemberId, SessionId};
use crate::domains::absences::events::AbsenceAuditEvent;
use crate::domains::absences::models::{
    AbsenceFilter, AbsenceRequest, AbsenceStatus, Group, NewAbsence, Session,
};

// =============================================================================
// Memory Record Store
// =============================================================================

#[derive(Default)]
struct MemoryState {
    groups: HashMap<GroupId, Group>,
    sessions: HashMap<SessionId, Session>,
    absences: BTreeMap<AbsenceRequestId, AbsenceRequest>,
    next_absence_id: i64,
}

/// Mutex-guarded store with the same conditional-update semantics as Postgres.
///
/// Every operation yields to the scheduler before taking the lock so that
/// concurrent callers interleave between their reads and writes.
pub struct MemoryAbsenceStore {
    state: Mutex<MemoryState>,
    unavailable: AtomicBool,
}

impl MemoryAbsenceStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_absence_id: 1,
                ..Default::default()
            }),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Seed a group
    pub fn with_group(self, id: i64, name: &str) -> Self {
        let group = Group {
            id: GroupId::from_i64(id),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.lock().groups.insert(group.id, group);
        self
    }

    /// Seed a session belonging to `group_id`
    pub fn with_session(self, id: i64, group_id: i64, title: &str) -> Self {
        let now = Utc::now();
        let session = Session {
            id: SessionId::from_i64(id),
            group_id: GroupId::from_i64(group_id),
            title: title.to_string(),
            starts_at: now,
            created_at: now,
        };
        self.lock().sessions.insert(session.id, session);
        self
    }

    /// Id the next inserted absence request will receive
    pub fn with_next_absence_id(self, id: i64) -> Self {
        self.lock().next_absence_id = id;
        self
    }

    /// Make every subsequent call fail, as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored absence requests
    pub fn absence_count(&self) -> usize {
        self.lock().absences.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A panic while holding the lock cannot leave a half-written row:
        // every mutation is a single insert.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn enter(&self) -> Result<()> {
        tokio::task::yield_now().await;
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(anyhow!("memory store unavailable"));
        }
        Ok(())
    }
}

impl Default for MemoryAbsenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAbsenceStore for MemoryAbsenceStore {
    async fn find_group(&self, id: GroupId) -> Result<Option<Group>> {
        self.enter().await?;
        Ok(self.lock().groups.get(&id).cloned())
    }

    async fn find_session(&self, id: SessionId) -> Result<Option<Session>> {
        self.enter().await?;
        Ok(self.lock().sessions.get(&id).cloned())
    }

    async fn find_absence(&self, id: AbsenceRequestId) -> Result<Option<AbsenceRequest>> {
        self.enter().await?;
        Ok(self.lock().absences.get(&id).cloned())
    }

    async fn insert_absence(
        &self,
        new: &NewAbsence,
        requester_id: MemberId,
        created_at: DateTime<Utc>,
    ) -> Result<AbsenceRequest> {
        self.enter().await?;
        let mut state = self.lock();

        let id = AbsenceRequestId::from_i64(state.next_absence_id);
        state.next_absence_id += 1;

        let request = AbsenceRequest {
            id,
            group_id: new.group_id,
            session_id: new.session_id,
            requester_id,
            reason: new.reason.clone(),
            status: AbsenceStatus::Pending,
            decided_by: None,
            created_at,
            decided_at: None,
        };
        state.absences.insert(id, request.clone());
        Ok(request)
    }

    async fn update_if_pending(
        &self,
        id: AbsenceRequestId,
        status: AbsenceStatus,
        decided_by: MemberId,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<AbsenceRequest>> {
        self.enter().await?;
        let mut state = self.lock();

        // Check and write under the same guard
        match state.absences.get_mut(&id) {
            Some(row) if row.status == AbsenceStatus::Pending => {
                let mut updated = row.clone();
                updated.status = status;
                updated.decided_by = Some(decided_by);
                updated.decided_at = Some(decided_at);
                *row = updated.clone();
                Ok(Some(updated))
            }
            _ => Ok(None),
        }
    }

    async fn list_absences(&self, filter: AbsenceFilter) -> Result<Vec<AbsenceRequest>> {
        self.enter().await?;
        let mut requests: Vec<AbsenceRequest> = self
            .lock()
            .absences
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(requests)
    }

    async fn ping(&self) -> Result<()> {
        self.enter().await
    }
}

// =============================================================================
// Audit Sinks
// =============================================================================

/// Records every emitted event
#[derive(Default)]
pub struct SpyAuditSink {
    events: Mutex<Vec<AbsenceAuditEvent>>,
}

impl SpyAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far, in emission order
    pub fn events(&self) -> Vec<AbsenceAuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl BaseAuditSink for SpyAuditSink {
    async fn emit(&self, event: &AbsenceAuditEvent) -> Result<()> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
        Ok(())
    }
}

/// Rejects every event
#[derive(Debug, Default)]
pub struct FailingAuditSink;

#[async_trait]
impl BaseAuditSink for FailingAuditSink {
    async fn emit(&self, _event: &AbsenceAuditEvent) -> Result<()> {
        Err(anyhow!("audit sink unavailable"))
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub store: Arc<MemoryAbsenceStore>,
    pub audit_sink: Arc<SpyAuditSink>,
    pub policy: WorkflowPolicy,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryAbsenceStore::new()),
            audit_sink: Arc::new(SpyAuditSink::new()),
            policy: WorkflowPolicy::default(),
        }
    }

    /// Set a seeded store
    pub fn store(mut self, store: MemoryAbsenceStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Set the workflow policy
    pub fn policy(mut self, policy: WorkflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build ServerDeps sharing this builder's store and spy
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(self.store.clone(), self.audit_sink.clone(), self.policy)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
