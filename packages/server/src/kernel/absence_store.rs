//! Postgres-backed record store.
//!
//! Delegates to the model methods so every query stays in `models/`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::BaseAbsenceStore;
use crate::common::{AbsenceRequestId, GroupId, MemberId, SessionId};
use crate::domains::absences::models::{
    AbsenceFilter, AbsenceRequest, AbsenceStatus, Group, NewAbsence, Session,
};

#[derive(Clone)]
pub struct PostgresAbsenceStore {
    pool: PgPool,
}

impl PostgresAbsenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseAbsenceStore for PostgresAbsenceStore {
    async fn find_group(&self, id: GroupId) -> Result<Option<Group>> {
        Group::find_by_id(id, &self.pool).await
    }

    async fn find_session(&self, id: SessionId) -> Result<Option<Session>> {
        Session::find_by_id(id, &self.pool).await
    }

    async fn find_absence(&self, id: AbsenceRequestId) -> Result<Option<AbsenceRequest>> {
        AbsenceRequest::find_by_id(id, &self.pool).await
    }

    async fn insert_absence(
        &self,
        new: &NewAbsence,
        requester_id: MemberId,
        created_at: DateTime<Utc>,
    ) -> Result<AbsenceRequest> {
        AbsenceRequest::create(new, requester_id, created_at, &self.pool).await
    }

    async fn update_if_pending(
        &self,
        id: AbsenceRequestId,
        status: AbsenceStatus,
        decided_by: MemberId,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<AbsenceRequest>> {
        AbsenceRequest::update_if_pending(id, status, decided_by, decided_at, &self.pool).await
    }

    async fn list_absences(&self, filter: AbsenceFilter) -> Result<Vec<AbsenceRequest>> {
        AbsenceRequest::find_filtered(filter, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
