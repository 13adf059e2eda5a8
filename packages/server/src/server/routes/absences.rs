//! Absence workflow endpoints.
//!
//! POST /api/absences                       submit (any authenticated actor)
//! POST /api/absences/decide                approve/reject (approver role)
//! GET  /api/absences[?status=]             list all
//! GET  /api/absences/:id                   get one
//! GET  /api/groups/:group_id/absences      list one group
//!
//! Handlers resolve the actor from the JWT extension, check the role, parse
//! and validate the body, then delegate to the workflow actions.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};

use crate::common::{
    AbsenceRequest as AbsenceRequestEntity, Actor, AuthError, Capability, Group,
};
use crate::domains::absences::actions;
use crate::domains::absences::data::{
    parse_id, DecideAbsenceInput, DecisionResponse, ListAbsencesQuery, SubmitAbsenceInput,
};
use crate::domains::absences::{AbsenceError, AbsenceRequest};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// Resolve the caller and check the capability before any workflow code runs
fn authorize(
    auth: Option<Extension<AuthUser>>,
    capability: Capability,
) -> Result<Actor, AbsenceError> {
    let Extension(user) = auth.ok_or(AuthError::AuthenticationRequired)?;
    Ok(user.actor().can(capability).check()?)
}

fn body_error(rejection: JsonRejection) -> AbsenceError {
    AbsenceError::validation(format!("invalid request body: {}", rejection.body_text()))
}

fn query_error(rejection: QueryRejection) -> AbsenceError {
    AbsenceError::validation(format!("invalid query string: {}", rejection.body_text()))
}

pub async fn submit_absence_handler(
    Extension(state): Extension<AxumAppState>,
    auth: Option<Extension<AuthUser>>,
    body: Result<Json<SubmitAbsenceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<AbsenceRequest>), AbsenceError> {
    let actor = authorize(auth, Capability::SubmitAbsences)?;
    let Json(input) = body.map_err(body_error)?;
    let new = input.validate(state.server_deps.policy.max_reason_chars)?;

    let outcome = actions::create_absence_request(new, actor.id(), &state.server_deps).await?;

    Ok((StatusCode::CREATED, Json(outcome.request)))
}

pub async fn decide_absence_handler(
    Extension(state): Extension<AxumAppState>,
    auth: Option<Extension<AuthUser>>,
    body: Result<Json<DecideAbsenceInput>, JsonRejection>,
) -> Result<Json<DecisionResponse>, AbsenceError> {
    let actor = authorize(auth, Capability::DecideAbsences)?;
    let Json(input) = body.map_err(body_error)?;
    let (request_id, decision) = input.validate()?;

    actions::decide_absence_request(request_id, actor.id(), decision, &state.server_deps).await?;

    Ok(Json(DecisionResponse::success()))
}

pub async fn list_absences_handler(
    Extension(state): Extension<AxumAppState>,
    auth: Option<Extension<AuthUser>>,
    query: Result<Query<ListAbsencesQuery>, QueryRejection>,
) -> Result<Json<Vec<AbsenceRequest>>, AbsenceError> {
    authorize(auth, Capability::ViewAbsences)?;
    let Query(query) = query.map_err(query_error)?;
    let status = query.validate()?;

    let requests = actions::list_absences(status, &state.server_deps).await?;
    Ok(Json(requests))
}

pub async fn get_absence_handler(
    Extension(state): Extension<AxumAppState>,
    auth: Option<Extension<AuthUser>>,
    Path(id): Path<String>,
) -> Result<Json<AbsenceRequest>, AbsenceError> {
    authorize(auth, Capability::ViewAbsences)?;
    let request_id = parse_id::<AbsenceRequestEntity>("id", &id)?;

    let request = actions::get_absence_request(request_id, &state.server_deps).await?;
    Ok(Json(request))
}

pub async fn list_group_absences_handler(
    Extension(state): Extension<AxumAppState>,
    auth: Option<Extension<AuthUser>>,
    Path(group_id): Path<String>,
    query: Result<Query<ListAbsencesQuery>, QueryRejection>,
) -> Result<Json<Vec<AbsenceRequest>>, AbsenceError> {
    authorize(auth, Capability::ViewAbsences)?;
    let group_id = parse_id::<Group>("group_id", &group_id)?;
    let Query(query) = query.map_err(query_error)?;
    let status = query.validate()?;

    let requests = actions::list_absences_by_group(group_id, status, &state.server_deps).await?;
    Ok(Json(requests))
}
