//! HTTP mapping of workflow errors.
//!
//! Body shape: `{"error": {"code": "ALREADY_DECIDED", "message": "..."}}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domains::absences::AbsenceError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

pub fn status_for(err: &AbsenceError) -> StatusCode {
    match err {
        AbsenceError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
        AbsenceError::NotFound { .. } => StatusCode::NOT_FOUND,
        AbsenceError::InvalidRelation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AbsenceError::Forbidden(_) => StatusCode::FORBIDDEN,
        AbsenceError::Unauthorized => StatusCode::UNAUTHORIZED,
        AbsenceError::AlreadyDecided(_) => StatusCode::CONFLICT,
        AbsenceError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AbsenceError {
    fn into_response(self) -> Response {
        let message = match &self {
            AbsenceError::StoreFailure(cause) => {
                tracing::error!(error = ?cause, "Store failure");
                "internal error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message,
            },
        };

        (status_for(&self), Json(body)).into_response()
    }
}
