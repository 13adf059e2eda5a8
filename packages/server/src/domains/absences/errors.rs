use thiserror::Error;

use crate::common::{AbsenceRequestId, AuthError};

/// Errors returned by absence workflow operations
///
/// Every variant maps to a stable machine-readable code via [`AbsenceError::code`].
#[derive(Error, Debug)]
pub enum AbsenceError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid relation: {0}")]
    InvalidRelation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Absence request {0} has already been decided")]
    AlreadyDecided(AbsenceRequestId),

    #[error("Store failure: {0}")]
    StoreFailure(#[source] anyhow::Error),
}

impl AbsenceError {
    pub fn validation(message: impl Into<String>) -> Self {
        AbsenceError::ValidationFailed(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        AbsenceError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AbsenceError::ValidationFailed(_) => "VALIDATION_FAILED",
            AbsenceError::NotFound { .. } => "NOT_FOUND",
            AbsenceError::InvalidRelation(_) => "INVALID_RELATION",
            AbsenceError::Forbidden(_) => "FORBIDDEN",
            AbsenceError::Unauthorized => "UNAUTHORIZED",
            AbsenceError::AlreadyDecided(_) => "ALREADY_DECIDED",
            AbsenceError::StoreFailure(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<AuthError> for AbsenceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationRequired => AbsenceError::Unauthorized,
            AuthError::ApproverRequired => AbsenceError::Forbidden(err.to_string()),
            AuthError::InvalidActor => AbsenceError::ValidationFailed(err.to_string()),
        }
    }
}
