use thiserror::Error;

/// Authorization errors raised at the request boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Approver role required")]
    ApproverRequired,

    #[error("Invalid actor id")]
    InvalidActor,
}
