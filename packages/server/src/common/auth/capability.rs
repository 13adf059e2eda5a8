use serde::{Deserialize, Serialize};

/// Role carried in the actor's token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Class member: may report and view absences
    Member,

    /// May additionally approve or reject absence requests
    Approver,
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorRole::Member => write!(f, "member"),
            ActorRole::Approver => write!(f, "approver"),
        }
    }
}

/// Capabilities guarded at the request boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Report an absence against a session
    SubmitAbsences,

    /// List or read absence requests
    ViewAbsences,

    /// Approve or reject a pending absence request
    DecideAbsences,
}

impl Capability {
    /// Check if this capability requires the approver role
    pub fn requires_approver(&self) -> bool {
        matches!(self, Capability::DecideAbsences)
    }
}
