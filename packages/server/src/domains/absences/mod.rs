//! Absences domain - report an absence against a session, then approve or
//! reject it exactly once

pub mod actions;
pub mod data;
pub mod errors;
pub mod events;
pub mod models;

pub use actions::AbsenceOutcome;
pub use data::{Decision, DecisionResponse};
pub use errors::AbsenceError;
pub use events::{AbsenceAuditEvent, AuditAction};
pub use models::{AbsenceRequest, AbsenceStatus, Group, NewAbsence, Session};
