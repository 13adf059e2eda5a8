/// Authorization checks for the absence workflow
///
/// Provides a fluent API used by the HTTP boundary before an engine
/// operation is invoked:
///
/// ```rust
/// use classroom_core::common::auth::{Actor, ActorRole, Capability};
/// use classroom_core::common::MemberId;
///
/// let actor = Actor::new(MemberId::from_i64(9), ActorRole::Approver);
/// assert!(actor.can(Capability::DecideAbsences).check().is_ok());
/// ```
mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::{ActorRole, Capability};
pub use errors::AuthError;
