use super::{ActorRole, AuthError, Capability};
use crate::common::entity_ids::MemberId;

/// Entry point for authorization checks
///
/// Usage:
/// ```
/// # use classroom_core::common::auth::{Actor, ActorRole, Capability};
/// # use classroom_core::common::MemberId;
/// # fn run(actor_id: MemberId, role: ActorRole) -> Result<(), classroom_core::common::AuthError> {
/// Actor::new(actor_id, role)
///     .can(Capability::DecideAbsences)
///     .check()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    actor_id: MemberId,
    role: ActorRole,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `actor_id` - The member id of the actor
    /// * `role` - Role from the verified token claims
    pub fn new(actor_id: MemberId, role: ActorRole) -> Self {
        Self { actor_id, role }
    }

    pub fn id(&self) -> MemberId {
        self.actor_id
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor: Actor,
    capability: Capability,
}

impl CapabilityBuilder {
    /// Perform the authorization check, returning the actor on success
    pub fn check(self) -> Result<Actor, AuthError> {
        check_permission(self.actor, self.capability)
    }
}

/// Core permission check function
///
/// The role comes from a signed token that was verified by the JWT
/// middleware, so it is trusted as-is. The id must still look like a
/// store-assigned key.
fn check_permission(actor: Actor, capability: Capability) -> Result<Actor, AuthError> {
    if !actor.actor_id.is_valid() {
        return Err(AuthError::InvalidActor);
    }

    if capability.requires_approver() && actor.role != ActorRole::Approver {
        return Err(AuthError::ApproverRequired);
    }

    Ok(actor)
}
