//! Resolved caller identity and its policy checks.

use super::{Capability, CapabilitySet, Role, UserId};

/// A caller whose identity the identity collaborator has already resolved.
///
/// The engine trusts the `(user_id, role, capabilities)` triple
/// unconditionally; credential verification happens upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    user_id: UserId,
    role: Role,
    capabilities: CapabilitySet,
}

impl Actor {
    /// Creates an actor from a resolved identity.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role, capabilities: CapabilitySet) -> Self {
        Self {
            user_id,
            role,
            capabilities,
        }
    }

    /// Returns the actor's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the actor's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the actor's capability grants.
    #[must_use]
    pub const fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    /// Returns whether the actor may create tasks.
    ///
    /// The explicit grant and the Manager rank floor are alternatives.
    #[must_use]
    pub const fn can_create_tasks(&self) -> bool {
        self.capabilities.contains(Capability::CreateTasks)
            || self.role.has_permission(Role::Manager)
    }

    /// Returns whether the actor may create receives and set their
    /// disposition.
    #[must_use]
    pub const fn can_manage_receives(&self) -> bool {
        matches!(self.role, Role::Superadmin)
            || self.capabilities.contains(Capability::ManageReceives)
    }

    /// Returns whether the actor may acknowledge or reject a completed
    /// task. Superadmin is an unconditional override; every other role
    /// needs the explicit grant.
    #[must_use]
    pub const fn can_acknowledge_task(&self) -> bool {
        matches!(self.role, Role::Superadmin)
            || self.capabilities.contains(Capability::ApproveCompletions)
    }

    /// Returns whether the actor may revert a closed task. Same override
    /// pattern as [`Actor::can_acknowledge_task`].
    #[must_use]
    pub const fn can_revert_task(&self) -> bool {
        matches!(self.role, Role::Superadmin)
            || self.capabilities.contains(Capability::RevertCompletions)
    }

    /// Returns whether the actor's rank reaches the Manager floor used by
    /// the assign and forward guards.
    #[must_use]
    pub const fn manages_tasks(&self) -> bool {
        self.role.has_permission(Role::Manager)
    }
}
