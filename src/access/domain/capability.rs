//! Per-user capability grants beyond baseline role rank.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A grant permitting an action beyond what role rank alone allows.
///
/// The list is closed: authorization logic is expressed as set containment
/// over these variants, so adding a capability is a data change rather than
/// a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May create tasks regardless of role rank.
    CreateTasks,
    /// May create receives and set their disposition.
    ManageReceives,
    /// May acknowledge or reject completed tasks.
    ApproveCompletions,
    /// May revert closed tasks back into progress.
    RevertCompletions,
}

impl Capability {
    /// All capabilities in declaration order.
    pub const ALL: [Self; 4] = [
        Self::CreateTasks,
        Self::ManageReceives,
        Self::ApproveCompletions,
        Self::RevertCompletions,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::CreateTasks => 1,
            Self::ManageReceives => 1 << 1,
            Self::ApproveCompletions => 1 << 2,
            Self::RevertCompletions => 1 << 3,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateTasks => "create_tasks",
            Self::ManageReceives => "manage_receives",
            Self::ApproveCompletions => "approve_completions",
            Self::RevertCompletions => "revert_completions",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of capability grants held by one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    /// Creates an empty capability set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns a copy of this set with the capability granted.
    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    /// Grants a capability in place.
    pub const fn grant(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    /// Revokes a capability in place.
    pub const fn revoke(&mut self, capability: Capability) {
        self.0 &= !capability.bit();
    }

    /// Returns whether the capability is granted.
    #[must_use]
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Returns whether no capabilities are granted.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = Self::empty();
        for capability in iter {
            set.grant(capability);
        }
        set
    }
}
