//! The six-level role hierarchy and its rank-based policy checks.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organizational role, ordered by authority rank.
///
/// Roles form a strict total order; every rank comparison goes through
/// [`Role::rank`] rather than lexical comparison of identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Lowest rank; carries out assigned work.
    Employee,
    /// Supervises employees within a workcenter.
    Incharge,
    /// Creates and routes work for a workcenter.
    Manager,
    /// Deputy head of the organization.
    DeputyDirector,
    /// Head of the organization.
    Director,
    /// Unconditional administrative authority.
    Superadmin,
}

impl Role {
    /// All roles, lowest rank first.
    pub const ALL: [Self; 6] = [
        Self::Employee,
        Self::Incharge,
        Self::Manager,
        Self::DeputyDirector,
        Self::Director,
        Self::Superadmin,
    ];

    /// Returns the authority rank, 1 (lowest) through 6 (highest).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Employee => 1,
            Self::Incharge => 2,
            Self::Manager => 3,
            Self::DeputyDirector => 4,
            Self::Director => 5,
            Self::Superadmin => 6,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Incharge => "incharge",
            Self::Manager => "manager",
            Self::DeputyDirector => "deputy_director",
            Self::Director => "director",
            Self::Superadmin => "superadmin",
        }
    }

    /// Returns whether this role meets or exceeds the required role's rank.
    #[must_use]
    pub const fn has_permission(self, required: Self) -> bool {
        self.rank() >= required.rank()
    }

    /// Returns whether this role may close a task.
    ///
    /// Hardcoded ceiling, independent of capability grants.
    #[must_use]
    pub const fn can_close_task(self) -> bool {
        matches!(self, Self::Superadmin | Self::Director)
    }

    /// Returns whether this role may edit task fields.
    ///
    /// Same ceiling as [`Role::can_close_task`].
    #[must_use]
    pub const fn can_edit_task(self) -> bool {
        matches!(self, Self::Superadmin | Self::Director)
    }

    /// Returns whether this role may access database administration.
    #[must_use]
    pub const fn can_access_database(self) -> bool {
        matches!(self, Self::Superadmin)
    }

    /// Returns whether this role may manage user accounts.
    #[must_use]
    pub const fn can_manage_users(self) -> bool {
        matches!(self, Self::Superadmin)
    }

    /// Returns the roles visible to this role: peers and subordinates,
    /// never superiors.
    #[must_use]
    pub fn visible_roles(self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|role| role.rank() <= self.rank())
            .collect()
    }

    /// Returns the roles this role may create accounts for: strictly
    /// subordinate ranks only, so an administrator can never mint a peer or
    /// superior account.
    #[must_use]
    pub fn assignable_roles(self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|role| role.rank() < self.rank())
            .collect()
    }

    /// Returns whether this role may modify the target role's account.
    ///
    /// Strictly greater rank is required; equal ranks may not modify each
    /// other, Superadmin-to-Superadmin included.
    #[must_use]
    pub const fn can_modify_user_role(self, target: Self) -> bool {
        self.rank() > target.rank()
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "employee" => Ok(Self::Employee),
            "incharge" => Ok(Self::Incharge),
            "manager" => Ok(Self::Manager),
            "deputy_director" => Ok(Self::DeputyDirector),
            "director" => Ok(Self::Director),
            "superadmin" => Ok(Self::Superadmin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
