//! Receive aggregate root and its derived status.

use super::{ParseReceiveDispositionError, ReceiveDomainError, ReceiveId};
use crate::access::domain::{AccessDenied, Actor, UserId};
use crate::sequence::domain::ReferenceNumber;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored disposition of a receive. `Assigned` is never stored; see
/// [`Receive::effective_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiveDisposition {
    /// Intake record is open.
    Open,
    /// Intake record has been closed out.
    Closed,
}

impl ReceiveDisposition {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl TryFrom<&str> for ReceiveDisposition {
    type Error = ParseReceiveDispositionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseReceiveDispositionError(value.to_owned())),
        }
    }
}

impl fmt::Display for ReceiveDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective status of a receive: the stored disposition plus the derived
/// `Assigned` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiveStatus {
    /// Open with no linked tasks.
    Open,
    /// Open with at least one linked task.
    Assigned,
    /// Closed out.
    Closed,
}

impl ReceiveStatus {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ReceiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receive aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receive {
    id: ReceiveId,
    reference_number: ReferenceNumber,
    disposition: ReceiveDisposition,
    created_by: UserId,
    closed_by: Option<UserId>,
    closed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted receive aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReceiveData {
    /// Persisted receive identifier.
    pub id: ReceiveId,
    /// Persisted reference number.
    pub reference_number: ReferenceNumber,
    /// Persisted disposition.
    pub disposition: ReceiveDisposition,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted closing user, if closed.
    pub closed_by: Option<UserId>,
    /// Persisted closing timestamp, if closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Receive {
    /// Creates a new open receive.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveDomainError::Denied`] when the actor may not manage
    /// receives.
    pub fn create(
        actor: &Actor,
        reference_number: ReferenceNumber,
        clock: &impl Clock,
    ) -> Result<Self, ReceiveDomainError> {
        AccessDenied::require(actor.can_manage_receives())?;
        let timestamp = clock.utc();
        Ok(Self {
            id: ReceiveId::new(),
            reference_number,
            disposition: ReceiveDisposition::Open,
            created_by: actor.user_id(),
            closed_by: None,
            closed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a receive from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReceiveData) -> Self {
        Self {
            id: data.id,
            reference_number: data.reference_number,
            disposition: data.disposition,
            created_by: data.created_by,
            closed_by: data.closed_by,
            closed_at: data.closed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the receive identifier.
    #[must_use]
    pub const fn id(&self) -> ReceiveId {
        self.id
    }

    /// Returns the reference number.
    #[must_use]
    pub const fn reference_number(&self) -> ReferenceNumber {
        self.reference_number
    }

    /// Returns the stored disposition.
    #[must_use]
    pub const fn disposition(&self) -> ReceiveDisposition {
        self.disposition
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the closing user, set iff the receive is closed.
    #[must_use]
    pub const fn closed_by(&self) -> Option<UserId> {
        self.closed_by
    }

    /// Returns the closing timestamp, set iff the receive is closed.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Computes the effective status from the linked-task count.
    #[must_use]
    pub const fn effective_status(&self, linked_tasks: u64) -> ReceiveStatus {
        match self.disposition {
            ReceiveDisposition::Closed => ReceiveStatus::Closed,
            ReceiveDisposition::Open if linked_tasks > 0 => ReceiveStatus::Assigned,
            ReceiveDisposition::Open => ReceiveStatus::Open,
        }
    }

    /// Sets the stored disposition.
    ///
    /// Closing stamps `closed_by` and `closed_at` together; any other
    /// disposition clears both in the same write. Reopening a closed
    /// receive is permitted under the same guard.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveDomainError::Denied`] when the actor may not manage
    /// receives.
    pub fn set_disposition(
        &mut self,
        actor: &Actor,
        disposition: ReceiveDisposition,
        clock: &impl Clock,
    ) -> Result<(), ReceiveDomainError> {
        AccessDenied::require(actor.can_manage_receives())?;
        let timestamp = clock.utc();
        self.disposition = disposition;
        match disposition {
            ReceiveDisposition::Closed => {
                self.closed_by = Some(actor.user_id());
                self.closed_at = Some(timestamp);
            }
            ReceiveDisposition::Open => {
                self.closed_by = None;
                self.closed_at = None;
            }
        }
        self.updated_at = timestamp;
        Ok(())
    }
}
