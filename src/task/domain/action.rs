//! Append-only lifecycle action log entries.

use super::{ParseActionKindError, TaskActionId, TaskId};
use crate::access::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a recorded lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Task was created.
    Created,
    /// Task was assigned to a user.
    Assigned,
    /// Task was forwarded to another user.
    Forwarded,
    /// Assignee submitted the task as complete.
    Submitted,
    /// Completion was acknowledged.
    Acknowledged,
    /// Task was closed.
    Closed,
    /// Closed task was reverted into progress.
    Reverted,
    /// Submitted completion was rejected.
    Rejected,
    /// Non-status fields were edited.
    Edited,
}

impl ActionKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Assigned => "assigned",
            Self::Forwarded => "forwarded",
            Self::Submitted => "submitted",
            Self::Acknowledged => "acknowledged",
            Self::Closed => "closed",
            Self::Reverted => "reverted",
            Self::Rejected => "rejected",
            Self::Edited => "edited",
        }
    }
}

impl TryFrom<&str> for ActionKind {
    type Error = ParseActionKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "assigned" => Ok(Self::Assigned),
            "forwarded" => Ok(Self::Forwarded),
            "submitted" => Ok(Self::Submitted),
            "acknowledged" => Ok(Self::Acknowledged),
            "closed" => Ok(Self::Closed),
            "reverted" => Ok(Self::Reverted),
            "rejected" => Ok(Self::Rejected),
            "edited" => Ok(Self::Edited),
            _ => Err(ParseActionKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable lifecycle event on a task: the canonical audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAction {
    id: TaskActionId,
    task_id: TaskId,
    kind: ActionKind,
    actor_id: UserId,
    target_id: Option<UserId>,
    recorded_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskActionData {
    /// Persisted action identifier.
    pub id: TaskActionId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted action category.
    pub kind: ActionKind,
    /// Persisted acting user.
    pub actor_id: UserId,
    /// Persisted forwarding or assignment target, if any.
    pub target_id: Option<UserId>,
    /// Persisted event timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl TaskAction {
    /// Records a new lifecycle event.
    #[must_use]
    pub fn record(
        task_id: TaskId,
        kind: ActionKind,
        actor_id: UserId,
        target_id: Option<UserId>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskActionId::new(),
            task_id,
            kind,
            actor_id,
            target_id,
            recorded_at: clock.utc(),
        }
    }

    /// Reconstructs an action from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskActionData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            kind: data.kind,
            actor_id: data.actor_id,
            target_id: data.target_id,
            recorded_at: data.recorded_at,
        }
    }

    /// Returns the action identifier.
    #[must_use]
    pub const fn id(&self) -> TaskActionId {
        self.id
    }

    /// Returns the task this action belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the action category.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn actor_id(&self) -> UserId {
        self.actor_id
    }

    /// Returns the forwarding or assignment target, if any.
    #[must_use]
    pub const fn target_id(&self) -> Option<UserId> {
        self.target_id
    }

    /// Returns the event timestamp.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
