//! Append-only field-level edit history.

use super::{ParseTaskFieldError, TaskHistoryId, TaskId};
use crate::access::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editable non-status task field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Task title.
    Title,
    /// Task description.
    Description,
    /// Priority reference.
    Priority,
    /// Complexity reference.
    Complexity,
    /// Workcenter reference.
    Workcenter,
}

impl TaskField {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Priority => "priority",
            Self::Complexity => "complexity",
            Self::Workcenter => "workcenter",
        }
    }
}

impl TryFrom<&str> for TaskField {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "priority" => Ok(Self::Priority),
            "complexity" => Ok(Self::Complexity),
            "workcenter" => Ok(Self::Workcenter),
            _ => Err(ParseTaskFieldError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable field-level diff, separate from the lifecycle action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHistoryEntry {
    id: TaskHistoryId,
    task_id: TaskId,
    field: TaskField,
    old_value: Option<String>,
    new_value: Option<String>,
    actor_id: UserId,
    recorded_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskHistoryData {
    /// Persisted entry identifier.
    pub id: TaskHistoryId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted field name.
    pub field: TaskField,
    /// Persisted previous value.
    pub old_value: Option<String>,
    /// Persisted replacement value.
    pub new_value: Option<String>,
    /// Persisted acting user.
    pub actor_id: UserId,
    /// Persisted edit timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl TaskHistoryEntry {
    /// Records a new field-level diff.
    #[must_use]
    pub fn record(
        task_id: TaskId,
        field: TaskField,
        old_value: Option<String>,
        new_value: Option<String>,
        actor_id: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskHistoryId::new(),
            task_id,
            field,
            old_value,
            new_value,
            actor_id,
            recorded_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskHistoryData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            field: data.field,
            old_value: data.old_value,
            new_value: data.new_value,
            actor_id: data.actor_id,
            recorded_at: data.recorded_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> TaskHistoryId {
        self.id
    }

    /// Returns the task this entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the edited field.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        self.field
    }

    /// Returns the previous value.
    #[must_use]
    pub fn old_value(&self) -> Option<&str> {
        self.old_value.as_deref()
    }

    /// Returns the replacement value.
    #[must_use]
    pub fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn actor_id(&self) -> UserId {
        self.actor_id
    }

    /// Returns the edit timestamp.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
