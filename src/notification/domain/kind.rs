//! Notification categories, one per user-targeted action.

use super::ParseNotificationKindError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a notification, matching the task action that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A task was assigned to the recipient.
    TaskAssigned,
    /// A task was forwarded to the recipient.
    TaskForwarded,
    /// A task the recipient created was submitted for completion.
    TaskSubmitted,
    /// The recipient's submitted work was rejected back into progress.
    TaskRejected,
    /// A task the recipient worked was acknowledged and closed.
    TaskClosed,
    /// A closed task was reverted back to the recipient.
    TaskReverted,
}

impl NotificationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskForwarded => "task_forwarded",
            Self::TaskSubmitted => "task_submitted",
            Self::TaskRejected => "task_rejected",
            Self::TaskClosed => "task_closed",
            Self::TaskReverted => "task_reverted",
        }
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "task_assigned" => Ok(Self::TaskAssigned),
            "task_forwarded" => Ok(Self::TaskForwarded),
            "task_submitted" => Ok(Self::TaskSubmitted),
            "task_rejected" => Ok(Self::TaskRejected),
            "task_closed" => Ok(Self::TaskClosed),
            "task_reverted" => Ok(Self::TaskReverted),
            _ => Err(ParseNotificationKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
