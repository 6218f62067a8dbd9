//! Notification aggregate.

use super::{NotificationId, NotificationKind};
use crate::access::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A single notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    user_id: UserId,
    task_id: Option<TaskId>,
    kind: NotificationKind,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted notification identifier.
    pub id: NotificationId,
    /// Persisted recipient.
    pub user_id: UserId,
    /// Persisted task reference, if any.
    pub task_id: Option<TaskId>,
    /// Persisted category.
    pub kind: NotificationKind,
    /// Persisted message text.
    pub message: String,
    /// Persisted read flag.
    pub read: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates a new unread notification.
    #[must_use]
    pub fn new(
        user_id: UserId,
        task_id: Option<TaskId>,
        kind: NotificationKind,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            task_id,
            kind,
            message: message.into(),
            read: false,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            task_id: data.task_id,
            kind: data.kind,
            message: data.message,
            read: data.read,
            created_at: data.created_at,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the referenced task, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the notification category.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether the recipient has read the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sets the read flag. Recipient-only enforcement happens at the
    /// service layer.
    pub const fn set_read(&mut self, read: bool) {
        self.read = read;
    }
}
