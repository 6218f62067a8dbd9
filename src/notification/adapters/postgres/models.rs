//! Diesel row models for notification persistence.

use super::schema::notifications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for notification records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Recipient user identifier.
    pub user_id: uuid::Uuid,
    /// Referenced task, if any.
    pub task_id: Option<uuid::Uuid>,
    /// Notification category.
    pub kind: String,
    /// Message text.
    pub message: String,
    /// Read flag.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for notification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Recipient user identifier.
    pub user_id: uuid::Uuid,
    /// Referenced task, if any.
    pub task_id: Option<uuid::Uuid>,
    /// Notification category.
    pub kind: String,
    /// Message text.
    pub message: String,
    /// Read flag.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
