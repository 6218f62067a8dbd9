//! Diesel row models for task persistence.

use super::schema::{task_actions, task_history, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Record number.
    pub record_number: i64,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional priority reference.
    pub priority_id: Option<uuid::Uuid>,
    /// Optional complexity reference.
    pub complexity_id: Option<uuid::Uuid>,
    /// Optional workcenter reference.
    pub workcenter_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    pub status: String,
    /// Current assignee, if any.
    pub assigned_to: Option<uuid::Uuid>,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Originating receive, if any.
    pub receive_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Record number.
    pub record_number: i64,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional priority reference.
    pub priority_id: Option<uuid::Uuid>,
    /// Optional complexity reference.
    pub complexity_id: Option<uuid::Uuid>,
    /// Optional workcenter reference.
    pub workcenter_id: Option<uuid::Uuid>,
    /// Lifecycle status.
    pub status: String,
    /// Current assignee, if any.
    pub assigned_to: Option<uuid::Uuid>,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Originating receive, if any.
    pub receive_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the columns a transition may touch.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskTransitionChangeset {
    /// New lifecycle status.
    pub status: String,
    /// New assignee, if any.
    pub assigned_to: Option<Option<uuid::Uuid>>,
    /// New lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the columns an edit may touch.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskEditChangeset {
    /// New title.
    pub title: String,
    /// New description.
    pub description: Option<Option<String>>,
    /// New priority reference.
    pub priority_id: Option<Option<uuid::Uuid>>,
    /// New complexity reference.
    pub complexity_id: Option<Option<uuid::Uuid>>,
    /// New workcenter reference.
    pub workcenter_id: Option<Option<uuid::Uuid>>,
    /// New lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for lifecycle actions.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_actions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskActionRow {
    /// Action identifier.
    pub id: uuid::Uuid,
    /// Task reference.
    pub task_id: uuid::Uuid,
    /// Action category.
    pub kind: String,
    /// Acting user.
    pub actor_id: uuid::Uuid,
    /// Forwarding or assignment target, if any.
    pub target_id: Option<uuid::Uuid>,
    /// Event timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Insert model for lifecycle actions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_actions)]
pub struct NewTaskActionRow {
    /// Action identifier.
    pub id: uuid::Uuid,
    /// Task reference.
    pub task_id: uuid::Uuid,
    /// Action category.
    pub kind: String,
    /// Acting user.
    pub actor_id: uuid::Uuid,
    /// Forwarding or assignment target, if any.
    pub target_id: Option<uuid::Uuid>,
    /// Event timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Query result row for field-history entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskHistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task reference.
    pub task_id: uuid::Uuid,
    /// Edited field name.
    pub field: String,
    /// Previous value.
    pub old_value: Option<String>,
    /// Replacement value.
    pub new_value: Option<String>,
    /// Acting user.
    pub actor_id: uuid::Uuid,
    /// Edit timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Insert model for field-history entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_history)]
pub struct NewTaskHistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task reference.
    pub task_id: uuid::Uuid,
    /// Edited field name.
    pub field: String,
    /// Previous value.
    pub old_value: Option<String>,
    /// Replacement value.
    pub new_value: Option<String>,
    /// Acting user.
    pub actor_id: uuid::Uuid,
    /// Edit timestamp.
    pub recorded_at: DateTime<Utc>,
}
