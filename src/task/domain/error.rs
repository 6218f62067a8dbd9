//! Error types for task domain validation and parsing.

use super::{TaskEventKind, TaskId, TaskStatus};
use crate::access::domain::AccessDenied;
use thiserror::Error;

/// Errors returned while constructing or mutating task aggregates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// An authorization guard rejected the operation.
    #[error(transparent)]
    Denied(#[from] AccessDenied),

    /// The event is not legal from the task's current status.
    #[error("cannot {event} task {task_id} while {from}")]
    InvalidTransition {
        /// The task the event was requested against.
        task_id: TaskId,
        /// The task's current status.
        from: TaskStatus,
        /// The rejected event.
        event: TaskEventKind,
    },

    /// An edit request changes no fields.
    #[error("edit of task {0} changes no fields")]
    NoFieldsChanged(TaskId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing action kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task action kind: {0}")]
pub struct ParseActionKindError(pub String);

/// Error returned while parsing task field names from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task field: {0}")]
pub struct ParseTaskFieldError(pub String);
