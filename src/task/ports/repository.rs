//! Repository port for task persistence, transitions, and audit logs.

use crate::access::domain::UserId;
use crate::receive::domain::ReceiveId;
use crate::task::domain::{Task, TaskAction, TaskHistoryEntry, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Writes that pair a task mutation with log appends are atomic: either the
/// status and its actions land together, or neither does.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task together with its creation action, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn create(&self, task: &Task, action: &TaskAction) -> TaskRepositoryResult<()>;

    /// Applies a transition conditionally: persists the task's new state
    /// and appends `actions` only if the stored status still equals
    /// `expected_status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::StatusConflict`] when the stored
    /// status has already moved — the entity is left unchanged.
    async fn apply_transition(
        &self,
        task: &Task,
        expected_status: TaskStatus,
        actions: &[TaskAction],
    ) -> TaskRepositoryResult<()>;

    /// Persists edited non-status fields together with the edit action and
    /// its field-level history entries, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn record_edit(
        &self,
        task: &Task,
        action: &TaskAction,
        history: &[TaskHistoryEntry],
    ) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks currently assigned to the user, ordered by record
    /// number.
    async fn list_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks originating from the receive, ordered by record
    /// number.
    async fn list_by_receive(&self, receive_id: ReceiveId) -> TaskRepositoryResult<Vec<Task>>;

    /// Counts tasks originating from the receive.
    async fn count_by_receive(&self, receive_id: ReceiveId) -> TaskRepositoryResult<u64>;

    /// Returns the task's lifecycle actions in recorded order.
    async fn actions(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskAction>>;

    /// Returns the task's field-history entries in recorded order.
    async fn history(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored status no longer matches the expected prior status.
    #[error("task {task_id} status is {actual}, expected {expected}")]
    StatusConflict {
        /// The task whose transition was rejected.
        task_id: TaskId,
        /// The status the caller observed before the transition.
        expected: TaskStatus,
        /// The status actually stored.
        actual: TaskStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
