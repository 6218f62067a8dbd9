//! Task lifecycle orchestration: creation, transitions, and field edits.

use crate::access::domain::{AccessDenied, Actor, UserId};
use crate::notification::{
    domain::NotificationKind, ports::NotificationRepository,
    services::NotificationDispatcherService,
};
use crate::receive::domain::ReceiveId;
use crate::sequence::{
    domain::SequenceDomain,
    ports::SequenceCounterStore,
    services::{SequenceIssueError, SequenceIssuerService},
};
use crate::task::{
    domain::{
        ActionKind, ComplexityId, PriorityId, Task, TaskAction, TaskDomainError, TaskDraft,
        TaskEdits, TaskEvent, TaskHistoryEntry, TaskId, WorkcenterId,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority_id: Option<PriorityId>,
    complexity_id: Option<ComplexityId>,
    workcenter_id: Option<WorkcenterId>,
    receive_id: Option<ReceiveId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority_id: None,
            complexity_id: None,
            workcenter_id: None,
            receive_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority reference.
    #[must_use]
    pub const fn with_priority(mut self, priority_id: PriorityId) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    /// Sets the complexity reference.
    #[must_use]
    pub const fn with_complexity(mut self, complexity_id: ComplexityId) -> Self {
        self.complexity_id = Some(complexity_id);
        self
    }

    /// Sets the workcenter reference.
    #[must_use]
    pub const fn with_workcenter(mut self, workcenter_id: WorkcenterId) -> Self {
        self.workcenter_id = Some(workcenter_id);
        self
    }

    /// Links the task to the originating receive.
    #[must_use]
    pub const fn with_receive(mut self, receive_id: ReceiveId) -> Self {
        self.receive_id = Some(receive_id);
        self
    }

    fn into_draft(self) -> Result<TaskDraft, TaskDomainError> {
        let mut draft = TaskDraft::new(self.title)?;
        if let Some(description) = self.description {
            draft = draft.with_description(description);
        }
        if let Some(priority_id) = self.priority_id {
            draft = draft.with_priority(priority_id);
        }
        if let Some(complexity_id) = self.complexity_id {
            draft = draft.with_complexity(complexity_id);
        }
        if let Some(workcenter_id) = self.workcenter_id {
            draft = draft.with_workcenter(workcenter_id);
        }
        if let Some(receive_id) = self.receive_id {
            draft = draft.with_receive(receive_id);
        }
        Ok(draft)
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or guard failure.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Reference-number issuing failed.
    #[error(transparent)]
    Sequence(#[from] SequenceIssueError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, S, N, C>
where
    R: TaskRepository,
    S: SequenceCounterStore,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    sequences: SequenceIssuerService<S>,
    notifications: NotificationDispatcherService<N, C>,
    clock: Arc<C>,
}

impl<R, S, N, C> TaskLifecycleService<R, S, N, C>
where
    R: TaskRepository,
    S: SequenceCounterStore,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        sequences: SequenceIssuerService<S>,
        notifications: NotificationDispatcherService<N, C>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            sequences,
            notifications,
            clock,
        }
    }

    /// Creates a task in `Active` status with a freshly issued record
    /// number and a `Created` action.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the actor may not create tasks,
    /// the title fails validation, issuing fails, or persistence rejects
    /// the write.
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let draft = request.into_draft().map_err(TaskLifecycleError::Domain)?;
        // Guard before issuing, so a denied caller consumes no sequence value.
        AccessDenied::require(actor.can_create_tasks()).map_err(TaskDomainError::from)?;

        let record_number = self.sequences.issue_reference(SequenceDomain::Task).await?;
        let task = Task::create(actor, record_number, draft, &*self.clock)?;
        let action = TaskAction::record(
            task.id(),
            ActionKind::Created,
            actor.user_id(),
            None,
            &*self.clock,
        );
        self.repository.create(&task, &action).await?;
        tracing::debug!(task_id = %task.id(), record = %task.record_number(), "task created");
        Ok(task)
    }

    /// Applies a lifecycle event and appends its action records.
    ///
    /// The transition and its actions are persisted as one atomic unit,
    /// conditional on the status observed here; a concurrent transition
    /// surfaces as [`TaskRepositoryError::StatusConflict`]. The follow-up
    /// notification is decoupled: a failed dispatch is logged and does not
    /// undo the committed transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task is missing, the guard
    /// rejects the actor, the event is illegal from the current status, or
    /// persistence fails.
    pub async fn transition(
        &self,
        task_id: TaskId,
        event: TaskEvent,
        actor: &Actor,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_by_id_or_error(task_id).await?;
        let expected_status = task.status();
        let outcome = task.apply(&event, actor, &*self.clock)?;

        let actions: Vec<TaskAction> = outcome
            .actions
            .iter()
            .map(|kind| {
                TaskAction::record(
                    task.id(),
                    *kind,
                    actor.user_id(),
                    event.assignee(),
                    &*self.clock,
                )
            })
            .collect();
        self.repository
            .apply_transition(&task, expected_status, &actions)
            .await?;
        tracing::debug!(task_id = %task.id(), status = %task.status(), "task transition applied");

        if let Some(note) = outcome.notify {
            let message = notification_message(&task, note.kind);
            if let Err(err) = self
                .notifications
                .dispatch(note.recipient, Some(task.id()), note.kind, message)
                .await
            {
                tracing::warn!(
                    task_id = %task.id(),
                    recipient = %note.recipient,
                    error = %err,
                    "notification dispatch failed after committed transition"
                );
            }
        }
        Ok(task)
    }

    /// Edits non-status fields, appending an `Edited` action and one
    /// history entry per changed field.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task is missing, the actor
    /// is below the edit ceiling, the request changes nothing, or
    /// persistence fails.
    pub async fn edit_fields(
        &self,
        task_id: TaskId,
        actor: &Actor,
        edits: TaskEdits,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_by_id_or_error(task_id).await?;
        let changes = task.apply_edit(actor, edits, &*self.clock)?;

        let action = TaskAction::record(
            task.id(),
            ActionKind::Edited,
            actor.user_id(),
            None,
            &*self.clock,
        );
        let history: Vec<TaskHistoryEntry> = changes
            .into_iter()
            .map(|change| {
                TaskHistoryEntry::record(
                    task.id(),
                    change.field,
                    change.old_value,
                    change.new_value,
                    actor.user_id(),
                    &*self.clock,
                )
            })
            .collect();
        self.repository.record_edit(&task, &action, &history).await?;
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// Returns `Ok(None)` when no task has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Returns the task's lifecycle actions in recorded order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn actions(&self, task_id: TaskId) -> TaskLifecycleResult<Vec<TaskAction>> {
        Ok(self.repository.actions(task_id).await?)
    }

    /// Returns the task's field-history entries in recorded order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn history(&self, task_id: TaskId) -> TaskLifecycleResult<Vec<TaskHistoryEntry>> {
        Ok(self.repository.history(task_id).await?)
    }

    /// Returns the tasks currently assigned to the user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_assignee(&self, user_id: UserId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_by_assignee(user_id).await?)
    }

    /// Returns the tasks originating from the receive.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_receive(&self, receive_id: ReceiveId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_by_receive(receive_id).await?)
    }

    async fn find_by_id_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }
}

/// Renders the recipient-facing message for a dispatched notification.
fn notification_message(task: &Task, kind: NotificationKind) -> String {
    let record = task.record_number();
    match kind {
        NotificationKind::TaskAssigned => format!("Task {record} has been assigned to you"),
        NotificationKind::TaskForwarded => format!("Task {record} has been forwarded to you"),
        NotificationKind::TaskSubmitted => {
            format!("Task {record} has been submitted for completion")
        }
        NotificationKind::TaskRejected => {
            format!("Task {record} was rejected and returned to you")
        }
        NotificationKind::TaskClosed => format!("Task {record} was acknowledged and closed"),
        NotificationKind::TaskReverted => {
            format!("Task {record} was reverted and returned to you")
        }
    }
}
