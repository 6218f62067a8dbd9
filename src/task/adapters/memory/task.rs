//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::access::domain::UserId;
use crate::receive::domain::ReceiveId;
use crate::task::{
    domain::{Task, TaskAction, TaskHistoryEntry, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// The write lock spans every check-and-write pair, which gives the same
/// atomicity the transactional adapter provides.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    actions: HashMap<TaskId, Vec<TaskAction>>,
    history: HashMap<TaskId, Vec<TaskHistoryEntry>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted_by_record_number(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(|task| task.record_number().value());
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task, action: &TaskAction) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        state
            .actions
            .entry(task.id())
            .or_default()
            .push(action.clone());
        Ok(())
    }

    async fn apply_transition(
        &self,
        task: &Task,
        expected_status: TaskStatus,
        actions: &[TaskAction],
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        let stored_status = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .status();
        if stored_status != expected_status {
            return Err(TaskRepositoryError::StatusConflict {
                task_id: task.id(),
                expected: expected_status,
                actual: stored_status,
            });
        }

        state.tasks.insert(task.id(), task.clone());
        state
            .actions
            .entry(task.id())
            .or_default()
            .extend(actions.iter().cloned());
        Ok(())
    }

    async fn record_edit(
        &self,
        task: &Task,
        action: &TaskAction,
        history: &[TaskHistoryEntry],
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        state
            .actions
            .entry(task.id())
            .or_default()
            .push(action.clone());
        state
            .history
            .entry(task.id())
            .or_default()
            .extend(history.iter().cloned());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| task.assigned_to() == Some(user_id))
            .cloned()
            .collect();
        Ok(sorted_by_record_number(tasks))
    }

    async fn list_by_receive(&self, receive_id: ReceiveId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| task.receive_id() == Some(receive_id))
            .cloned()
            .collect();
        Ok(sorted_by_record_number(tasks))
    }

    async fn count_by_receive(&self, receive_id: ReceiveId) -> TaskRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        let count = state
            .tasks
            .values()
            .filter(|task| task.receive_id() == Some(receive_id))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn actions(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskAction>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.actions.get(&task_id).cloned().unwrap_or_default())
    }

    async fn history(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.history.get(&task_id).cloned().unwrap_or_default())
    }
}
