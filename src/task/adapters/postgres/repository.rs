//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{
        NewTaskActionRow, NewTaskHistoryRow, NewTaskRow, TaskActionRow, TaskEditChangeset,
        TaskHistoryRow, TaskRow, TaskTransitionChangeset,
    },
    schema::{task_actions, task_history, tasks},
};
use crate::access::domain::UserId;
use crate::receive::domain::ReceiveId;
use crate::sequence::domain::{ReferenceNumber, SequenceDomain, SequenceValue};
use crate::task::{
    domain::{
        ActionKind, ComplexityId, PersistedTaskActionData, PersistedTaskData,
        PersistedTaskHistoryData, PriorityId, Task, TaskAction, TaskActionId, TaskField,
        TaskHistoryEntry, TaskHistoryId, TaskId, TaskStatus, WorkcenterId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Every mutating method wraps its writes in one transaction, so a status
/// change and its log appends land together or not at all. Transition
/// application is a conditional update keyed on the expected prior status.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: &Task, action: &TaskAction) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;
        let action_row = to_new_action_row(action);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|connection| {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                diesel::insert_into(task_actions::table)
                    .values(&action_row)
                    .execute(connection)?;
                Ok(())
            })
        })
        .await
    }

    async fn apply_transition(
        &self,
        task: &Task,
        expected_status: TaskStatus,
        actions: &[TaskAction],
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = TaskTransitionChangeset {
            status: task.status().as_str().to_owned(),
            assigned_to: Some(task.assigned_to().map(UserId::into_inner)),
            updated_at: task.updated_at(),
        };
        let action_rows: Vec<NewTaskActionRow> = actions.iter().map(to_new_action_row).collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|connection| {
                let updated = diesel::update(
                    tasks::table
                        .filter(tasks::id.eq(task_id.into_inner()))
                        .filter(tasks::status.eq(expected_status.as_str())),
                )
                .set(&changeset)
                .execute(connection)?;

                if updated == 0 {
                    return Err(transition_rejection(connection, task_id, expected_status));
                }

                diesel::insert_into(task_actions::table)
                    .values(&action_rows)
                    .execute(connection)?;
                Ok(())
            })
        })
        .await
    }

    async fn record_edit(
        &self,
        task: &Task,
        action: &TaskAction,
        history: &[TaskHistoryEntry],
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = TaskEditChangeset {
            title: task.title().to_owned(),
            description: Some(task.description().map(str::to_owned)),
            priority_id: Some(task.priority_id().map(PriorityId::into_inner)),
            complexity_id: Some(task.complexity_id().map(ComplexityId::into_inner)),
            workcenter_id: Some(task.workcenter_id().map(WorkcenterId::into_inner)),
            updated_at: task.updated_at(),
        };
        let action_row = to_new_action_row(action);
        let history_rows: Vec<NewTaskHistoryRow> = history.iter().map(to_new_history_row).collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|connection| {
                let updated =
                    diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                        .set(&changeset)
                        .execute(connection)?;
                if updated == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }

                diesel::insert_into(task_actions::table)
                    .values(&action_row)
                    .execute(connection)?;
                diesel::insert_into(task_history::table)
                    .values(&history_rows)
                    .execute(connection)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_to.eq(user_id.into_inner()))
                .order(tasks::record_number.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_receive(&self, receive_id: ReceiveId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::receive_id.eq(receive_id.into_inner()))
                .order(tasks::record_number.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_by_receive(&self, receive_id: ReceiveId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::receive_id.eq(receive_id.into_inner()))
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(u64::try_from(count).unwrap_or(0))
        })
        .await
    }

    async fn actions(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskAction>> {
        self.run_blocking(move |connection| {
            let rows = task_actions::table
                .filter(task_actions::task_id.eq(task_id.into_inner()))
                .order(task_actions::recorded_at.asc())
                .select(TaskActionRow::as_select())
                .load::<TaskActionRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_action).collect()
        })
        .await
    }

    async fn history(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_history::table
                .filter(task_history::task_id.eq(task_id.into_inner()))
                .order(task_history::recorded_at.asc())
                .select(TaskHistoryRow::as_select())
                .load::<TaskHistoryRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_history).collect()
        })
        .await
    }
}

/// Distinguishes a stale-status rejection from a missing task after a
/// conditional update touched no rows.
fn transition_rejection(
    connection: &mut PgConnection,
    task_id: TaskId,
    expected: TaskStatus,
) -> TaskRepositoryError {
    let stored: Result<Option<String>, _> = tasks::table
        .filter(tasks::id.eq(task_id.into_inner()))
        .select(tasks::status)
        .first::<String>(connection)
        .optional();

    match stored {
        Ok(Some(raw)) => match TaskStatus::try_from(raw.as_str()) {
            Ok(actual) => TaskRepositoryError::StatusConflict {
                task_id,
                expected,
                actual,
            },
            Err(err) => TaskRepositoryError::persistence(err),
        },
        Ok(None) => TaskRepositoryError::NotFound(task_id),
        Err(err) => TaskRepositoryError::persistence(err),
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let record_number = i64::try_from(task.record_number().value().value())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        record_number,
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        priority_id: task.priority_id().map(PriorityId::into_inner),
        complexity_id: task.complexity_id().map(ComplexityId::into_inner),
        workcenter_id: task.workcenter_id().map(WorkcenterId::into_inner),
        status: task.status().as_str().to_owned(),
        assigned_to: task.assigned_to().map(UserId::into_inner),
        created_by: task.created_by().into_inner(),
        receive_id: task.receive_id().map(ReceiveId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_new_action_row(action: &TaskAction) -> NewTaskActionRow {
    NewTaskActionRow {
        id: action.id().into_inner(),
        task_id: action.task_id().into_inner(),
        kind: action.kind().as_str().to_owned(),
        actor_id: action.actor_id().into_inner(),
        target_id: action.target_id().map(UserId::into_inner),
        recorded_at: action.recorded_at(),
    }
}

fn to_new_history_row(entry: &TaskHistoryEntry) -> NewTaskHistoryRow {
    NewTaskHistoryRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        field: entry.field().as_str().to_owned(),
        old_value: entry.old_value().map(str::to_owned),
        new_value: entry.new_value().map(str::to_owned),
        actor_id: entry.actor_id().into_inner(),
        recorded_at: entry.recorded_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let record_value =
        u64::try_from(row.record_number).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        record_number: ReferenceNumber::new(SequenceDomain::Task, SequenceValue::new(record_value)),
        title: row.title,
        description: row.description,
        priority_id: row.priority_id.map(PriorityId::from_uuid),
        complexity_id: row.complexity_id.map(ComplexityId::from_uuid),
        workcenter_id: row.workcenter_id.map(WorkcenterId::from_uuid),
        status,
        assigned_to: row.assigned_to.map(UserId::from_uuid),
        created_by: UserId::from_uuid(row.created_by),
        receive_id: row.receive_id.map(ReceiveId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_action(row: TaskActionRow) -> TaskRepositoryResult<TaskAction> {
    let kind = ActionKind::try_from(row.kind.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(TaskAction::from_persisted(PersistedTaskActionData {
        id: TaskActionId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        kind,
        actor_id: UserId::from_uuid(row.actor_id),
        target_id: row.target_id.map(UserId::from_uuid),
        recorded_at: row.recorded_at,
    }))
}

fn row_to_history(row: TaskHistoryRow) -> TaskRepositoryResult<TaskHistoryEntry> {
    let field = TaskField::try_from(row.field.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(TaskHistoryEntry::from_persisted(PersistedTaskHistoryData {
        id: TaskHistoryId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        field,
        old_value: row.old_value,
        new_value: row.new_value,
        actor_id: UserId::from_uuid(row.actor_id),
        recorded_at: row.recorded_at,
    }))
}
