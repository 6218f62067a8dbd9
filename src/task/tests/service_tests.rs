//! Service orchestration tests for the task lifecycle over the in-memory
//! adapters.

use crate::access::domain::{Actor, Capability, CapabilitySet, Role, UserId};
use crate::notification::{
    adapters::memory::InMemoryNotificationRepository,
    domain::NotificationKind,
    ports::{NotificationFilter, NotificationRepository},
    services::NotificationDispatcherService,
};
use crate::sequence::{adapters::memory::InMemorySequenceStore, services::SequenceIssuerService};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{ActionKind, TaskEvent, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemorySequenceStore,
    InMemoryNotificationRepository,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
    notifications: Arc<InMemoryNotificationRepository>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let clock = Arc::new(DefaultClock);
    let service = TaskLifecycleService::new(
        Arc::clone(&tasks),
        SequenceIssuerService::new(Arc::new(InMemorySequenceStore::new())),
        NotificationDispatcherService::new(Arc::clone(&notifications), Arc::clone(&clock)),
        clock,
    );
    Harness {
        service,
        tasks,
        notifications,
    }
}

fn manager_with_create() -> Actor {
    Actor::new(
        UserId::new(),
        Role::Manager,
        CapabilitySet::empty().with(Capability::CreateTasks),
    )
}

fn employee() -> Actor {
    Actor::new(UserId::new(), Role::Employee, CapabilitySet::empty())
}

fn director_approver() -> Actor {
    Actor::new(
        UserId::new(),
        Role::Director,
        CapabilitySet::empty().with(Capability::ApproveCompletions),
    )
}

fn superadmin() -> Actor {
    Actor::new(UserId::new(), Role::Superadmin, CapabilitySet::empty())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_issues_record_number_and_logs_created(harness: Harness) -> eyre::Result<()> {
    let creator = manager_with_create();
    let task = harness
        .service
        .create(&creator, CreateTaskRequest::new("Compile inspection report"))
        .await?;

    assert_eq!(task.status(), TaskStatus::Active);
    assert_eq!(task.record_number().to_string(), "TASK-000001");

    let actions = harness.service.actions(task.id()).await?;
    assert_eq!(actions.len(), 1);
    let created = actions
        .first()
        .ok_or_else(|| eyre::eyre!("missing created action"))?;
    assert_eq!(created.kind(), ActionKind::Created);
    assert_eq!(created.actor_id(), creator.user_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_authority_issues_no_record_number(harness: Harness) -> eyre::Result<()> {
    let denied = harness
        .service
        .create(&employee(), CreateTaskRequest::new("Not allowed"))
        .await;
    assert!(matches!(denied, Err(TaskLifecycleError::Domain(_))));

    // The next authorised create still gets the first value.
    let task = harness
        .service
        .create(&manager_with_create(), CreateTaskRequest::new("Allowed"))
        .await?;
    assert_eq!(task.record_number().value().value(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assign_notifies_the_assignee(harness: Harness) -> eyre::Result<()> {
    let creator = manager_with_create();
    let worker = employee();
    let task = harness
        .service
        .create(&creator, CreateTaskRequest::new("Survey the east wing"))
        .await?;

    let task = harness
        .service
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: worker.user_id(),
            },
            &creator,
        )
        .await?;

    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.assigned_to(), Some(worker.user_id()));

    let actions = harness.service.actions(task.id()).await?;
    assert_eq!(actions.len(), 2);
    assert!(
        actions
            .iter()
            .any(|action| action.kind() == ActionKind::Assigned
                && action.target_id() == Some(worker.user_id()))
    );

    let inbox = harness
        .notifications
        .list_for_user(worker.user_id(), NotificationFilter::new())
        .await?;
    assert_eq!(inbox.len(), 1);
    let note = inbox
        .first()
        .ok_or_else(|| eyre::eyre!("missing notification"))?;
    assert_eq!(note.kind(), NotificationKind::TaskAssigned);
    assert_eq!(note.task_id(), Some(task.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submit_then_acknowledge_closes_with_ordered_actions(harness: Harness) -> eyre::Result<()> {
    let creator = manager_with_create();
    let worker = employee();
    let approver = director_approver();

    let task = harness
        .service
        .create(&creator, CreateTaskRequest::new("Draft the tender notice"))
        .await?;
    harness
        .service
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: worker.user_id(),
            },
            &creator,
        )
        .await?;
    harness
        .service
        .transition(task.id(), TaskEvent::Submit, &worker)
        .await?;
    let task = harness
        .service
        .transition(task.id(), TaskEvent::Acknowledge, &approver)
        .await?;

    assert_eq!(task.status(), TaskStatus::Closed);

    let kinds: Vec<ActionKind> = harness
        .service
        .actions(task.id())
        .await?
        .iter()
        .map(|action| action.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            ActionKind::Created,
            ActionKind::Assigned,
            ActionKind::Submitted,
            ActionKind::Acknowledged,
            ActionKind::Closed,
        ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reject_returns_task_to_assignee(harness: Harness) -> eyre::Result<()> {
    let creator = manager_with_create();
    let worker = employee();
    let approver = director_approver();

    let task = harness
        .service
        .create(&creator, CreateTaskRequest::new("Verify stock registers"))
        .await?;
    harness
        .service
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: worker.user_id(),
            },
            &creator,
        )
        .await?;
    harness
        .service
        .transition(task.id(), TaskEvent::Submit, &worker)
        .await?;
    let task = harness
        .service
        .transition(task.id(), TaskEvent::Reject, &approver)
        .await?;

    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.assigned_to(), Some(worker.user_id()));

    let inbox = harness
        .notifications
        .list_for_user(worker.user_id(), NotificationFilter::new())
        .await?;
    assert!(
        inbox
            .iter()
            .any(|note| note.kind() == NotificationKind::TaskRejected)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revert_reopens_without_new_record_number(harness: Harness) -> eyre::Result<()> {
    let creator = manager_with_create();
    let worker = employee();

    let task = harness
        .service
        .create(&creator, CreateTaskRequest::new("Archive old case files"))
        .await?;
    let original_record = task.record_number();
    harness
        .service
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: worker.user_id(),
            },
            &creator,
        )
        .await?;
    harness
        .service
        .transition(task.id(), TaskEvent::Submit, &worker)
        .await?;
    harness
        .service
        .transition(task.id(), TaskEvent::Acknowledge, &superadmin())
        .await?;

    let task = harness
        .service
        .transition(task.id(), TaskEvent::Revert, &superadmin())
        .await?;
    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.record_number(), original_record);

    // The sequence was consumed exactly once for this task: a fresh create
    // gets the next value.
    let second = harness
        .service
        .create(&creator, CreateTaskRequest::new("Second task"))
        .await?;
    assert_eq!(second.record_number().value().value(), 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_expected_status_is_a_conflict(harness: Harness) -> eyre::Result<()> {
    let creator = manager_with_create();
    let worker = employee();
    let task = harness
        .service
        .create(&creator, CreateTaskRequest::new("Race me"))
        .await?;
    let mut stale_copy = task.clone();

    harness
        .service
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: worker.user_id(),
            },
            &creator,
        )
        .await?;

    // A writer still holding the Active snapshot loses the race.
    let outcome = stale_copy.apply(
        &TaskEvent::Assign {
            assignee: worker.user_id(),
        },
        &creator,
        &DefaultClock,
    );
    assert!(outcome.is_ok());
    let result = harness
        .tasks
        .apply_transition(&stale_copy, TaskStatus::Active, &[])
        .await;
    assert!(matches!(
        result,
        Err(TaskRepositoryError::StatusConflict {
            expected: TaskStatus::Active,
            actual: TaskStatus::InProgress,
            ..
        })
    ));

    let stored = harness
        .service
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    assert_eq!(stored.status(), TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn guard_failure_appends_no_actions(harness: Harness) -> eyre::Result<()> {
    let creator = manager_with_create();
    let stranger = employee();
    let task = harness
        .service
        .create(&creator, CreateTaskRequest::new("Locked down"))
        .await?;

    let result = harness
        .service
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: stranger.user_id(),
            },
            &stranger,
        )
        .await;
    assert!(matches!(result, Err(TaskLifecycleError::Domain(_))));

    let actions = harness.service.actions(task.id()).await?;
    assert_eq!(actions.len(), 1, "only the creation action should exist");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_appends_edited_action_and_history(harness: Harness) -> eyre::Result<()> {
    let creator = manager_with_create();
    let editor = Actor::new(UserId::new(), Role::Director, CapabilitySet::empty());
    let task = harness
        .service
        .create(&creator, CreateTaskRequest::new("Initial title"))
        .await?;

    let edits = crate::task::domain::TaskEdits::new()
        .set_title("Corrected title")
        .set_description(Some("Now with context".to_owned()));
    let task = harness
        .service
        .edit_fields(task.id(), &editor, edits)
        .await?;

    assert_eq!(task.title(), "Corrected title");
    assert_eq!(task.status(), TaskStatus::Active);

    let actions = harness.service.actions(task.id()).await?;
    assert!(
        actions
            .iter()
            .any(|action| action.kind() == ActionKind::Edited)
    );

    let history = harness.service.history(task.id()).await?;
    assert_eq!(history.len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_on_missing_task_is_not_found(harness: Harness) {
    let result = harness
        .service
        .transition(
            crate::task::domain::TaskId::new(),
            TaskEvent::Submit,
            &employee(),
        )
        .await;
    assert!(matches!(result, Err(TaskLifecycleError::NotFound(_))));
}
