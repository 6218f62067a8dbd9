//! End-to-end task lifecycle scenarios over the in-memory engine.

use crate::in_memory::helpers::{
    Engine, director_approver, employee, manager, superadmin,
};
use despatch::notification::{domain::NotificationKind, ports::NotificationFilter};
use despatch::task::{
    domain::{ActionKind, TaskEvent, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleError},
};
use rstest::{fixture, rstest};

#[fixture]
fn engine() -> Engine {
    Engine::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_from_creation_to_closure(engine: Engine) -> eyre::Result<()> {
    let creator = manager();
    let worker = employee();
    let approver = director_approver();

    let task = engine
        .tasks
        .create(&creator, CreateTaskRequest::new("Prepare budget estimate"))
        .await?;
    assert_eq!(task.status(), TaskStatus::Active);
    assert_eq!(task.record_number().to_string(), "TASK-000001");

    let task = engine
        .tasks
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: worker.user_id(),
            },
            &creator,
        )
        .await?;
    assert_eq!(task.status(), TaskStatus::InProgress);

    let task = engine
        .tasks
        .transition(task.id(), TaskEvent::Submit, &worker)
        .await?;
    assert_eq!(task.status(), TaskStatus::Completed);

    let task = engine
        .tasks
        .transition(task.id(), TaskEvent::Acknowledge, &approver)
        .await?;
    assert_eq!(task.status(), TaskStatus::Closed);

    let kinds: Vec<ActionKind> = engine
        .tasks
        .actions(task.id())
        .await?
        .iter()
        .map(despatch::task::domain::TaskAction::kind)
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
async fn lifecycle_events_fan_out_to_affected_users(engine: Engine) -> eyre::Result<()> {
    let creator = manager();
    let worker = employee();
    let approver = director_approver();

    let task = engine
        .tasks
        .create(&creator, CreateTaskRequest::new("Inspect boundary wall"))
        .await?;
    engine
        .tasks
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: worker.user_id(),
            },
            &creator,
        )
        .await?;
    engine
        .tasks
        .transition(task.id(), TaskEvent::Submit, &worker)
        .await?;
    engine
        .tasks
        .transition(task.id(), TaskEvent::Acknowledge, &approver)
        .await?;

    // Assignment and closure landed with the worker.
    let worker_kinds: Vec<NotificationKind> = engine
        .notifications
        .list(worker.user_id(), NotificationFilter::new())
        .await?
        .iter()
        .map(despatch::notification::domain::Notification::kind)
        .collect();
    assert!(worker_kinds.contains(&NotificationKind::TaskAssigned));
    assert!(worker_kinds.contains(&NotificationKind::TaskClosed));

    // Submission landed with the creator.
    let creator_kinds: Vec<NotificationKind> = engine
        .notifications
        .list(creator.user_id(), NotificationFilter::new())
        .await?
        .iter()
        .map(despatch::notification::domain::Notification::kind)
        .collect();
    assert_eq!(creator_kinds, vec![NotificationKind::TaskSubmitted]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn forwarding_moves_the_task_between_workers(engine: Engine) -> eyre::Result<()> {
    let creator = manager();
    let first = employee();
    let second = employee();

    let task = engine
        .tasks
        .create(&creator, CreateTaskRequest::new("Update muster rolls"))
        .await?;
    engine
        .tasks
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: first.user_id(),
            },
            &creator,
        )
        .await?;
    let task = engine
        .tasks
        .transition(
            task.id(),
            TaskEvent::Forward {
                assignee: second.user_id(),
            },
            &first,
        )
        .await?;

    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.assigned_to(), Some(second.user_id()));

    let second_inbox = engine
        .notifications
        .list(second.user_id(), NotificationFilter::new().unread_only())
        .await?;
    assert!(
        second_inbox
            .iter()
            .any(|note| note.kind() == NotificationKind::TaskForwarded)
    );

    let assigned_to_second = engine.tasks.list_by_assignee(second.user_id()).await?;
    assert_eq!(assigned_to_second.len(), 1);
    assert!(engine.tasks.list_by_assignee(first.user_id()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revert_returns_closed_work_without_reissuing(engine: Engine) -> eyre::Result<()> {
    let creator = manager();
    let worker = employee();
    let admin = superadmin();

    let task = engine
        .tasks
        .create(&creator, CreateTaskRequest::new("Settle pension case"))
        .await?;
    let record = task.record_number();
    engine
        .tasks
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: worker.user_id(),
            },
            &creator,
        )
        .await?;
    engine
        .tasks
        .transition(task.id(), TaskEvent::Submit, &worker)
        .await?;
    engine
        .tasks
        .transition(task.id(), TaskEvent::Acknowledge, &admin)
        .await?;

    let task = engine
        .tasks
        .transition(task.id(), TaskEvent::Revert, &admin)
        .await?;
    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.record_number(), record);

    let kinds: Vec<ActionKind> = engine
        .tasks
        .actions(task.id())
        .await?
        .iter()
        .map(despatch::task::domain::TaskAction::kind)
        .collect();
    assert_eq!(kinds.last(), Some(&ActionKind::Reverted));

    // A reverted task flows through submission again.
    let task = engine
        .tasks
        .transition(task.id(), TaskEvent::Submit, &worker)
        .await?;
    assert_eq!(task.status(), TaskStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employee_without_revert_grant_is_denied(engine: Engine) -> eyre::Result<()> {
    let creator = manager();
    let worker = employee();
    let admin = superadmin();

    let task = engine
        .tasks
        .create(&creator, CreateTaskRequest::new("Issue duplicate card"))
        .await?;
    engine
        .tasks
        .transition(
            task.id(),
            TaskEvent::Assign {
                assignee: worker.user_id(),
            },
            &creator,
        )
        .await?;
    engine
        .tasks
        .transition(task.id(), TaskEvent::Submit, &worker)
        .await?;
    engine
        .tasks
        .transition(task.id(), TaskEvent::Acknowledge, &admin)
        .await?;

    let result = engine
        .tasks
        .transition(task.id(), TaskEvent::Revert, &worker)
        .await;
    assert!(matches!(result, Err(TaskLifecycleError::Domain(_))));

    let stored = engine
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    assert_eq!(stored.status(), TaskStatus::Closed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_numbers_increase_across_creates(engine: Engine) -> eyre::Result<()> {
    let creator = manager();
    for expected in 1..=3_u64 {
        let task = engine
            .tasks
            .create(&creator, CreateTaskRequest::new(format!("Task {expected}")))
            .await?;
        assert_eq!(task.record_number().value().value(), expected);
    }
    Ok(())
}
