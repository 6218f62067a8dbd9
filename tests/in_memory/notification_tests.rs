//! Notification listing and read-state scenarios over the in-memory engine.

use crate::in_memory::helpers::{Engine, employee, manager};
use despatch::notification::{
    domain::NotificationKind,
    ports::NotificationFilter,
    services::NotificationServiceError,
};
use despatch::task::{domain::TaskEvent, services::CreateTaskRequest};
use rstest::{fixture, rstest};

#[fixture]
fn engine() -> Engine {
    Engine::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unread_count_tracks_reads(engine: Engine) -> eyre::Result<()> {
    let creator = manager();
    let worker = employee();

    for title in ["First", "Second", "Third"] {
        let task = engine
            .tasks
            .create(&creator, CreateTaskRequest::new(title))
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
    }
    assert_eq!(engine.notifications.unread_count(worker.user_id()).await?, 3);

    let inbox = engine
        .notifications
        .list(worker.user_id(), NotificationFilter::new().unread_only())
        .await?;
    let first = inbox
        .first()
        .ok_or_else(|| eyre::eyre!("expected notifications"))?;
    engine
        .notifications
        .mark_read(first.id(), worker.user_id(), true)
        .await?;

    assert_eq!(engine.notifications.unread_count(worker.user_id()).await?, 2);
    let unread = engine
        .notifications
        .list(worker.user_id(), NotificationFilter::new().unread_only())
        .await?;
    assert_eq!(unread.len(), 2);
    assert!(unread.iter().all(|note| !note.is_read()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn read_state_belongs_to_the_recipient(engine: Engine) -> eyre::Result<()> {
    let creator = manager();
    let worker = employee();
    let intruder = employee();

    let task = engine
        .tasks
        .create(&creator, CreateTaskRequest::new("Private delivery"))
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

    let inbox = engine
        .notifications
        .list(worker.user_id(), NotificationFilter::new())
        .await?;
    let note = inbox
        .first()
        .ok_or_else(|| eyre::eyre!("expected a notification"))?;
    assert_eq!(note.kind(), NotificationKind::TaskAssigned);

    let denied = engine
        .notifications
        .mark_read(note.id(), intruder.user_id(), true)
        .await;
    assert!(matches!(denied, Err(NotificationServiceError::Denied(_))));

    // Unchanged for the true recipient, who can then toggle it both ways.
    let updated = engine
        .notifications
        .mark_read(note.id(), worker.user_id(), true)
        .await?;
    assert!(updated.is_read());
    let restored = engine
        .notifications
        .mark_read(note.id(), worker.user_id(), false)
        .await?;
    assert!(!restored.is_read());
    Ok(())
}
