//! Unit tests for the dispatcher service over the in-memory adapter.

use crate::access::domain::UserId;
use crate::notification::{
    adapters::memory::InMemoryNotificationRepository,
    domain::NotificationKind,
    ports::{NotificationFilter, NotificationRepositoryError},
    services::{NotificationDispatcherService, NotificationServiceError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestDispatcher = NotificationDispatcherService<InMemoryNotificationRepository, DefaultClock>;

#[fixture]
fn dispatcher() -> TestDispatcher {
    NotificationDispatcherService::new(
        Arc::new(InMemoryNotificationRepository::new()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dispatch_creates_unread_notification(dispatcher: TestDispatcher) -> eyre::Result<()> {
    let recipient = UserId::new();
    let created = dispatcher
        .dispatch(recipient, None, NotificationKind::TaskAssigned, "assigned")
        .await?;

    assert_eq!(created.user_id(), recipient);
    assert!(!created.is_read());

    let listed = dispatcher
        .list(recipient, NotificationFilter::new())
        .await?;
    assert_eq!(listed, vec![created]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unread_filter_and_count_agree(dispatcher: TestDispatcher) -> eyre::Result<()> {
    let recipient = UserId::new();
    let first = dispatcher
        .dispatch(recipient, None, NotificationKind::TaskAssigned, "one")
        .await?;
    dispatcher
        .dispatch(recipient, None, NotificationKind::TaskForwarded, "two")
        .await?;
    dispatcher.mark_read(first.id(), recipient, true).await?;

    let unread = dispatcher
        .list(recipient, NotificationFilter::new().unread_only())
        .await?;
    assert_eq!(unread.len(), 1);
    assert_eq!(dispatcher.unread_count(recipient).await?, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_capped(dispatcher: TestDispatcher) -> eyre::Result<()> {
    let recipient = UserId::new();
    for index in 0..5 {
        dispatcher
            .dispatch(
                recipient,
                None,
                NotificationKind::TaskAssigned,
                format!("message {index}"),
            )
            .await?;
    }

    let listed = dispatcher
        .list(recipient, NotificationFilter::new().with_limit(3))
        .await?;
    assert_eq!(listed.len(), 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_read_is_recipient_only(dispatcher: TestDispatcher) -> eyre::Result<()> {
    let recipient = UserId::new();
    let other = UserId::new();
    let created = dispatcher
        .dispatch(recipient, None, NotificationKind::TaskClosed, "closed")
        .await?;

    let denied = dispatcher.mark_read(created.id(), other, true).await;
    assert!(matches!(
        denied,
        Err(NotificationServiceError::Denied(_))
    ));

    let updated = dispatcher.mark_read(created.id(), recipient, true).await?;
    assert!(updated.is_read());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_read_on_unknown_id_is_not_found(dispatcher: TestDispatcher) {
    let result = dispatcher
        .mark_read(
            crate::notification::domain::NotificationId::new(),
            UserId::new(),
            true,
        )
        .await;
    assert!(matches!(
        result,
        Err(NotificationServiceError::Repository(
            NotificationRepositoryError::NotFound(_)
        ))
    ));
}
