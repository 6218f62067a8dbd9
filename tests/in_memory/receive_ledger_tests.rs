//! End-to-end intake-ledger scenarios over the in-memory engine.

use crate::in_memory::helpers::{Engine, manager, registrar};
use despatch::receive::domain::{ReceiveDisposition, ReceiveStatus};
use despatch::task::{domain::TaskStatus, services::CreateTaskRequest};
use rstest::{fixture, rstest};

#[fixture]
fn engine() -> Engine {
    Engine::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn receive_spawns_tasks_and_derives_assigned(engine: Engine) -> eyre::Result<()> {
    let intake = registrar();
    let creator = manager();

    let view = engine.receives.create(&intake).await?;
    assert_eq!(view.status, ReceiveStatus::Open);

    let task = engine
        .tasks
        .create(
            &creator,
            CreateTaskRequest::new("Process grievance petition")
                .with_receive(view.receive.id()),
        )
        .await?;
    assert_eq!(task.status(), TaskStatus::Active);
    assert_eq!(task.receive_id(), Some(view.receive.id()));

    let fetched = engine
        .receives
        .find_by_id(view.receive.id())
        .await?
        .ok_or_else(|| eyre::eyre!("receive should exist"))?;
    assert_eq!(fetched.status, ReceiveStatus::Assigned);

    let linked = engine.tasks.list_by_receive(view.receive.id()).await?;
    assert_eq!(linked.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_and_receive_sequences_are_independent(engine: Engine) -> eyre::Result<()> {
    let intake = registrar();
    let creator = manager();

    let first_receive = engine.receives.create(&intake).await?;
    let task = engine
        .tasks
        .create(&creator, CreateTaskRequest::new("Standalone task"))
        .await?;
    let second_receive = engine.receives.create(&intake).await?;

    assert_eq!(
        first_receive.receive.reference_number().to_string(),
        "RCV-000001"
    );
    assert_eq!(task.record_number().to_string(), "TASK-000001");
    assert_eq!(
        second_receive.receive.reference_number().to_string(),
        "RCV-000002"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closure_pair_travels_with_the_disposition(engine: Engine) -> eyre::Result<()> {
    let intake = registrar();
    let view = engine.receives.create(&intake).await?;

    let closed = engine
        .receives
        .set_disposition(view.receive.id(), ReceiveDisposition::Closed, &intake)
        .await?;
    assert_eq!(closed.receive.closed_by(), Some(intake.user_id()));
    assert!(closed.receive.closed_at().is_some());

    let reopened = engine
        .receives
        .set_disposition(view.receive.id(), ReceiveDisposition::Open, &intake)
        .await?;
    assert!(reopened.receive.closed_by().is_none());
    assert!(reopened.receive.closed_at().is_none());

    // Reopened with no links reads Open again, not Assigned.
    assert_eq!(reopened.status, ReceiveStatus::Open);
    Ok(())
}
