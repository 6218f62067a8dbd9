//! Sequence issuing properties over the in-memory store.

use crate::in_memory::helpers::Engine;
use despatch::sequence::domain::SequenceDomain;
use rstest::{fixture, rstest};
use std::collections::BTreeSet;
use std::sync::Arc;

#[fixture]
fn engine() -> Engine {
    Engine::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_issuers_observe_a_contiguous_run(engine: Engine) -> eyre::Result<()> {
    let issuer = Arc::new(engine.sequences.clone());
    let mut handles = Vec::with_capacity(100);
    for _ in 0..100 {
        let issuer = Arc::clone(&issuer);
        handles.push(tokio::spawn(async move {
            issuer.next(SequenceDomain::Task).await
        }));
    }

    let mut issued = BTreeSet::new();
    for handle in handles {
        let value = handle.await??;
        assert!(issued.insert(value.value()), "value {value} issued twice");
    }
    let expected: BTreeSet<u64> = (1..=100).collect();
    assert_eq!(issued, expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn interleaved_domains_never_share_values(engine: Engine) -> eyre::Result<()> {
    for round in 1..=5_u64 {
        let task = engine.sequences.next(SequenceDomain::Task).await?;
        let receive = engine.sequences.next(SequenceDomain::Receive).await?;
        assert_eq!(task.value(), round);
        assert_eq!(receive.value(), round);
    }
    Ok(())
}
