//! In-memory counter store for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::sequence::{
    domain::{SequenceDomain, SequenceValue},
    ports::{SequenceCounterStore, SequenceStoreError, SequenceStoreResult},
};

/// Thread-safe in-memory sequence counter store.
///
/// The mutex serializes increment-and-fetch per process, which satisfies
/// the port's atomicity contract for single-process deployments and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySequenceStore {
    counters: Arc<Mutex<HashMap<SequenceDomain, u64>>>,
}

impl InMemorySequenceStore {
    /// Creates an empty counter store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SequenceCounterStore for InMemorySequenceStore {
    async fn increment_and_fetch(
        &self,
        domain: SequenceDomain,
    ) -> SequenceStoreResult<SequenceValue> {
        let mut counters = self.counters.lock().map_err(|err| {
            SequenceStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let counter = counters.entry(domain).or_insert(0);
        *counter = counter.saturating_add(1);
        Ok(SequenceValue::new(*counter))
    }
}
