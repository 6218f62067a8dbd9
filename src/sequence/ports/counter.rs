//! Counter-store port for atomic sequence issuing.

use crate::sequence::domain::{SequenceDomain, SequenceValue};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sequence counter store operations.
pub type SequenceStoreResult<T> = Result<T, SequenceStoreError>;

/// Durable, domain-keyed monotonic counter contract.
#[async_trait]
pub trait SequenceCounterStore: Send + Sync {
    /// Atomically increments the counter for `domain` and returns the new
    /// value, creating the counter at 1 when the domain has never been
    /// issued.
    ///
    /// Under N concurrent callers for the same domain, the returned values
    /// form a contiguous run with no gaps and no repeats. The increment and
    /// the read of the new value are one atomic unit relative to other
    /// callers.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceStoreError`] when the counter storage is
    /// unreachable or yields an out-of-range value. Callers must treat this
    /// as fatal and never fabricate a number.
    async fn increment_and_fetch(
        &self,
        domain: SequenceDomain,
    ) -> SequenceStoreResult<SequenceValue>;
}

/// Errors returned by sequence counter store implementations.
#[derive(Debug, Clone, Error)]
pub enum SequenceStoreError {
    /// The stored counter holds a value outside the issuable range.
    #[error("counter value {value} for domain '{domain}' is out of range")]
    ValueOutOfRange {
        /// The counter's domain key.
        domain: SequenceDomain,
        /// The raw stored value.
        value: i64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SequenceStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
