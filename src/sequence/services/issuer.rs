//! Reference-number issuing service.

use crate::sequence::{
    domain::{ReferenceNumber, SequenceDomain, SequenceValue},
    ports::{SequenceCounterStore, SequenceStoreError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for sequence issuing.
#[derive(Debug, Clone, Error)]
pub enum SequenceIssueError {
    /// Counter store operation failed.
    #[error(transparent)]
    Store(#[from] SequenceStoreError),
}

/// Result type for sequence issuing operations.
pub type SequenceIssueResult<T> = Result<T, SequenceIssueError>;

/// Issues strictly increasing values and formatted reference numbers.
#[derive(Clone)]
pub struct SequenceIssuerService<S>
where
    S: SequenceCounterStore,
{
    store: Arc<S>,
}

impl<S> SequenceIssuerService<S>
where
    S: SequenceCounterStore,
{
    /// Creates a new issuer over a counter store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Issues the next value for `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceIssueError::Store`] when the counter store fails.
    /// The failure is fatal for the calling operation: a reference number is
    /// never fabricated, since uniqueness could not be guaranteed.
    pub async fn next(&self, domain: SequenceDomain) -> SequenceIssueResult<SequenceValue> {
        self.store
            .increment_and_fetch(domain)
            .await
            .map_err(|err| {
                tracing::error!(domain = %domain, error = %err, "sequence issue failed");
                SequenceIssueError::Store(err)
            })
    }

    /// Issues the next value for `domain` formatted as a reference number.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceIssueError::Store`] when the counter store fails.
    pub async fn issue_reference(
        &self,
        domain: SequenceDomain,
    ) -> SequenceIssueResult<ReferenceNumber> {
        let value = self.next(domain).await?;
        Ok(ReferenceNumber::new(domain, value))
    }
}
