//! Intake-ledger orchestration: creation, disposition, and derived status.

use crate::access::domain::Actor;
use crate::receive::{
    domain::{Receive, ReceiveDisposition, ReceiveDomainError, ReceiveId, ReceiveStatus},
    ports::{ReceiveRepository, ReceiveRepositoryError},
};
use crate::sequence::{
    domain::SequenceDomain,
    ports::SequenceCounterStore,
    services::{SequenceIssueError, SequenceIssuerService},
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// A receive together with its effective (derived) status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveView {
    /// The receive aggregate.
    pub receive: Receive,
    /// Effective status: stored disposition plus derived `Assigned`.
    pub status: ReceiveStatus,
}

/// Service-level errors for intake-ledger operations.
#[derive(Debug, Error)]
pub enum ReceiveLedgerError {
    /// Domain validation or guard failure.
    #[error(transparent)]
    Domain(#[from] ReceiveDomainError),
    /// The receive was not found.
    #[error("receive not found: {0}")]
    NotFound(ReceiveId),
    /// Receive repository operation failed.
    #[error(transparent)]
    Repository(#[from] ReceiveRepositoryError),
    /// Linked-task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Reference-number issuing failed.
    #[error(transparent)]
    Sequence(#[from] SequenceIssueError),
}

/// Result type for intake-ledger service operations.
pub type ReceiveLedgerResult<T> = Result<T, ReceiveLedgerError>;

/// Intake-ledger orchestration service.
///
/// Holds the task repository port alongside its own: the derived `Assigned`
/// status is re-computed from the linked-task count on every read rather
/// than stored, so it cannot drift.
#[derive(Clone)]
pub struct ReceiveLedgerService<R, T, S, C>
where
    R: ReceiveRepository,
    T: TaskRepository,
    S: SequenceCounterStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    tasks: Arc<T>,
    sequences: SequenceIssuerService<S>,
    clock: Arc<C>,
}

impl<R, T, S, C> ReceiveLedgerService<R, T, S, C>
where
    R: ReceiveRepository,
    T: TaskRepository,
    S: SequenceCounterStore,
    C: Clock + Send + Sync,
{
    /// Creates a new intake-ledger service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        tasks: Arc<T>,
        sequences: SequenceIssuerService<S>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            tasks,
            sequences,
            clock,
        }
    }

    /// Creates an open receive with a freshly issued reference number.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveLedgerError`] when the actor may not manage
    /// receives, issuing fails, or persistence rejects the write.
    pub async fn create(&self, actor: &Actor) -> ReceiveLedgerResult<ReceiveView> {
        let reference_number = self
            .sequences
            .issue_reference(SequenceDomain::Receive)
            .await?;
        let receive = Receive::create(actor, reference_number, &*self.clock)?;
        self.repository.create(&receive).await?;
        tracing::debug!(receive_id = %receive.id(), reference = %receive.reference_number(), "receive created");
        Ok(ReceiveView {
            status: receive.effective_status(0),
            receive,
        })
    }

    /// Sets the stored disposition. Closing stamps the closure pair;
    /// reopening clears it in the same write.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveLedgerError`] when the receive is missing, the
    /// actor may not manage receives, or persistence fails.
    pub async fn set_disposition(
        &self,
        receive_id: ReceiveId,
        disposition: ReceiveDisposition,
        actor: &Actor,
    ) -> ReceiveLedgerResult<ReceiveView> {
        let mut receive = self
            .repository
            .find_by_id(receive_id)
            .await?
            .ok_or(ReceiveLedgerError::NotFound(receive_id))?;
        receive.set_disposition(actor, disposition, &*self.clock)?;
        self.repository.update(&receive).await?;
        self.view_of(receive).await
    }

    /// Finds a receive by identifier, with its derived status.
    ///
    /// Returns `Ok(None)` when no receive has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveLedgerError`] when persistence lookup fails.
    pub async fn find_by_id(
        &self,
        receive_id: ReceiveId,
    ) -> ReceiveLedgerResult<Option<ReceiveView>> {
        match self.repository.find_by_id(receive_id).await? {
            Some(receive) => Ok(Some(self.view_of(receive).await?)),
            None => Ok(None),
        }
    }

    /// Returns all receives with their derived statuses, ordered by
    /// reference number.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveLedgerError`] when persistence lookup fails.
    pub async fn list_all(&self) -> ReceiveLedgerResult<Vec<ReceiveView>> {
        let receives = self.repository.list_all().await?;
        let mut views = Vec::with_capacity(receives.len());
        for receive in receives {
            views.push(self.view_of(receive).await?);
        }
        Ok(views)
    }

    async fn view_of(&self, receive: Receive) -> ReceiveLedgerResult<ReceiveView> {
        let linked = self.tasks.count_by_receive(receive.id()).await?;
        Ok(ReceiveView {
            status: receive.effective_status(linked),
            receive,
        })
    }
}
