//! Repository port for receive persistence.

use crate::receive::domain::{Receive, ReceiveId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for receive repository operations.
pub type ReceiveRepositoryResult<T> = Result<T, ReceiveRepositoryError>;

/// Receive persistence contract.
#[async_trait]
pub trait ReceiveRepository: Send + Sync {
    /// Stores a new receive.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveRepositoryError::DuplicateReceive`] when the
    /// identifier already exists.
    async fn create(&self, receive: &Receive) -> ReceiveRepositoryResult<()>;

    /// Persists changes to an existing receive (disposition and closure
    /// fields land in one write).
    ///
    /// # Errors
    ///
    /// Returns [`ReceiveRepositoryError::NotFound`] when the receive does
    /// not exist.
    async fn update(&self, receive: &Receive) -> ReceiveRepositoryResult<()>;

    /// Finds a receive by identifier.
    ///
    /// Returns `None` when the receive does not exist.
    async fn find_by_id(&self, id: ReceiveId) -> ReceiveRepositoryResult<Option<Receive>>;

    /// Returns all receives ordered by reference number.
    async fn list_all(&self) -> ReceiveRepositoryResult<Vec<Receive>>;
}

/// Errors returned by receive repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReceiveRepositoryError {
    /// A receive with the same identifier already exists.
    #[error("duplicate receive identifier: {0}")]
    DuplicateReceive(ReceiveId),

    /// The receive was not found.
    #[error("receive not found: {0}")]
    NotFound(ReceiveId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReceiveRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
