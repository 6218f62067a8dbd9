//! In-memory receive repository for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::receive::{
    domain::{Receive, ReceiveId},
    ports::{ReceiveRepository, ReceiveRepositoryError, ReceiveRepositoryResult},
};

/// Thread-safe in-memory receive repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReceiveRepository {
    state: Arc<RwLock<HashMap<ReceiveId, Receive>>>,
}

impl InMemoryReceiveRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> ReceiveRepositoryError {
    ReceiveRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ReceiveRepository for InMemoryReceiveRepository {
    async fn create(&self, receive: &Receive) -> ReceiveRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&receive.id()) {
            return Err(ReceiveRepositoryError::DuplicateReceive(receive.id()));
        }
        state.insert(receive.id(), receive.clone());
        Ok(())
    }

    async fn update(&self, receive: &Receive) -> ReceiveRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.contains_key(&receive.id()) {
            return Err(ReceiveRepositoryError::NotFound(receive.id()));
        }
        state.insert(receive.id(), receive.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ReceiveId) -> ReceiveRepositoryResult<Option<Receive>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> ReceiveRepositoryResult<Vec<Receive>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut receives: Vec<Receive> = state.values().cloned().collect();
        receives.sort_by_key(|receive| receive.reference_number().value());
        Ok(receives)
    }
}
