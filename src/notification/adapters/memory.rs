//! In-memory notification repository for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::access::domain::UserId;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{
        NotificationFilter, NotificationRepository, NotificationRepositoryError,
        NotificationRepositoryResult,
    },
};

/// Thread-safe in-memory notification repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    state: Arc<RwLock<HashMap<NotificationId, Notification>>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> NotificationRepositoryError {
    NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&notification.id()) {
            return Err(NotificationRepositoryError::Duplicate(notification.id()));
        }
        state.insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: NotificationFilter,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matches: Vec<Notification> = state
            .values()
            .filter(|notification| notification.user_id() == user_id)
            .filter(|notification| !filter.is_unread_only() || !notification.is_read())
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        matches.truncate(filter.effective_limit());
        Ok(matches)
    }

    async fn unread_count(&self, user_id: UserId) -> NotificationRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        let count = state
            .values()
            .filter(|notification| notification.user_id() == user_id && !notification.is_read())
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn set_read(
        &self,
        id: NotificationId,
        read: bool,
    ) -> NotificationRepositoryResult<Notification> {
        let mut state = self.state.write().map_err(lock_error)?;
        let notification = state
            .get_mut(&id)
            .ok_or(NotificationRepositoryError::NotFound(id))?;
        notification.set_read(read);
        Ok(notification.clone())
    }
}
