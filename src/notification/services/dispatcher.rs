//! Notification dispatch, listing, and read-state management.

use crate::access::domain::{AccessDenied, UserId};
use crate::notification::{
    domain::{Notification, NotificationId, NotificationKind},
    ports::{NotificationFilter, NotificationRepository, NotificationRepositoryError},
};
use crate::task::domain::TaskId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for notification operations.
#[derive(Debug, Error)]
pub enum NotificationServiceError {
    /// The caller is not the notification's recipient.
    #[error(transparent)]
    Denied(#[from] AccessDenied),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
}

/// Result type for notification service operations.
pub type NotificationServiceResult<T> = Result<T, NotificationServiceError>;

/// Creates notification records for lifecycle events and serves per-user
/// listings.
pub struct NotificationDispatcherService<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for NotificationDispatcherService<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> NotificationDispatcherService<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new dispatcher service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates one notification row addressed to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when persistence
    /// fails. Callers that treat dispatch as a decoupled side effect log the
    /// failure and carry on.
    pub async fn dispatch(
        &self,
        recipient: UserId,
        task_id: Option<TaskId>,
        kind: NotificationKind,
        message: impl Into<String> + Send,
    ) -> NotificationServiceResult<Notification> {
        let notification = Notification::new(recipient, task_id, kind, message, &*self.clock);
        self.repository.store(&notification).await?;
        Ok(notification)
    }

    /// Lists `user_id`'s notifications, newest first, honoring the filter.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn list(
        &self,
        user_id: UserId,
        filter: NotificationFilter,
    ) -> NotificationServiceResult<Vec<Notification>> {
        Ok(self.repository.list_for_user(user_id, filter).await?)
    }

    /// Counts `user_id`'s unread notifications, mirroring the unread-only
    /// listing semantics.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn unread_count(&self, user_id: UserId) -> NotificationServiceResult<u64> {
        Ok(self.repository.unread_count(user_id).await?)
    }

    /// Toggles the read flag on the caller's own notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Denied`] when `caller` is not the
    /// recipient, [`NotificationRepositoryError::NotFound`] when the
    /// identifier is unknown, or a repository error when persistence fails.
    pub async fn mark_read(
        &self,
        id: NotificationId,
        caller: UserId,
        read: bool,
    ) -> NotificationServiceResult<Notification> {
        let notification = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(NotificationRepositoryError::NotFound(id))?;
        AccessDenied::require(notification.user_id() == caller)?;
        Ok(self.repository.set_read(id, read).await?)
    }
}
