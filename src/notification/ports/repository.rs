//! Repository port for notification persistence and listing.

use crate::access::domain::UserId;
use crate::notification::domain::{Notification, NotificationId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Listing filter for a user's notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationFilter {
    unread_only: bool,
    limit: Option<usize>,
}

impl NotificationFilter {
    /// Default result cap applied when the caller does not set one.
    pub const DEFAULT_LIMIT: usize = 50;

    /// Hard ceiling on the result cap regardless of the caller's request.
    pub const MAX_LIMIT: usize = 100;

    /// Creates a filter with the default cap, including read notifications.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            unread_only: false,
            limit: None,
        }
    }

    /// Restricts the listing to unread notifications.
    #[must_use]
    pub const fn unread_only(mut self) -> Self {
        self.unread_only = true;
        self
    }

    /// Requests a result cap; clamped to [`Self::MAX_LIMIT`] on read.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns whether read notifications are excluded.
    #[must_use]
    pub const fn is_unread_only(self) -> bool {
        self.unread_only
    }

    /// Returns the effective result cap after clamping.
    #[must_use]
    pub const fn effective_limit(self) -> usize {
        match self.limit {
            Some(limit) if limit < Self::MAX_LIMIT => limit,
            Some(_) => Self::MAX_LIMIT,
            None => Self::DEFAULT_LIMIT,
        }
    }
}

/// Notification persistence contract.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Stores a new notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::Duplicate`] when the
    /// identifier already exists.
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()>;

    /// Finds a notification by identifier.
    ///
    /// Returns `None` when the notification does not exist.
    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>>;

    /// Lists a user's notifications, newest first, honoring the filter's
    /// unread restriction and effective cap.
    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: NotificationFilter,
    ) -> NotificationRepositoryResult<Vec<Notification>>;

    /// Counts a user's unread notifications. Matches the semantics of a
    /// listing filtered to unread, without the result cap.
    async fn unread_count(&self, user_id: UserId) -> NotificationRepositoryResult<u64>;

    /// Sets the read flag on a notification and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotFound`] when the
    /// notification does not exist.
    async fn set_read(
        &self,
        id: NotificationId,
        read: bool,
    ) -> NotificationRepositoryResult<Notification>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// A notification with the same identifier already exists.
    #[error("duplicate notification identifier: {0}")]
    Duplicate(NotificationId),

    /// The notification was not found.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
