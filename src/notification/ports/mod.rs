//! Port contracts for notification persistence.

mod repository;

pub use repository::{
    NotificationFilter, NotificationRepository, NotificationRepositoryError,
    NotificationRepositoryResult,
};
