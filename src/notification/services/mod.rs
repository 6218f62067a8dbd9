//! Orchestration services for notification fan-out.

mod dispatcher;

pub use dispatcher::{
    NotificationDispatcherService, NotificationServiceError, NotificationServiceResult,
};
