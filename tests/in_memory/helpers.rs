//! Shared fixtures for the in-memory integration suite.

use despatch::access::domain::{Actor, Capability, CapabilitySet, Role, UserId};
use despatch::notification::{
    adapters::memory::InMemoryNotificationRepository, services::NotificationDispatcherService,
};
use despatch::receive::{
    adapters::memory::InMemoryReceiveRepository, services::ReceiveLedgerService,
};
use despatch::sequence::{
    adapters::memory::InMemorySequenceStore, services::SequenceIssuerService,
};
use despatch::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
use mockable::DefaultClock;
use std::sync::Arc;

/// Task service wired over the in-memory adapters.
pub type MemoryTaskService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemorySequenceStore,
    InMemoryNotificationRepository,
    DefaultClock,
>;

/// Receive service wired over the in-memory adapters.
pub type MemoryReceiveService = ReceiveLedgerService<
    InMemoryReceiveRepository,
    InMemoryTaskRepository,
    InMemorySequenceStore,
    DefaultClock,
>;

/// Notification dispatcher wired over the in-memory adapter.
pub type MemoryDispatcher =
    NotificationDispatcherService<InMemoryNotificationRepository, DefaultClock>;

/// The fully wired engine, sharing one store set across services.
pub struct Engine {
    /// Task lifecycle service.
    pub tasks: MemoryTaskService,
    /// Intake-ledger service.
    pub receives: MemoryReceiveService,
    /// Notification dispatcher.
    pub notifications: MemoryDispatcher,
    /// Shared sequence issuer.
    pub sequences: SequenceIssuerService<InMemorySequenceStore>,
}

impl Engine {
    /// Wires every service over fresh in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let task_repo = Arc::new(InMemoryTaskRepository::new());
        let receive_repo = Arc::new(InMemoryReceiveRepository::new());
        let notification_repo = Arc::new(InMemoryNotificationRepository::new());
        let sequence_store = Arc::new(InMemorySequenceStore::new());
        let clock = Arc::new(DefaultClock);

        let sequences = SequenceIssuerService::new(Arc::clone(&sequence_store));
        let notifications =
            NotificationDispatcherService::new(Arc::clone(&notification_repo), Arc::clone(&clock));
        let tasks = TaskLifecycleService::new(
            Arc::clone(&task_repo),
            sequences.clone(),
            notifications.clone(),
            Arc::clone(&clock),
        );
        let receives = ReceiveLedgerService::new(
            receive_repo,
            task_repo,
            sequences.clone(),
            clock,
        );

        Self {
            tasks,
            receives,
            notifications,
            sequences,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// A manager who may create tasks by rank alone.
#[must_use]
pub fn manager() -> Actor {
    Actor::new(UserId::new(), Role::Manager, CapabilitySet::empty())
}

/// An employee with no grants.
#[must_use]
pub fn employee() -> Actor {
    Actor::new(UserId::new(), Role::Employee, CapabilitySet::empty())
}

/// A director holding the completion-approval grant.
#[must_use]
pub fn director_approver() -> Actor {
    Actor::new(
        UserId::new(),
        Role::Director,
        CapabilitySet::empty().with(Capability::ApproveCompletions),
    )
}

/// A superadmin with no explicit grants.
#[must_use]
pub fn superadmin() -> Actor {
    Actor::new(UserId::new(), Role::Superadmin, CapabilitySet::empty())
}

/// An incharge holding the receive-management grant.
#[must_use]
pub fn registrar() -> Actor {
    Actor::new(
        UserId::new(),
        Role::Incharge,
        CapabilitySet::empty().with(Capability::ManageReceives),
    )
}
