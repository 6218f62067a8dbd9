//! Despatch: administrative work-item lifecycle engine.
//!
//! This crate implements the core of a work-item tracking system for an
//! organizational hierarchy: tasks and intake ("receive") records moving
//! through explicit status state machines, with every transition gated by a
//! role-and-capability authorization model, stamped with an atomically
//! issued reference number, and fanned out as notifications to the affected
//! users.
//!
//! # Architecture
//!
//! Despatch follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`access`]: Role hierarchy, capability grants, and actor policy checks
//! - [`sequence`]: Domain-keyed monotonic reference-number issuing
//! - [`task`]: Task aggregate, status state machine, and audit logs
//! - [`receive`]: Intake-ledger records that originate tasks
//! - [`notification`]: Per-user notification fan-out on lifecycle events

pub mod access;
pub mod notification;
pub mod receive;
pub mod sequence;
pub mod task;
