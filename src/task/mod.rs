//! Task lifecycle management.
//!
//! Tasks move `Active` → `InProgress` → `Completed` → `Closed`, with
//! `Closed` terminal but reversible. Every legal move lives in one
//! enumerable transition table; each applied transition appends immutable
//! [`domain::TaskAction`] records and, where a specific user is affected,
//! fans out a notification. Field edits are a separate, status-preserving
//! operation that appends field-level [`domain::TaskHistoryEntry`] diffs.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
