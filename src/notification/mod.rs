//! Per-user notification fan-out on lifecycle events.
//!
//! Each user-targeted task action produces exactly one notification row
//! addressed to the affected user. Read state belongs to the recipient
//! alone; the dispatcher rejects any other caller toggling it.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Dispatcher service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
