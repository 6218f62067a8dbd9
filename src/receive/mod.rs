//! Intake-ledger ("receive") lifecycle management.
//!
//! A receive is an intake record that may originate tasks. Storage holds
//! only the `Open`/`Closed` disposition; the `Assigned` status is derived
//! from the linked-task count at read time, so it can never drift from the
//! true link set. Closure stamps `closed_by`/`closed_at` together; moving
//! away from `Closed` clears both in the same write.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Ledger service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
