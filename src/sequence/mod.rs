//! Domain-keyed monotonic reference-number issuing.
//!
//! Every task and receive is stamped with a human-readable reference number
//! derived from a strictly increasing integer per sequence domain. The
//! counter increment is the one operation in the engine that requires
//! strict atomicity under arbitrary concurrency, so the store port contract
//! is transactional increment-and-fetch rather than read-then-write.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Issuing service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
