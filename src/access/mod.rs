//! Role hierarchy, capability grants, and actor policy checks.
//!
//! This module is the authorization leaf of the engine: pure functions over
//! role and capability inputs, with no ports or adapters. Lifecycle services
//! consult it before applying any state change; a failed check surfaces as
//! [`domain::AccessDenied`] and deliberately carries no detail about which
//! grant was missing.

pub mod domain;

#[cfg(test)]
mod tests;
