//! Error types for intake-ledger domain validation and parsing.

use crate::access::domain::AccessDenied;
use thiserror::Error;

/// Errors returned while constructing or mutating receive aggregates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReceiveDomainError {
    /// An authorization guard rejected the operation.
    #[error(transparent)]
    Denied(#[from] AccessDenied),
}

/// Error returned while parsing receive dispositions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown receive disposition: {0}")]
pub struct ParseReceiveDispositionError(pub String);
