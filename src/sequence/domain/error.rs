//! Error types for sequence domain parsing.

use thiserror::Error;

/// Error returned while parsing sequence domains from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sequence domain: {0}")]
pub struct ParseSequenceDomainError(pub String);
