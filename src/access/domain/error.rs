//! Error types for the authorization model.

use thiserror::Error;

/// An authorization guard rejected the operation.
///
/// The rendered message is deliberately generic: it never reveals which
/// role ceiling or capability grant was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation not permitted")]
pub struct AccessDenied;

impl AccessDenied {
    /// Converts a guard verdict into a result.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when `allowed` is false.
    pub const fn require(allowed: bool) -> Result<(), Self> {
        if allowed { Ok(()) } else { Err(Self) }
    }
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
