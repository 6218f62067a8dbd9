//! Sequence domains, issued values, and reference-number formatting.

use super::ParseSequenceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named counter domain. Each domain owns an independent contiguous run of
/// issued values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceDomain {
    /// Task record numbers.
    Task,
    /// Receive reference numbers.
    Receive,
}

impl SequenceDomain {
    /// Returns the canonical storage key for the counter row.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Receive => "receive",
        }
    }

    /// Returns the prefix used when formatting reference numbers.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Task => "TASK",
            Self::Receive => "RCV",
        }
    }
}

impl TryFrom<&str> for SequenceDomain {
    type Error = ParseSequenceDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "task" => Ok(Self::Task),
            "receive" => Ok(Self::Receive),
            _ => Err(ParseSequenceDomainError(value.to_owned())),
        }
    }
}

impl fmt::Display for SequenceDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value issued from a sequence counter.
///
/// Uniqueness within the issuing domain is the contract; formatting is
/// presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceValue(u64);

impl SequenceValue {
    /// Creates a sequence value from an already-issued integer.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for SequenceValue {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SequenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable reference number stamped on tasks and receives.
///
/// Formats as `{PREFIX}-{value:06}`, e.g. `TASK-000042`. The underlying
/// integer carries the uniqueness guarantee; the zero padding widens for
/// values past six digits rather than truncate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceNumber {
    domain: SequenceDomain,
    value: SequenceValue,
}

impl ReferenceNumber {
    /// Creates a reference number from an issued value.
    #[must_use]
    pub const fn new(domain: SequenceDomain, value: SequenceValue) -> Self {
        Self { domain, value }
    }

    /// Returns the issuing domain.
    #[must_use]
    pub const fn domain(self) -> SequenceDomain {
        self.domain
    }

    /// Returns the issued value.
    #[must_use]
    pub const fn value(self) -> SequenceValue {
        self.value
    }
}

impl fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:06}", self.domain.prefix(), self.value.value())
    }
}
