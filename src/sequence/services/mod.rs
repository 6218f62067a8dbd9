//! Orchestration services for sequence issuing.

mod issuer;

pub use issuer::{SequenceIssueError, SequenceIssueResult, SequenceIssuerService};
