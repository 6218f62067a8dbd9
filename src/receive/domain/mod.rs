//! Domain types for the intake ledger.

mod error;
mod ids;
mod receive;

pub use error::{ParseReceiveDispositionError, ReceiveDomainError};
pub use ids::ReceiveId;
pub use receive::{PersistedReceiveData, Receive, ReceiveDisposition, ReceiveStatus};
