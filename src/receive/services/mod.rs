//! Orchestration services for the intake ledger.

mod ledger;

pub use ledger::{ReceiveLedgerError, ReceiveLedgerResult, ReceiveLedgerService, ReceiveView};
