//! Port contracts for sequence counter storage.

mod counter;

pub use counter::{SequenceCounterStore, SequenceStoreError, SequenceStoreResult};
