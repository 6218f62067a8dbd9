//! Port contracts for receive persistence.

mod repository;

pub use repository::{ReceiveRepository, ReceiveRepositoryError, ReceiveRepositoryResult};
