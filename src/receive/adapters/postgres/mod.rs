//! `PostgreSQL` adapter for receive persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresReceiveRepository, ReceivePgPool};
