//! `PostgreSQL` adapter for the sequence counter store.

mod repository;
mod schema;

pub use repository::{PostgresSequenceStore, SequencePgPool};
