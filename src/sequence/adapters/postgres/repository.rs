//! `PostgreSQL` implementation of the sequence counter store.

use super::schema::sequence_counters;
use crate::sequence::{
    domain::{SequenceDomain, SequenceValue},
    ports::{SequenceCounterStore, SequenceStoreError, SequenceStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by sequence adapters.
pub type SequencePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed sequence counter store.
///
/// The increment runs as a single upsert statement, so the database
/// serializes concurrent issuers per domain row without an explicit
/// transaction around a read-then-write.
#[derive(Debug, Clone)]
pub struct PostgresSequenceStore {
    pool: SequencePgPool,
}

impl PostgresSequenceStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SequencePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SequenceStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SequenceStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SequenceStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SequenceStoreError::persistence)?
    }
}

#[async_trait]
impl SequenceCounterStore for PostgresSequenceStore {
    async fn increment_and_fetch(
        &self,
        domain: SequenceDomain,
    ) -> SequenceStoreResult<SequenceValue> {
        let issued = self
            .run_blocking(move |connection| {
                diesel::insert_into(sequence_counters::table)
                    .values((
                        sequence_counters::name.eq(domain.as_str()),
                        sequence_counters::value.eq(1_i64),
                    ))
                    .on_conflict(sequence_counters::name)
                    .do_update()
                    .set(sequence_counters::value.eq(sequence_counters::value + 1))
                    .returning(sequence_counters::value)
                    .get_result::<i64>(connection)
                    .map_err(SequenceStoreError::persistence)
            })
            .await?;

        let value = u64::try_from(issued)
            .map_err(|_| SequenceStoreError::ValueOutOfRange {
                domain,
                value: issued,
            })?;
        Ok(SequenceValue::new(value))
    }
}
