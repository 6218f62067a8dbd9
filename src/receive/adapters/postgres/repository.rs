//! `PostgreSQL` repository implementation for receive storage.

use super::{
    models::{NewReceiveRow, ReceiveDispositionChangeset, ReceiveRow},
    schema::receives,
};
use crate::access::domain::UserId;
use crate::receive::{
    domain::{PersistedReceiveData, Receive, ReceiveDisposition, ReceiveId},
    ports::{ReceiveRepository, ReceiveRepositoryError, ReceiveRepositoryResult},
};
use crate::sequence::domain::{ReferenceNumber, SequenceDomain, SequenceValue};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by receive adapters.
pub type ReceivePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed receive repository.
#[derive(Debug, Clone)]
pub struct PostgresReceiveRepository {
    pool: ReceivePgPool,
}

impl PostgresReceiveRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ReceivePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ReceiveRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ReceiveRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ReceiveRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ReceiveRepositoryError::persistence)?
    }
}

#[async_trait]
impl ReceiveRepository for PostgresReceiveRepository {
    async fn create(&self, receive: &Receive) -> ReceiveRepositoryResult<()> {
        let receive_id = receive.id();
        let new_row = to_new_row(receive)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(receives::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ReceiveRepositoryError::DuplicateReceive(receive_id)
                    }
                    _ => ReceiveRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, receive: &Receive) -> ReceiveRepositoryResult<()> {
        let receive_id = receive.id();
        let changeset = ReceiveDispositionChangeset {
            disposition: receive.disposition().as_str().to_owned(),
            closed_by: Some(receive.closed_by().map(UserId::into_inner)),
            closed_at: Some(receive.closed_at()),
            updated_at: receive.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated =
                diesel::update(receives::table.filter(receives::id.eq(receive_id.into_inner())))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(ReceiveRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ReceiveRepositoryError::NotFound(receive_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ReceiveId) -> ReceiveRepositoryResult<Option<Receive>> {
        self.run_blocking(move |connection| {
            let row = receives::table
                .filter(receives::id.eq(id.into_inner()))
                .select(ReceiveRow::as_select())
                .first::<ReceiveRow>(connection)
                .optional()
                .map_err(ReceiveRepositoryError::persistence)?;
            row.map(row_to_receive).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ReceiveRepositoryResult<Vec<Receive>> {
        self.run_blocking(move |connection| {
            let rows = receives::table
                .order(receives::reference_number.asc())
                .select(ReceiveRow::as_select())
                .load::<ReceiveRow>(connection)
                .map_err(ReceiveRepositoryError::persistence)?;
            rows.into_iter().map(row_to_receive).collect()
        })
        .await
    }
}

fn to_new_row(receive: &Receive) -> ReceiveRepositoryResult<NewReceiveRow> {
    let reference_number = i64::try_from(receive.reference_number().value().value())
        .map_err(ReceiveRepositoryError::persistence)?;

    Ok(NewReceiveRow {
        id: receive.id().into_inner(),
        reference_number,
        disposition: receive.disposition().as_str().to_owned(),
        created_by: receive.created_by().into_inner(),
        closed_by: receive.closed_by().map(UserId::into_inner),
        closed_at: receive.closed_at(),
        created_at: receive.created_at(),
        updated_at: receive.updated_at(),
    })
}

fn row_to_receive(row: ReceiveRow) -> ReceiveRepositoryResult<Receive> {
    let disposition = ReceiveDisposition::try_from(row.disposition.as_str())
        .map_err(ReceiveRepositoryError::persistence)?;
    let reference_value =
        u64::try_from(row.reference_number).map_err(ReceiveRepositoryError::persistence)?;

    Ok(Receive::from_persisted(PersistedReceiveData {
        id: ReceiveId::from_uuid(row.id),
        reference_number: ReferenceNumber::new(
            SequenceDomain::Receive,
            SequenceValue::new(reference_value),
        ),
        disposition,
        created_by: UserId::from_uuid(row.created_by),
        closed_by: row.closed_by.map(UserId::from_uuid),
        closed_at: row.closed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
