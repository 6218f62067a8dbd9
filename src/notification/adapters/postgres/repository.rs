//! `PostgreSQL` repository implementation for notification storage.

use super::{
    models::{NewNotificationRow, NotificationRow},
    schema::notifications,
};
use crate::access::domain::UserId;
use crate::notification::{
    domain::{Notification, NotificationId, NotificationKind, PersistedNotificationData},
    ports::{
        NotificationFilter, NotificationRepository, NotificationRepositoryError,
        NotificationRepositoryResult,
    },
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by notification adapters.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed notification repository.
#[derive(Debug, Clone)]
pub struct PostgresNotificationRepository {
    pool: NotificationPgPool,
}

impl PostgresNotificationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NotificationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationRepositoryError::persistence)?
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let id = notification.id();
        let new_row = to_new_row(notification);

        self.run_blocking(move |connection| {
            diesel::insert_into(notifications::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        NotificationRepositoryError::Duplicate(id)
                    }
                    _ => NotificationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        self.run_blocking(move |connection| {
            let row = notifications::table
                .filter(notifications::id.eq(id.into_inner()))
                .select(NotificationRow::as_select())
                .first::<NotificationRow>(connection)
                .optional()
                .map_err(NotificationRepositoryError::persistence)?;
            row.map(row_to_notification).transpose()
        })
        .await
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: NotificationFilter,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let limit = i64::try_from(filter.effective_limit())
            .map_err(NotificationRepositoryError::persistence)?;

        self.run_blocking(move |connection| {
            let mut query = notifications::table
                .filter(notifications::user_id.eq(user_id.into_inner()))
                .into_boxed();
            if filter.is_unread_only() {
                query = query.filter(notifications::read.eq(false));
            }

            let rows = query
                .order(notifications::created_at.desc())
                .limit(limit)
                .select(NotificationRow::as_select())
                .load::<NotificationRow>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            rows.into_iter().map(row_to_notification).collect()
        })
        .await
    }

    async fn unread_count(&self, user_id: UserId) -> NotificationRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = notifications::table
                .filter(notifications::user_id.eq(user_id.into_inner()))
                .filter(notifications::read.eq(false))
                .count()
                .get_result(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            Ok(u64::try_from(count).unwrap_or(0))
        })
        .await
    }

    async fn set_read(
        &self,
        id: NotificationId,
        read: bool,
    ) -> NotificationRepositoryResult<Notification> {
        self.run_blocking(move |connection| {
            let row = diesel::update(
                notifications::table.filter(notifications::id.eq(id.into_inner())),
            )
            .set(notifications::read.eq(read))
            .returning(NotificationRow::as_returning())
            .get_result::<NotificationRow>(connection)
            .optional()
            .map_err(NotificationRepositoryError::persistence)?
            .ok_or(NotificationRepositoryError::NotFound(id))?;
            row_to_notification(row)
        })
        .await
    }
}

fn to_new_row(notification: &Notification) -> NewNotificationRow {
    NewNotificationRow {
        id: notification.id().into_inner(),
        user_id: notification.user_id().into_inner(),
        task_id: notification.task_id().map(TaskId::into_inner),
        kind: notification.kind().as_str().to_owned(),
        message: notification.message().to_owned(),
        read: notification.is_read(),
        created_at: notification.created_at(),
    }
}

fn row_to_notification(row: NotificationRow) -> NotificationRepositoryResult<Notification> {
    let kind = NotificationKind::try_from(row.kind.as_str())
        .map_err(NotificationRepositoryError::persistence)?;

    Ok(Notification::from_persisted(PersistedNotificationData {
        id: NotificationId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        task_id: row.task_id.map(TaskId::from_uuid),
        kind,
        message: row.message,
        read: row.read,
        created_at: row.created_at,
    }))
}
