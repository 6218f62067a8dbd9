//! Diesel row models for receive persistence.

use super::schema::receives;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for receive records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = receives)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReceiveRow {
    /// Receive identifier.
    pub id: uuid::Uuid,
    /// Reference number.
    pub reference_number: i64,
    /// Stored disposition.
    pub disposition: String,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Closing user, if closed.
    pub closed_by: Option<uuid::Uuid>,
    /// Closing timestamp, if closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for receive records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = receives)]
pub struct NewReceiveRow {
    /// Receive identifier.
    pub id: uuid::Uuid,
    /// Reference number.
    pub reference_number: i64,
    /// Stored disposition.
    pub disposition: String,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Closing user, if closed.
    pub closed_by: Option<uuid::Uuid>,
    /// Closing timestamp, if closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for disposition updates; closure fields always travel with the
/// disposition so they set and clear in the same write.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = receives)]
pub struct ReceiveDispositionChangeset {
    /// New disposition.
    pub disposition: String,
    /// New closing user (cleared when reopening).
    pub closed_by: Option<Option<uuid::Uuid>>,
    /// New closing timestamp (cleared when reopening).
    pub closed_at: Option<Option<DateTime<Utc>>>,
    /// New lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}
