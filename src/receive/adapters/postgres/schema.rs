//! Diesel schema for receive persistence.

diesel::table! {
    /// Intake-ledger records.
    receives (id) {
        /// Receive identifier.
        id -> Uuid,
        /// Reference number issued at creation; unique per domain.
        reference_number -> Int8,
        /// Stored disposition (`open` or `closed`).
        #[max_length = 50]
        disposition -> Varchar,
        /// Creating user.
        created_by -> Uuid,
        /// Closing user, set iff closed.
        closed_by -> Nullable<Uuid>,
        /// Closing timestamp, set iff closed.
        closed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last lifecycle timestamp.
        updated_at -> Timestamptz,
    }
}
