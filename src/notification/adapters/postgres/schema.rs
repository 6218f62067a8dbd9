//! Diesel schema for notification persistence.

diesel::table! {
    /// Per-user notification records.
    notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Recipient user identifier.
        user_id -> Uuid,
        /// Referenced task, if any.
        task_id -> Nullable<Uuid>,
        /// Notification category.
        #[max_length = 50]
        kind -> Varchar,
        /// Message text.
        message -> Text,
        /// Whether the recipient has read the notification.
        read -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
