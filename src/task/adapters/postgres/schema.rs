//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Record number issued at creation; unique per domain.
        record_number -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional priority reference.
        priority_id -> Nullable<Uuid>,
        /// Optional complexity reference.
        complexity_id -> Nullable<Uuid>,
        /// Optional workcenter reference.
        workcenter_id -> Nullable<Uuid>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Current assignee, if any.
        assigned_to -> Nullable<Uuid>,
        /// Creating user.
        created_by -> Uuid,
        /// Originating receive, if any.
        receive_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last lifecycle timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only lifecycle action log.
    task_actions (id) {
        /// Action identifier.
        id -> Uuid,
        /// Task reference.
        task_id -> Uuid,
        /// Action category.
        #[max_length = 50]
        kind -> Varchar,
        /// Acting user.
        actor_id -> Uuid,
        /// Forwarding or assignment target, if any.
        target_id -> Nullable<Uuid>,
        /// Event timestamp.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only field-level edit history.
    task_history (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Task reference.
        task_id -> Uuid,
        /// Edited field name.
        #[max_length = 50]
        field -> Varchar,
        /// Previous value.
        old_value -> Nullable<Text>,
        /// Replacement value.
        new_value -> Nullable<Text>,
        /// Acting user.
        actor_id -> Uuid,
        /// Edit timestamp.
        recorded_at -> Timestamptz,
    }
}
