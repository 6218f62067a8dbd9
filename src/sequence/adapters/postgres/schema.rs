//! Diesel schema for sequence counter persistence.

diesel::table! {
    /// Domain-keyed monotonic counters.
    sequence_counters (name) {
        /// Counter domain key.
        #[max_length = 50]
        name -> Varchar,
        /// Last issued value.
        value -> Int8,
    }
}
