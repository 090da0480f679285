//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier assigned at creation time.
        id -> BigInt,
        /// Task title.
        title -> Text,
        /// Todo text.
        todo -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Deletion boundary, if any.
        deleted_at -> Nullable<Timestamptz>,
    }
}
