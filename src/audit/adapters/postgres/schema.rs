//! Diesel schema for audit log persistence.

diesel::table! {
    /// Append-only audit entries.
    audit_logs (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Weak task reference; not a foreign key.
        task_id -> Nullable<Uuid>,
        /// Event name.
        action_string -> Text,
        /// Event document.
        payload -> Nullable<Jsonb>,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}
