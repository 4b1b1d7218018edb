//! Diesel schema for task persistence.

diesel::table! {
    /// Tasks on the board.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Trimmed, non-empty title.
        title -> Text,
        /// Board stage.
        stage -> Text,
        /// Ordering key within the stage.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
