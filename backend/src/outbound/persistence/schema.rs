//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `username` carries a unique index.
    users (id) {
        id -> Uuid,
        /// Insertion order.
        seq -> Int8,
        username -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Logged exercises. `user_id` is checked when written, not constrained.
    exercises (id) {
        id -> Uuid,
        /// Insertion order.
        seq -> Int8,
        user_id -> Uuid,
        description -> Text,
        duration_minutes -> Float8,
        performed_on -> Date,
        created_at -> Timestamptz,
    }
}
