//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly.

diesel::table! {
    /// Registered users. `session_token_hash` holds the SHA-256 hex digest
    /// of the user's session token, never the token itself.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        session_token_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Meal diary entries.
    meals (id) {
        id -> Uuid,
        /// Insertion sequence; breaks ties between meals sharing a date.
        seq -> Int8,
        user_id -> Uuid,
        name -> Varchar,
        description -> Text,
        is_on_diet -> Bool,
        /// Epoch milliseconds.
        date -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(meals -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, meals);
