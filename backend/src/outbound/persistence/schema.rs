//! Diesel table definitions. Must match `migrations/` exactly.

diesel::table! {
    /// Campus locations. `position` fixes iteration order.
    locations (id) {
        id -> Text,
        position -> Int4,
        name -> Text,
        lat -> Float8,
        lng -> Float8,
        direction -> Text,
    }
}

diesel::table! {
    /// Singleton college row keyed by id 1.
    college (id) {
        id -> Int4,
        name -> Text,
        lat -> Float8,
        lng -> Float8,
    }
}

diesel::table! {
    /// Registered accounts.
    accounts (id) {
        id -> Uuid,
        email -> Text,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}
