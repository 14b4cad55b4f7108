//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; Diesel uses
//! them for compile-time query validation and SQL generation.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 32 characters).
        username -> Varchar,
        /// Argon2 PHC-format credential hash.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published articles.
    articles (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Article headline (max 200 characters).
        title -> Varchar,
        /// Article body text.
        body -> Text,
        /// Owning author; never reassigned.
        author_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last-edit timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reader comments; removed by cascade with their article.
    comments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Parent article (ON DELETE CASCADE).
        article_id -> Uuid,
        /// Comment author.
        author_id -> Uuid,
        /// Comment body text.
        body -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(articles -> users (author_id));
diesel::joinable!(comments -> articles (article_id));

diesel::allow_tables_to_appear_in_same_query!(users, articles, comments);
