use chrono::{DateTime, Utc};

auto_derived!(
    /// User profile, the subset of columns consumed by the messaging core
    #[derive(sqlx::FromRow)]
    pub struct User {
        /// Unique id
        pub id: i64,
        /// Unique username
        pub username: String,
        /// Display name
        pub name: String,
        /// Avatar URL
        pub avatar: Option<String>,
        /// Read-model mirror of the presence registry
        pub is_online: bool,
        /// Last time this user connected or disconnected
        pub last_seen: Option<DateTime<Utc>>,
        /// Time of account creation
        pub created_at: DateTime<Utc>,
    }
);
