use chrono::{DateTime, Utc};

auto_derived!(
    /// Authenticated session; issuance lives outside this service, the
    /// messaging core only consumes tokens
    #[derive(sqlx::FromRow)]
    pub struct Session {
        /// Unique id
        pub id: i64,
        /// User this session belongs to
        pub user_id: i64,
        /// Bearer token
        pub token: String,
        /// Time of issuance
        pub created_at: DateTime<Utc>,
    }
);
