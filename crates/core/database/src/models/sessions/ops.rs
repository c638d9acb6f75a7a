use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use vohala_result::Result;

use crate::{Database, Session};

impl Database {
    /// Issue a session for the given user with a fresh random token
    pub async fn create_session(&self, user_id: i64) -> Result<Session> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();

        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (user_id, token, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(user_id)
        .bind(token)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await
        .map_err(|_| create_database_error!("insert", "sessions"))
    }
}
