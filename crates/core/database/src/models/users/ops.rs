use chrono::Utc;
use vohala_result::Result;

use crate::{Database, User};

impl Database {
    /// Insert a new user into the database
    pub async fn create_user(&self, username: &str, name: &str) -> Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, name, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(username)
        .bind(name)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await
        .map_err(|_| create_database_error!("insert", "users"))
    }

    /// Fetch a user by their id
    pub async fn fetch_user(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|_| create_database_error!("fetch", "users"))?
            .ok_or_else(|| create_error!(UnknownUser))
    }

    /// Resolve a session token to its user
    pub async fn fetch_user_by_token(&self, token: &str) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u
             JOIN sessions s ON s.user_id = u.id
             WHERE s.token = ?",
        )
        .bind(token)
        .fetch_optional(self.pool())
        .await
        .map_err(|_| create_database_error!("fetch", "sessions"))?
        .ok_or_else(|| create_error!(InvalidSession))
    }

    /// Update the online read-model for a user, stamping `last_seen`
    pub async fn set_online_status(&self, id: i64, online: bool) -> Result<()> {
        sqlx::query("UPDATE users SET is_online = ?, last_seen = ? WHERE id = ?")
            .bind(online)
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update", "users"))
    }

    /// Clear the online read-model for every user.
    ///
    /// Run at process start: presence is process-local and a restart leaves
    /// stale `is_online` columns behind.
    pub async fn reset_presence(&self) -> Result<()> {
        sqlx::query("UPDATE users SET is_online = 0 WHERE is_online = 1")
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update", "users"))
    }
}
