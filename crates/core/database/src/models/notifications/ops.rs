use chrono::Utc;
use vohala_result::Result;

use crate::{Database, Notification, NotificationEntry, NotificationKind};

impl Database {
    /// Insert a notification, returning the stored row
    pub async fn insert_notification(
        &self,
        user_id: i64,
        actor_id: i64,
        kind: NotificationKind,
        entity_id: Option<i64>,
        entity_type: Option<&str>,
        message: &str,
    ) -> Result<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, actor_id, type, entity_id, entity_type, message, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(user_id)
        .bind(actor_id)
        .bind(kind)
        .bind(entity_id)
        .bind(entity_type)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await
        .map_err(|_| create_database_error!("insert", "notifications"))
    }

    /// Fetch a notification by its id
    pub async fn fetch_notification(&self, id: i64) -> Result<Notification> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|_| create_database_error!("fetch", "notifications"))?
            .ok_or_else(|| create_error!(UnknownNotification))
    }

    /// Fetch one page of a user's feed, newest first, actor profile joined
    pub async fn fetch_notifications(
        &self,
        user_id: i64,
        page: i64,
        limit: i64,
    ) -> Result<Vec<NotificationEntry>> {
        let offset = (page.max(1) - 1) * limit;

        sqlx::query_as::<_, NotificationEntry>(
            "SELECT n.*, u.name AS actor_name, u.username AS actor_username,
                    u.avatar AS actor_avatar
             FROM notifications n
             JOIN users u ON u.id = n.actor_id
             WHERE n.user_id = ?
             ORDER BY n.id DESC LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(|_| create_database_error!("fetch", "notifications"))
    }

    /// Count a user's unread notifications
    pub async fn count_unread_notifications(&self, user_id: i64) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0",
        )
        .bind(user_id)
        .fetch_one(self.pool())
        .await
        .map_err(|_| create_database_error!("fetch", "notifications"))
    }

    /// Mark a single notification as read
    pub async fn set_notification_read(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update", "notifications"))
    }

    /// Mark a user's entire feed as read
    pub async fn set_all_notifications_read(&self, user_id: i64) -> Result<()> {
        sqlx::query("UPDATE notifications SET is_read = 1 WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update", "notifications"))
    }

    /// Delete a notification
    pub async fn delete_notification(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM notifications WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("delete", "notifications"))
    }
}
