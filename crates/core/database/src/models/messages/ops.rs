use chrono::Utc;
use vohala_result::Result;

use crate::{ConversationEntry, Database, DeleteScope, MediaType, Message};

impl Database {
    /// Insert a new message, returning the stored row
    pub async fn insert_message(
        &self,
        sender_id: i64,
        receiver_id: i64,
        content: &str,
        media_url: Option<&str>,
        media_type: Option<MediaType>,
    ) -> Result<Message> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (sender_id, receiver_id, content, media_url, media_type, created_at)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(content)
        .bind(media_url)
        .bind(media_type)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await
        .map_err(|_| create_database_error!("insert", "messages"))
    }

    /// Fetch a message by its id
    pub async fn fetch_message(&self, id: i64) -> Result<Message> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|_| create_database_error!("fetch", "messages"))?
            .ok_or_else(|| create_error!(UnknownMessage))
    }

    /// Fetch a page of the conversation between `user_id` and `other_id` as
    /// seen by `user_id`, oldest first.
    ///
    /// `before` paginates backward by message id.
    pub async fn fetch_messages_between(
        &self,
        user_id: i64,
        other_id: i64,
        before: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Message>> {
        let mut messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages
             WHERE ((sender_id = ?1 AND receiver_id = ?2 AND deleted_for_sender = 0)
                 OR (sender_id = ?2 AND receiver_id = ?1 AND deleted_for_receiver = 0))
               AND deleted_for_everyone = 0
               AND (?3 IS NULL OR id < ?3)
             ORDER BY id DESC LIMIT ?4",
        )
        .bind(user_id)
        .bind(other_id)
        .bind(before)
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(|_| create_database_error!("fetch", "messages"))?;

        messages.reverse();
        Ok(messages)
    }

    /// Mark every unread message from `sender_id` to `receiver_id` as read,
    /// returning how many rows flipped
    pub async fn mark_messages_read(&self, sender_id: i64, receiver_id: i64) -> Result<u64> {
        sqlx::query(
            "UPDATE messages SET is_read = 1
             WHERE sender_id = ? AND receiver_id = ? AND is_read = 0",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .execute(self.pool())
        .await
        .map(|result| result.rows_affected())
        .map_err(|_| create_database_error!("update", "messages"))
    }

    /// Apply a soft delete to a message.
    ///
    /// `Everyone` additionally blanks the content; the row itself is never
    /// physically removed.
    pub async fn set_message_deleted(&self, id: i64, scope: DeleteScope) -> Result<()> {
        let query = match scope {
            DeleteScope::Sender => "UPDATE messages SET deleted_for_sender = 1 WHERE id = ?",
            DeleteScope::Receiver => "UPDATE messages SET deleted_for_receiver = 1 WHERE id = ?",
            DeleteScope::Everyone => {
                "UPDATE messages SET deleted_for_everyone = 1, content = '' WHERE id = ?"
            }
        };

        sqlx::query(query)
            .bind(id)
            .execute(self.pool())
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update", "messages"))
    }

    /// Derive the conversation list for a user: the latest message per
    /// distinct counterpart still visible to them, newest conversation
    /// first. Equal timestamps tiebreak on message id.
    pub async fn fetch_conversations(&self, user_id: i64) -> Result<Vec<ConversationEntry>> {
        sqlx::query_as::<_, ConversationEntry>(
            "SELECT u.id, u.username, u.name, u.avatar, u.is_online, u.last_seen,
                    m.id AS last_message_id, m.content AS last_message,
                    m.created_at AS last_message_time, m.sender_id AS last_sender_id,
                    m.media_type AS last_media_type,
                    (SELECT COUNT(*) FROM messages
                      WHERE sender_id = u.id AND receiver_id = ?1
                        AND is_read = 0 AND deleted_for_receiver = 0
                        AND deleted_for_everyone = 0) AS unread_count
             FROM messages m
             JOIN users u
               ON u.id = CASE WHEN m.sender_id = ?1 THEN m.receiver_id ELSE m.sender_id END
             WHERE m.id = (
                 SELECT m2.id FROM messages m2
                  WHERE ((m2.sender_id = ?1 AND m2.receiver_id = u.id AND m2.deleted_for_sender = 0)
                      OR (m2.sender_id = u.id AND m2.receiver_id = ?1 AND m2.deleted_for_receiver = 0))
                    AND m2.deleted_for_everyone = 0
                  ORDER BY m2.id DESC LIMIT 1
             )
             ORDER BY m.id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .map_err(|_| create_database_error!("fetch", "messages"))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DeleteScope, User};

    async fn fixture() -> (Database, User, User) {
        let db = Database::open_in_memory().await.unwrap();
        let ada = db.create_user("ada", "Ada").await.unwrap();
        let brian = db.create_user("brian", "Brian").await.unwrap();
        (db, ada, brian)
    }

    #[tokio::test]
    async fn insert_then_fetch_round_trips() {
        let (db, ada, brian) = fixture().await;

        let first = db
            .insert_message(ada.id, brian.id, "hi", None, None)
            .await
            .unwrap();
        let second = db
            .insert_message(ada.id, brian.id, "there", None, None)
            .await
            .unwrap();
        assert!(second.id > first.id);

        let page = db
            .fetch_messages_between(brian.id, ada.id, None, 30)
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].content, "hi");
        assert_eq!(page[1].content, "there");
    }

    #[tokio::test]
    async fn pagination_pages_backward_before_an_id() {
        let (db, ada, brian) = fixture().await;

        for i in 0..5 {
            db.insert_message(ada.id, brian.id, &format!("m{i}"), None, None)
                .await
                .unwrap();
        }

        let newest = db
            .fetch_messages_between(brian.id, ada.id, None, 2)
            .await
            .unwrap();
        assert_eq!(newest.len(), 2);
        assert_eq!(newest[1].content, "m4");

        let older = db
            .fetch_messages_between(brian.id, ada.id, Some(newest[0].id), 2)
            .await
            .unwrap();
        assert_eq!(older.len(), 2);
        assert!(older.iter().all(|m| m.id < newest[0].id));
    }

    #[tokio::test]
    async fn mark_read_flips_only_unread_rows() {
        let (db, ada, brian) = fixture().await;

        db.insert_message(ada.id, brian.id, "one", None, None)
            .await
            .unwrap();
        db.insert_message(ada.id, brian.id, "two", None, None)
            .await
            .unwrap();

        assert_eq!(db.mark_messages_read(ada.id, brian.id).await.unwrap(), 2);
        // Second pass is a no-op; the caller uses this to skip the read push.
        assert_eq!(db.mark_messages_read(ada.id, brian.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn soft_delete_scopes_visibility_per_viewer() {
        let (db, ada, brian) = fixture().await;

        let message = db
            .insert_message(ada.id, brian.id, "secret", None, None)
            .await
            .unwrap();
        db.set_message_deleted(message.id, DeleteScope::Receiver)
            .await
            .unwrap();

        // Hidden from the receiver only.
        let receiver_view = db
            .fetch_messages_between(brian.id, ada.id, None, 30)
            .await
            .unwrap();
        assert!(receiver_view.is_empty());

        let sender_view = db
            .fetch_messages_between(ada.id, brian.id, None, 30)
            .await
            .unwrap();
        assert_eq!(sender_view.len(), 1);
        assert_eq!(sender_view[0].content, "secret");
    }

    #[tokio::test]
    async fn delete_for_everyone_blanks_content() {
        let (db, ada, brian) = fixture().await;

        let message = db
            .insert_message(ada.id, brian.id, "secret", None, None)
            .await
            .unwrap();
        db.set_message_deleted(message.id, DeleteScope::Everyone)
            .await
            .unwrap();

        let row = db.fetch_message(message.id).await.unwrap();
        assert!(row.deleted_for_everyone);
        assert_eq!(row.content, "");

        for viewer in [ada.id, brian.id] {
            let other = if viewer == ada.id { brian.id } else { ada.id };
            let view = db
                .fetch_messages_between(viewer, other, None, 30)
                .await
                .unwrap();
            assert!(view.is_empty());
        }
    }

    #[tokio::test]
    async fn conversations_list_latest_per_counterpart() {
        let (db, ada, brian) = fixture().await;
        let clara = db.create_user("clara", "Clara").await.unwrap();

        db.insert_message(ada.id, brian.id, "to brian", None, None)
            .await
            .unwrap();
        db.insert_message(clara.id, ada.id, "from clara", None, None)
            .await
            .unwrap();
        db.insert_message(brian.id, ada.id, "brian replies", None, None)
            .await
            .unwrap();

        let conversations = db.fetch_conversations(ada.id).await.unwrap();
        assert_eq!(conversations.len(), 2);

        // Newest conversation first; ids tiebreak equal timestamps.
        assert_eq!(conversations[0].id, brian.id);
        assert_eq!(conversations[0].last_message, "brian replies");
        assert_eq!(conversations[0].unread_count, 1);

        assert_eq!(conversations[1].id, clara.id);
        assert_eq!(conversations[1].unread_count, 1);
    }

    #[tokio::test]
    async fn conversations_respect_soft_delete() {
        let (db, ada, brian) = fixture().await;

        let message = db
            .insert_message(ada.id, brian.id, "only one", None, None)
            .await
            .unwrap();
        db.set_message_deleted(message.id, DeleteScope::Sender)
            .await
            .unwrap();

        // The sender no longer sees the conversation; the receiver still does.
        assert!(db.fetch_conversations(ada.id).await.unwrap().is_empty());
        assert_eq!(db.fetch_conversations(brian.id).await.unwrap().len(), 1);
    }
}
