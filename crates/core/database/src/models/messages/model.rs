use chrono::{DateTime, Utc};

auto_derived!(
    /// Kind of media attached to a message
    #[derive(Copy, Eq, sqlx::Type)]
    #[sqlx(rename_all = "lowercase")]
    #[serde(rename_all = "lowercase")]
    pub enum MediaType {
        Image,
        Video,
    }

    /// Direct message between two users
    #[derive(sqlx::FromRow)]
    pub struct Message {
        /// Unique id, monotonically increasing; doubles as the ordering key
        pub id: i64,
        /// Id of the author
        pub sender_id: i64,
        /// Id of the recipient
        pub receiver_id: i64,
        /// Text content, blanked when deleted for everyone
        pub content: String,
        /// URL of attached media, uploaded out of band
        pub media_url: Option<String>,
        /// Kind of attached media
        pub media_type: Option<MediaType>,
        /// Whether the receiver has seen this message
        pub is_read: bool,
        /// Hidden from the sender's view
        pub deleted_for_sender: bool,
        /// Hidden from the receiver's view
        pub deleted_for_receiver: bool,
        /// Hidden from both views, content blanked
        pub deleted_for_everyone: bool,
        /// Time of creation
        pub created_at: DateTime<Utc>,
    }

    /// One row of the derived conversation list: the latest visible message
    /// per distinct counterpart, with counterpart profile columns and the
    /// caller's unread count
    #[derive(sqlx::FromRow)]
    pub struct ConversationEntry {
        /// Counterpart user id
        pub id: i64,
        pub username: String,
        pub name: String,
        pub avatar: Option<String>,
        pub is_online: bool,
        pub last_seen: Option<DateTime<Utc>>,

        pub last_message_id: i64,
        pub last_message: String,
        pub last_message_time: DateTime<Utc>,
        pub last_sender_id: i64,
        pub last_media_type: Option<MediaType>,

        /// Unread messages from this counterpart to the caller
        pub unread_count: i64,
    }
);

/// Which view a message deletion applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    Sender,
    Receiver,
    Everyone,
}
