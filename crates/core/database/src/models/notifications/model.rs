use chrono::{DateTime, Utc};

auto_derived!(
    /// What a notification is about
    #[derive(Copy, Eq, sqlx::Type)]
    #[sqlx(rename_all = "snake_case")]
    #[serde(rename_all = "snake_case")]
    pub enum NotificationKind {
        Message,
        Reaction,
        Comment,
        FriendRequest,
        FriendAccept,
        Tag,
    }

    /// Entry in a user's notification feed
    #[derive(sqlx::FromRow)]
    pub struct Notification {
        /// Unique id
        pub id: i64,
        /// User this notification belongs to
        pub user_id: i64,
        /// User whose action produced it
        pub actor_id: i64,
        #[sqlx(rename = "type")]
        pub kind: NotificationKind,
        /// Id of the entity acted upon, if any
        pub entity_id: Option<i64>,
        /// Kind of the entity acted upon, e.g. "post" or "user"
        pub entity_type: Option<String>,
        /// Human-readable summary
        pub message: String,
        pub is_read: bool,
        pub created_at: DateTime<Utc>,
    }

    /// Notification joined with its actor's profile columns, as served by
    /// the feed endpoint
    #[derive(sqlx::FromRow)]
    pub struct NotificationEntry {
        #[sqlx(flatten)]
        #[serde(flatten)]
        pub notification: Notification,

        pub actor_name: String,
        pub actor_username: String,
        pub actor_avatar: Option<String>,
    }

    /// One page of the notification feed plus the total unread count
    pub struct NotificationPage {
        pub notifications: Vec<NotificationEntry>,
        pub unread_count: i64,
    }
);
