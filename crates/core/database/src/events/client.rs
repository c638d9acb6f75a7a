//! Events pushed to clients over the realtime gateway.
//!
//! This is a fixed, versioned contract: payloads are explicit tagged types,
//! independent of the storage rows' internal shape.

use crate::{Message, Notification};

auto_derived!(
    /// WebSocket client errors
    #[serde(tag = "error")]
    pub enum WebSocketError {
        LabelMe,
        InternalError { at: String },
        InvalidSession,
        AlreadyAuthenticated,
        MalformedData { msg: String },
    }

    /// Ping packet
    #[serde(untagged)]
    pub enum Ping {
        Binary(Vec<u8>),
        Number(usize),
    }

    /// Protocol events
    #[serde(tag = "type")]
    pub enum EventV1 {
        /// An error occurred on the connection
        Error(WebSocketError),

        /// Successfully authenticated
        Authenticated,

        /// Ping response
        Pong { data: Ping },

        /// A user's presence changed; broadcast to every connection
        UserStatus { user_id: i64, online: bool },

        /// New message; pushed to the receiver only
        Message(Message),

        /// New notification; pushed to its owner only
        Notification(Notification),

        /// A user started typing to the addressed recipient
        StartTyping { user_id: i64 },

        /// A user stopped typing to the addressed recipient
        StopTyping { user_id: i64 },

        /// The addressed user read the recipient's messages
        MessagesRead { read_by: i64 },
    }
);
