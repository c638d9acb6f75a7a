//! Events received from clients over the realtime gateway.

use crate::events::client::Ping;
use crate::Message;

auto_derived!(
    /// Message sent by a client to the server
    #[serde(tag = "type")]
    pub enum ClientMessage {
        /// Bind this connection to the session's user.
        ///
        /// The token is resolved server-side; clients cannot assert an
        /// arbitrary identity.
        Authenticate { token: String },

        /// Caller started typing to `recipient`; routed 1:1, never broadcast
        BeginTyping { recipient: i64 },

        /// Caller stopped typing to `recipient`
        EndTyping { recipient: i64 },

        /// Caller read their conversation with `sender`; acks to the sender
        MessageRead { sender: i64 },

        /// Optimistic client-side echo relay; authoritative persistence
        /// happens over REST, not through this channel
        SendMessage { recipient: i64, message: Message },

        /// Legacy grouping construct; accepted and ignored
        JoinRoom { room: String },

        /// Legacy grouping construct; accepted and ignored
        LeaveRoom { room: String },

        /// Heartbeat
        Ping { data: Ping },
    }
);

#[cfg(test)]
mod tests {
    use super::ClientMessage;

    #[test]
    fn decodes_tagged_payloads() {
        let message: ClientMessage =
            serde_json::from_str(r#"{"type":"BeginTyping","recipient":2}"#).unwrap();
        assert!(matches!(
            message,
            ClientMessage::BeginTyping { recipient: 2 }
        ));

        let message: ClientMessage =
            serde_json::from_str(r#"{"type":"Authenticate","token":"abc"}"#).unwrap();
        assert!(matches!(message, ClientMessage::Authenticate { .. }));
    }
}
