use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use tokio::sync::mpsc::UnboundedSender;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use vohala_database::events::client::EventV1;
use vohala_presence::PresenceRegistry;

/// Write half of a gateway connection.
pub type Tx = UnboundedSender<WsMessage>;

/// Fan-out point for protocol events.
///
/// Every accepted socket registers its write channel here; identified sockets
/// additionally claim their user's slot in the presence registry. REST
/// handlers and the gateway both publish through this struct and never touch
/// sockets directly.
pub struct Publisher {
    connections: DashMap<usize, Tx>,
    presence: PresenceRegistry<Tx>,
    counter: AtomicUsize,
}

impl Publisher {
    pub fn new() -> Publisher {
        Publisher {
            connections: DashMap::new(),
            presence: PresenceRegistry::new(),
            counter: AtomicUsize::new(0),
        }
    }

    pub fn presence(&self) -> &PresenceRegistry<Tx> {
        &self.presence
    }

    /// Track a freshly accepted connection for broadcasts.
    pub fn register_connection(&self, tx: Tx) -> usize {
        let id = self.counter.fetch_add(1, Ordering::Relaxed);
        self.connections.insert(id, tx);
        id
    }

    pub fn unregister_connection(&self, id: usize) {
        self.connections.remove(&id);
    }

    pub fn is_online(&self, user_id: i64) -> bool {
        self.presence.is_online(user_id)
    }

    /// Push an event to a user if they are connected. Delivery is best
    /// effort; offline users and closed channels are skipped silently.
    pub fn send_to_user(&self, user_id: i64, event: &EventV1) {
        if let Some(frame) = encode(event) {
            if let Some(tx) = self.presence.lookup(user_id) {
                if tx.send(frame).is_err() {
                    debug!("Dropped event for user {user_id}, channel closed.");
                }
            }
        }
    }

    /// Push an event to every open connection, identified or not.
    pub fn broadcast(&self, event: &EventV1) {
        if let Some(frame) = encode(event) {
            for entry in self.connections.iter() {
                entry.value().send(frame.clone()).ok();
            }
        }
    }
}

impl Default for Publisher {
    fn default() -> Publisher {
        Publisher::new()
    }
}

fn encode(event: &EventV1) -> Option<WsMessage> {
    match serde_json::to_string(event) {
        Ok(text) => Some(WsMessage::Text(text)),
        Err(error) => {
            warn!("Failed to serialise event: {error}");
            None
        }
    }
}
