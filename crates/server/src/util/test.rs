use std::ops::Deref;
use std::sync::Arc;

use rocket::local::asynchronous::Client;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use vohala_database::events::client::EventV1;
use vohala_database::{Database, Session, User};

use crate::publish::Publisher;

pub struct TestHarness {
    client: Client,
    pub db: Database,
    pub publisher: Arc<Publisher>,
}

impl TestHarness {
    pub async fn new() -> TestHarness {
        let db = Database::open_in_memory().await.expect("valid database");
        let publisher = Arc::new(Publisher::new());
        let client = Client::tracked(crate::web(db.clone(), Arc::clone(&publisher)).await)
            .await
            .expect("valid rocket instance");

        TestHarness {
            client,
            db,
            publisher,
        }
    }

    pub async fn new_user(&self, username: &str) -> (User, Session) {
        let user = self
            .db
            .create_user(username, username)
            .await
            .expect("`User`");
        let session = self.db.create_session(user.id).await.expect("`Session`");
        (user, session)
    }

    /// Bind a fake realtime connection for a user, returning the stream of
    /// frames the server pushes to them.
    pub fn connect(&self, user: &User) -> mpsc::UnboundedReceiver<WsMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.publisher.presence().set_online(user.id, tx);
        rx
    }

    /// Pop the next pushed event, if any frame is waiting.
    pub fn next_event(rx: &mut mpsc::UnboundedReceiver<WsMessage>) -> Option<EventV1> {
        match rx.try_recv() {
            Ok(WsMessage::Text(text)) => serde_json::from_str(&text).ok(),
            _ => None,
        }
    }
}

impl Deref for TestHarness {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}
