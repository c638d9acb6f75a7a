use std::sync::Arc;

use rocket::serde::json::Json;
use rocket::State;
use vohala_database::{ConversationEntry, Database, User};
use vohala_result::Result;

use crate::publish::Publisher;

/// # Fetch Conversations
///
/// Fetch the caller's conversation list: one entry per counterpart they have
/// exchanged messages with, newest activity first. The online flag comes from
/// the live presence registry, not from the stored mirror.
#[get("/")]
pub async fn conversations_fetch(
    db: &State<Database>,
    publisher: &State<Arc<Publisher>>,
    user: User,
) -> Result<Json<Vec<ConversationEntry>>> {
    let mut conversations = db.fetch_conversations(user.id).await?;

    let counterparts: Vec<i64> = conversations.iter().map(|entry| entry.id).collect();
    let online = publisher.presence().filter_online(&counterparts);
    for entry in &mut conversations {
        entry.is_online = online.contains(&entry.id);
    }

    Ok(Json(conversations))
}
