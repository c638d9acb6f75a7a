use std::sync::Arc;

use rocket::serde::json::Json;
use rocket::State;
use vohala_database::{Database, Message, User};
use vohala_result::Result;

use crate::delivery;
use crate::publish::Publisher;

/// # Fetch Messages
///
/// Fetch the caller's conversation with `target`, oldest first. Pass `before`
/// (a message id) to page backwards through history.
///
/// Opening a conversation reads it: everything `target` sent the caller is
/// marked read, and `target` is told so if they are connected.
#[get("/<target>?<before>&<limit>")]
pub async fn messages_fetch(
    db: &State<Database>,
    publisher: &State<Arc<Publisher>>,
    user: User,
    target: i64,
    before: Option<i64>,
    limit: Option<i64>,
) -> Result<Json<Vec<Message>>> {
    let page_size = vohala_config::config().features.limits.message_page_size;
    let limit = limit.unwrap_or(page_size).clamp(1, page_size);

    let other = db.fetch_user(target).await?;
    let messages = db
        .fetch_messages_between(user.id, other.id, before, limit)
        .await?;

    if db.mark_messages_read(other.id, user.id).await? > 0 {
        delivery::push_messages_read(publisher.inner(), other.id, user.id);
    }

    Ok(Json(messages))
}
