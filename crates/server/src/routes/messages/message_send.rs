use std::sync::Arc;

use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};
use validator::Validate;
use vohala_database::{Database, MediaType, Message, NotificationKind, User};
use vohala_result::Result;

use crate::delivery;
use crate::publish::Publisher;
use crate::util::ratelimit::Ratelimiter;

#[derive(Validate, Serialize, Deserialize, Debug)]
pub struct DataMessageSend {
    /// Message text; may be empty when media is attached
    pub content: Option<String>,
    /// URL of an attached media object
    #[validate(length(min = 1, max = 512))]
    pub media_url: Option<String>,
    /// Kind of the attached media
    pub media_type: Option<MediaType>,
}

/// # Send Message
///
/// Send a direct message to `target`. The stored row is returned, pushed to
/// the receiver if they are connected, and a notification is queued for them.
#[post("/<target>", data = "<data>")]
pub async fn message_send(
    db: &State<Database>,
    publisher: &State<Arc<Publisher>>,
    user: User,
    target: i64,
    data: Json<DataMessageSend>,
    _ratelimit: Ratelimiter,
) -> Result<Json<Message>> {
    let data = data.into_inner();
    data.validate()
        .map_err(|error| create_error!(FailedValidation {
            error: error.to_string()
        }))?;

    let content = data.content.unwrap_or_default();
    if content.len() > vohala_config::config().features.limits.message_length {
        return Err(create_error!(PayloadTooLarge));
    }
    if content.is_empty() && data.media_url.is_none() {
        return Err(create_error!(EmptyMessage));
    }

    let receiver = db.fetch_user(target).await?;
    let message = db
        .insert_message(
            user.id,
            receiver.id,
            &content,
            data.media_url.as_deref(),
            data.media_type,
        )
        .await?;

    delivery::push_message(publisher.inner(), &message);
    delivery::queue_notification(
        db,
        publisher.inner(),
        receiver.id,
        &user,
        NotificationKind::Message,
        Some(user.id),
        Some("user"),
        &format!("{} sent you a message", user.name),
    )
    .await?;

    Ok(Json(message))
}
