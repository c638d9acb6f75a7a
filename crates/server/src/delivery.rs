//! Bridges durable writes to realtime pushes.
//!
//! Persistence always happens first; a push is attempted exactly once per
//! write and its failure never bubbles back into the request.

use vohala_database::events::client::EventV1;
use vohala_database::{Database, Message, Notification, NotificationKind, User};
use vohala_result::Result;

use crate::publish::Publisher;

/// Push a freshly persisted message to its receiver.
pub fn push_message(publisher: &Publisher, message: &Message) {
    publisher.send_to_user(message.receiver_id, &EventV1::Message(message.clone()));
}

/// Tell a message's sender that `read_by` has read everything they sent.
pub fn push_messages_read(publisher: &Publisher, sender_id: i64, read_by: i64) {
    publisher.send_to_user(sender_id, &EventV1::MessagesRead { read_by });
}

/// Persist a notification for `user_id` about something `actor` did, then
/// push it to them if they are connected.
///
/// Users never receive notifications for their own actions; in that case no
/// row is written and `Ok(None)` is returned.
pub async fn queue_notification(
    db: &Database,
    publisher: &Publisher,
    user_id: i64,
    actor: &User,
    kind: NotificationKind,
    entity_id: Option<i64>,
    entity_type: Option<&str>,
    text: &str,
) -> Result<Option<Notification>> {
    if user_id == actor.id {
        return Ok(None);
    }

    let notification = db
        .insert_notification(user_id, actor.id, kind, entity_id, entity_type, text)
        .await?;

    publisher.send_to_user(user_id, &EventV1::Notification(notification.clone()));
    Ok(Some(notification))
}
