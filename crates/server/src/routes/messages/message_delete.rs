use rocket::State;
use rocket_empty::EmptyResponse;
use vohala_database::{Database, DeleteScope, User};
use vohala_result::Result;

/// # Delete Message
///
/// Soft-delete a message from the caller's view, or from both views with
/// `delete_for=everyone` (sender only; the content is blanked). Rows are
/// never physically removed.
#[delete("/<id>?<delete_for>")]
pub async fn message_delete(
    db: &State<Database>,
    user: User,
    id: i64,
    delete_for: Option<&str>,
) -> Result<EmptyResponse> {
    let message = db.fetch_message(id).await?;
    if message.sender_id != user.id && message.receiver_id != user.id {
        return Err(create_error!(MissingPermission {
            permission: "ViewMessage".to_string()
        }));
    }

    let scope = match delete_for {
        Some("everyone") => {
            if message.sender_id != user.id {
                return Err(create_error!(MissingPermission {
                    permission: "DeleteMessageForEveryone".to_string()
                }));
            }
            DeleteScope::Everyone
        }
        _ if message.sender_id == user.id => DeleteScope::Sender,
        _ => DeleteScope::Receiver,
    };

    db.set_message_deleted(message.id, scope)
        .await
        .map(|_| EmptyResponse)
}
