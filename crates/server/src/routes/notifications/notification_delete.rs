use rocket::State;
use rocket_empty::EmptyResponse;
use vohala_database::{Database, User};
use vohala_result::Result;

/// # Delete Notification
///
/// Remove one of the caller's notifications. This is a hard delete; the feed
/// is disposable, unlike message history.
#[delete("/<id>")]
pub async fn notification_delete(
    db: &State<Database>,
    user: User,
    id: i64,
) -> Result<EmptyResponse> {
    let notification = db.fetch_notification(id).await?;
    if notification.user_id != user.id {
        return Err(create_error!(MissingPermission {
            permission: "ViewNotification".to_string()
        }));
    }

    db.delete_notification(notification.id)
        .await
        .map(|_| EmptyResponse)
}
