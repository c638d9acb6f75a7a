use rocket::State;
use rocket_empty::EmptyResponse;
use vohala_database::{Database, User};
use vohala_result::Result;

/// # Mark Notification Read
///
/// Mark one of the caller's notifications as read. Idempotent.
#[put("/<id>/read")]
pub async fn notification_read(db: &State<Database>, user: User, id: i64) -> Result<EmptyResponse> {
    let notification = db.fetch_notification(id).await?;
    if notification.user_id != user.id {
        return Err(create_error!(MissingPermission {
            permission: "ViewNotification".to_string()
        }));
    }

    db.set_notification_read(notification.id)
        .await
        .map(|_| EmptyResponse)
}
