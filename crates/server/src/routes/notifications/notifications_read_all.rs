use rocket::State;
use rocket_empty::EmptyResponse;
use vohala_database::{Database, User};
use vohala_result::Result;

/// # Mark All Notifications Read
///
/// Mark the caller's entire feed as read. Idempotent.
#[put("/read-all")]
pub async fn notifications_read_all(db: &State<Database>, user: User) -> Result<EmptyResponse> {
    db.set_all_notifications_read(user.id)
        .await
        .map(|_| EmptyResponse)
}
