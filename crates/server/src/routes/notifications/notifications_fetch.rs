use rocket::serde::json::Json;
use rocket::State;
use vohala_database::{Database, NotificationPage, User};
use vohala_result::Result;

/// # Fetch Notifications
///
/// Fetch one page of the caller's notification feed, newest first, with the
/// actor's profile joined in and a total unread count.
#[get("/?<page>")]
pub async fn notifications_fetch(
    db: &State<Database>,
    user: User,
    page: Option<i64>,
) -> Result<Json<NotificationPage>> {
    let limit = vohala_config::config().features.limits.notification_page_size;
    let notifications = db
        .fetch_notifications(user.id, page.unwrap_or(1), limit)
        .await?;
    let unread_count = db.count_unread_notifications(user.id).await?;

    Ok(Json(NotificationPage {
        notifications,
        unread_count,
    }))
}

#[cfg(test)]
mod test {
    use crate::util::test::TestHarness;
    use rocket::http::{Header, Status};
    use vohala_database::{NotificationKind, NotificationPage};

    #[rocket::async_test]
    async fn success_fetch_feed_with_actor_profile() {
        let harness = TestHarness::new().await;
        let (ada, session) = harness.new_user("ada").await;
        let (brian, _) = harness.new_user("brian").await;

        harness
            .db
            .insert_notification(
                ada.id,
                brian.id,
                NotificationKind::Message,
                Some(brian.id),
                Some("user"),
                "brian sent you a message",
            )
            .await
            .unwrap();
        harness
            .db
            .insert_notification(
                ada.id,
                brian.id,
                NotificationKind::FriendRequest,
                None,
                None,
                "brian sent you a friend request",
            )
            .await
            .unwrap();

        let response = harness
            .get("/notifications")
            .header(Header::new("x-session-token", session.token.clone()))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let page: NotificationPage = response.into_json().await.expect("`NotificationPage`");
        assert_eq!(page.unread_count, 2);
        assert_eq!(page.notifications.len(), 2);
        // Newest first, actor profile joined.
        assert_eq!(
            page.notifications[0].notification.message,
            "brian sent you a friend request"
        );
        assert_eq!(page.notifications[0].actor_username, "brian");
    }

    #[rocket::async_test]
    async fn success_feed_is_scoped_to_owner() {
        let harness = TestHarness::new().await;
        let (ada, _) = harness.new_user("ada").await;
        let (brian, session) = harness.new_user("brian").await;

        harness
            .db
            .insert_notification(
                ada.id,
                brian.id,
                NotificationKind::Message,
                None,
                None,
                "brian sent you a message",
            )
            .await
            .unwrap();

        let response = harness
            .get("/notifications")
            .header(Header::new("x-session-token", session.token.clone()))
            .dispatch()
            .await;
        let page: NotificationPage = response.into_json().await.expect("`NotificationPage`");
        assert!(page.notifications.is_empty());
        assert_eq!(page.unread_count, 0);
    }
}
