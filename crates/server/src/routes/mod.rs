use rocket::{Build, Rocket};

mod messages;
mod notifications;
mod root;

pub fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", routes![root::root])
        .mount(
            "/conversations",
            routes![messages::conversations_fetch::conversations_fetch],
        )
        .mount(
            "/messages",
            routes![
                messages::messages_fetch::messages_fetch,
                messages::message_send::message_send,
                messages::message_delete::message_delete,
            ],
        )
        .mount(
            "/notifications",
            routes![
                notifications::notifications_fetch::notifications_fetch,
                notifications::notification_read::notification_read,
                notifications::notifications_read_all::notifications_read_all,
                notifications::notification_delete::notification_delete,
            ],
        )
}
