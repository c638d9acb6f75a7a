pub mod conversations_fetch;
pub mod message_delete;
pub mod message_send;
pub mod messages_fetch;
