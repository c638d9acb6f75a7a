pub mod notification_delete;
pub mod notification_read;
pub mod notifications_fetch;
pub mod notifications_read_all;
