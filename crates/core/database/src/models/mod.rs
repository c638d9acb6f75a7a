mod messages;
mod notifications;
mod sessions;
mod users;

pub use messages::*;
pub use notifications::*;
pub use sessions::*;
pub use users::*;
