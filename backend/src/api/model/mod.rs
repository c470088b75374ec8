mod app_state;
mod chat_command;
mod chat_room;
mod proxy_error;
mod relay;
mod streams;

pub use self::app_state::*;
pub use self::chat_command::*;
pub use self::chat_room::*;
pub use self::proxy_error::*;
pub use self::relay::*;
pub use self::streams::*;
