mod config;
mod chat_message;
mod healthcheck;
mod api_response;

pub use self::config::*;
pub use self::chat_message::*;
pub use self::healthcheck::*;
pub use self::api_response::*;
