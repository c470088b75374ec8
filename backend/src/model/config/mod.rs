mod macros;
mod api;
mod app;
mod base;
mod chat;
mod relay;
mod resolver;

pub use self::api::*;
pub use self::app::*;
pub use self::base::*;
pub use self::chat::*;
pub use self::relay::*;
pub use self::resolver::*;
