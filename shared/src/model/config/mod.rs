mod api;
mod base;
mod chat;
mod log;
mod paths;
mod relay;
mod resolver;

pub use self::api::*;
pub use self::base::*;
pub use self::chat::*;
pub use self::log::*;
pub use self::paths::*;
pub use self::relay::*;
pub use self::resolver::*;
