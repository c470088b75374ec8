pub mod request;
pub mod classifier;
pub mod prober;

pub use self::request::*;
pub use self::classifier::*;
pub use self::prober::*;
