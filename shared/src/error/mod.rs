mod moviechat_error;

pub use self::moviechat_error::*;
