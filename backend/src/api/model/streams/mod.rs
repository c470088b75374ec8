mod relay_stream;

pub use self::relay_stream::*;
