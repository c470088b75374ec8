use std::error::Error;
use std::fmt::{Display, Formatter, Result};

#[macro_export]
macro_rules! notify_err {
    ($($arg:tt)*) => {
        $crate::error::MovieChatError::new($crate::error::MovieChatErrorKind::Notify, format!($($arg)*))
    };
}

pub use notify_err;

#[macro_export]
macro_rules! notify_err_res {
    ($($arg:tt)*) => {
        Err($crate::error::MovieChatError::new($crate::error::MovieChatErrorKind::Notify, format!($($arg)*)))
    };
}

pub use notify_err_res;

#[macro_export]
macro_rules! info_err {
    ($($arg:tt)*) => {
        $crate::error::MovieChatError::new($crate::error::MovieChatErrorKind::Info, format!($($arg)*))
    };
}

pub use info_err;

#[macro_export]
macro_rules! info_err_res {
    ($($arg:tt)*) => {
        Err($crate::error::MovieChatError::new($crate::error::MovieChatErrorKind::Info, format!($($arg)*)))
    };
}

pub use info_err_res;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MovieChatErrorKind {
    // log only
    Info,
    Notify, // surfaced to the user
}

#[derive(Debug)]
pub struct MovieChatError {
    pub kind: MovieChatErrorKind,
    pub message: String,
}

impl MovieChatError {
    pub const fn new(kind: MovieChatErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl Display for MovieChatError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "MovieChat error: {}", self.message)
    }
}

impl Error for MovieChatError {}
