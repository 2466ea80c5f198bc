use thiserror::Error;

/// Bad user input on the command line, reported with a pointer to `--help`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FlagError(pub String);

#[macro_export]
macro_rules! flag_error {
    ($($arg:tt)*) => {
        $crate::errors::FlagError(format!($($arg)*))
    };
}
