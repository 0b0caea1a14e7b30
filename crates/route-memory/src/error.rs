use hotkey_route::RouteError;
use thiserror::Error;

/// Errors that can occur in this crate.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// `incr` or `decr` on a value that is not a decimal number.
    #[error("value of key {key} is not numeric")]
    NotNumeric {
        /// The key of the offending value.
        key: String,
    },
}

impl RouteError for Error {}
