// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown attribute: '{0}' is not present on every trade")]
    UnknownAttribute(String),

    #[error("Invalid trade: {reason}")]
    InvalidTrade { reason: String },

    #[error("Invalid direction '{0}', expected LONG or SHORT")]
    InvalidDirection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
