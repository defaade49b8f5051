// In crates/data-loader/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read trade file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row}: {source}")]
    InvalidTrade {
        row: usize,
        #[source]
        source: core_types::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
