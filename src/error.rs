use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the debate metadata table
///
/// Every variant aborts the load; metadata is never partially accepted.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to read metadata file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unreadable metadata table")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: expected {expected} columns, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row}: invalid order {value:?}")]
    InvalidOrder { row: usize, value: String },

    #[error("Row {row}: unrecognized date {value:?}")]
    InvalidDate { row: usize, value: String },

    #[error("Debate exists: {0}")]
    DuplicateDebate(String),
}
