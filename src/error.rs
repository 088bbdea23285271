// src/error.rs

use thiserror::Error;

/// Failures raised while deriving merge rows from a term table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("no row with vbo_id {id:?} in table")]
    TermNotFound { id: String },

    #[error("column {column:?} missing from table header")]
    MissingColumn { column: String },

    #[error("cannot read issue number from {raw:?}")]
    InvalidIssue { raw: String },
}
