use thiserror::Error;

use tableschema_model::{SchemaError, SourceError};

#[derive(Debug, Error)]
pub enum InferError {
    /// `row` is the 1-based position of the sampled row.
    #[error("data is not tabular: row {row} has {actual} cell(s), expected {expected}")]
    TabularShape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("row source failed: {0}")]
    Source(#[source] SourceError),

    #[error("inferred schema is invalid: {0}")]
    Schema(#[from] SchemaError),
}

pub type Result<T> = std::result::Result<T, InferError>;
