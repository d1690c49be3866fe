//! Row and table level failures.

use thiserror::Error;

use tableschema_model::{CastError, EncodeError, SourceError};

/// Why a single row could not be cast or encoded.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("row has {actual} cell(s) but the schema has {expected} field(s)")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("field {field:?}: {source}")]
    Cast {
        field: String,
        #[source]
        source: CastError,
    },

    #[error("field {field:?} is required but the cell is missing")]
    Required { field: String },

    #[error("field {field:?}: cannot store a {found} value in {target}")]
    Assign {
        field: String,
        found: &'static str,
        target: &'static str,
    },

    #[error("field {field:?}: {source}")]
    Encode {
        field: String,
        #[source]
        source: EncodeError,
    },

    /// Uniqueness violation for a primary key or `unique` field.
    #[error("field {field:?} duplicates value {value:?} from an earlier row")]
    Duplicate { field: String, value: String },
}

impl RowError {
    pub(crate) fn from_cast(field: &str, err: CastError) -> Self {
        match err {
            CastError::Required => RowError::Required {
                field: field.to_string(),
            },
            source => RowError::Cast {
                field: field.to_string(),
                source,
            },
        }
    }
}

/// A batch operation stopped early.
#[derive(Debug, Error)]
pub enum TableError {
    /// Row failure under fail-fast casting, or any failure while encoding.
    /// `row_index` is 1-based.
    #[error("row {row_index}: {source}")]
    Row {
        row_index: usize,
        #[source]
        source: RowError,
    },

    #[error("row source failed: {0}")]
    Source(#[source] SourceError),

    #[error("schema has no field named {name:?}")]
    UnknownField { name: String },
}

/// Best-effort report: every row that failed, in source order.
#[derive(Debug, Default, Error)]
#[error("{} row(s) failed to cast", .errors.len())]
pub struct ConversionError {
    pub errors: Vec<RowConversionError>,
}

impl ConversionError {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

#[derive(Debug, Error)]
#[error("row {row_index}: {cause}")]
pub struct RowConversionError {
    /// 1-based position of the data row in the source.
    pub row_index: usize,
    #[source]
    pub cause: RowError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_cast_error_becomes_row_error() {
        let err = RowError::from_cast("ID", CastError::Required);
        assert!(matches!(err, RowError::Required { ref field } if field == "ID"));
    }

    #[test]
    fn report_message_counts_rows() {
        let report = ConversionError {
            errors: vec![RowConversionError {
                row_index: 2,
                cause: RowError::LengthMismatch {
                    expected: 3,
                    actual: 2,
                },
            }],
        };
        assert_eq!(report.to_string(), "1 row(s) failed to cast");
        assert_eq!(
            report.errors[0].to_string(),
            "row 2: row has 2 cell(s) but the schema has 3 field(s)"
        );
    }
}
