//! Error types shared by the casting, schema and inference crates.

use thiserror::Error;

use crate::field_type::FieldType;

/// A raw cell failed to parse as its field type or violated a constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
    #[error("invalid {field_type} value {value:?}: {reason}")]
    InvalidValue {
        field_type: FieldType,
        value: String,
        reason: String,
    },

    #[error("format {format:?} is not supported for {field_type} fields")]
    UnsupportedFormat {
        field_type: FieldType,
        format: String,
    },

    #[error("value {value:?} is above the maximum {maximum:?}")]
    AboveMaximum { value: String, maximum: String },

    #[error("value {value:?} is below the minimum {minimum:?}")]
    BelowMinimum { value: String, minimum: String },

    /// The value has no order relative to a declared bound, e.g. `NaN`.
    #[error("value {value:?} cannot be compared with the bound {bound:?}")]
    Unordered { value: String, bound: String },

    /// A `minimum`/`maximum` bound could not be parsed with the field's format.
    #[error("invalid constraint bound {bound:?}: {reason}")]
    InvalidBound { bound: String, reason: String },

    #[error("length {length} is shorter than minLength {min_length}")]
    TooShort { length: usize, min_length: usize },

    #[error("length {length} is longer than maxLength {max_length}")]
    TooLong { length: usize, max_length: usize },

    #[error("value {value:?} does not match pattern {pattern:?}")]
    PatternMismatch { value: String, pattern: String },

    #[error("value {value:?} is not one of the enumerated values")]
    NotInEnum { value: String },

    #[error("a value is required")]
    Required,
}

/// A native value could not be rendered as its field's canonical text.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cannot encode a {found} value into a {field_type} field")]
    IncompatibleValue {
        field_type: FieldType,
        found: &'static str,
    },

    #[error("invalid {field_type} value {value:?}: {reason}")]
    InvalidValue {
        field_type: FieldType,
        value: String,
        reason: String,
    },

    #[error("format {format:?} is not supported for {field_type} fields")]
    UnsupportedFormat {
        field_type: FieldType,
        format: String,
    },

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Descriptor parsing and schema validation failures.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("malformed schema descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("field at index {index} has no name")]
    MissingFieldName { index: usize },

    #[error("primary key references unknown field {name:?}")]
    UnknownPrimaryKey { name: String },

    #[error("foreign key references unknown field {name:?}")]
    UnknownForeignKey { name: String },

    #[error(
        "foreign key has {fields} field(s) but its reference has {reference} field(s)"
    )]
    ForeignKeyArity { fields: usize, reference: usize },

    #[error("invalid pattern for field {field:?}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid enum value {value:?} for field {field:?}: {reason}")]
    InvalidEnum {
        field: String,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = CastError::InvalidValue {
            field_type: FieldType::Integer,
            value: "abc".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), r#"invalid integer value "abc": not a number"#);

        let err = SchemaError::ForeignKeyArity {
            fields: 2,
            reference: 1,
        };
        assert_eq!(
            err.to_string(),
            "foreign key has 2 field(s) but its reference has 1 field(s)"
        );
    }
}
