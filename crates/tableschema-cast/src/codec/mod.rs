//! Raw text to typed value conversion, one submodule per type family.
//!
//! [`cast`] and [`encode`] dispatch on [`FieldType`] with an exhaustive match.
//! Constraints are not checked here; see [`crate::constraints`].

mod boolean;
mod duration;
mod geopoint;
mod json;
mod number;
mod temporal;
mod text;

use tableschema_model::{CastError, DEFAULT_FORMAT, EncodeError, FieldType, Value};

use crate::options::CastOptions;

/// Maps an empty format to `default`.
pub fn normalize_format(format: &str) -> &str {
    if format.is_empty() { DEFAULT_FORMAT } else { format }
}

/// Parses `raw` as `field_type` in the given format.
pub fn cast(
    field_type: FieldType,
    format: &str,
    options: &CastOptions,
    raw: &str,
) -> Result<Value, CastError> {
    let format = normalize_format(format);
    match field_type {
        FieldType::Integer => number::cast_integer(raw, options),
        FieldType::Number => number::cast_number(raw, options),
        FieldType::Boolean => boolean::cast(raw, options),
        FieldType::String => text::cast(format, raw),
        FieldType::Date => temporal::cast_date(format, raw),
        FieldType::Time => temporal::cast_time(format, raw),
        FieldType::DateTime => temporal::cast_datetime(format, raw),
        FieldType::Year => temporal::cast_year(format, raw),
        FieldType::YearMonth => temporal::cast_year_month(format, raw),
        FieldType::Duration => duration::cast(raw),
        FieldType::GeoPoint => geopoint::cast(format, raw),
        FieldType::Object => json::cast_object(raw),
        FieldType::Array => json::cast_array(raw),
        FieldType::Any => Ok(Value::String(raw.to_string())),
    }
}

/// Renders `value` as the canonical text of `field_type`.
pub fn encode(
    field_type: FieldType,
    format: &str,
    options: &CastOptions,
    value: &Value,
) -> Result<String, EncodeError> {
    let format = normalize_format(format);
    match field_type {
        FieldType::Integer => number::encode_integer(value),
        FieldType::Number => number::encode_number(value),
        FieldType::Boolean => boolean::encode(value, options),
        FieldType::String => text::encode(value),
        FieldType::Date
        | FieldType::Time
        | FieldType::DateTime
        | FieldType::Year
        | FieldType::YearMonth => temporal::encode(field_type, value),
        FieldType::Duration => duration::encode(value),
        FieldType::GeoPoint => geopoint::encode(format, value),
        FieldType::Object => json::encode_object(value),
        FieldType::Array => json::encode_array(value),
        FieldType::Any => Ok(match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }),
    }
}
