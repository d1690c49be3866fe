use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical type of a table column, as named by the `type` key of a field descriptor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Number,
    Boolean,
    #[default]
    String,
    Date,
    Time,
    #[serde(rename = "datetime")]
    DateTime,
    Year,
    #[serde(rename = "yearmonth")]
    YearMonth,
    Duration,
    #[serde(rename = "geopoint")]
    GeoPoint,
    Object,
    Array,
    Any,
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [FieldType; 14] = [
        FieldType::Integer,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::String,
        FieldType::Date,
        FieldType::Time,
        FieldType::DateTime,
        FieldType::Year,
        FieldType::YearMonth,
        FieldType::Duration,
        FieldType::GeoPoint,
        FieldType::Object,
        FieldType::Array,
        FieldType::Any,
    ];

    /// Returns the descriptor name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::String => "string",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::DateTime => "datetime",
            FieldType::Year => "year",
            FieldType::YearMonth => "yearmonth",
            FieldType::Duration => "duration",
            FieldType::GeoPoint => "geopoint",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Any => "any",
        }
    }

    /// Returns true if `minimum`/`maximum` constraints apply to this type.
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            FieldType::Integer
                | FieldType::Number
                | FieldType::Date
                | FieldType::Time
                | FieldType::DateTime
                | FieldType::Year
                | FieldType::YearMonth
        )
    }

    /// Returns true if `minLength`/`maxLength` constraints apply to this type.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldType::String | FieldType::Object | FieldType::Array | FieldType::Any
        )
    }

    /// Returns true for the five calendar/clock types that cast to a UTC timestamp.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            FieldType::Date
                | FieldType::Time
                | FieldType::DateTime
                | FieldType::Year
                | FieldType::YearMonth
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .find(|field_type| field_type.as_str() == s.trim())
            .copied()
            .ok_or_else(|| format!("unknown field type: {s}"))
    }
}
