//! Typed cell values produced by casting.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A `geopoint` cell: longitude and latitude in decimal degrees.
///
/// Both keys are mandatory when deserialized from the `object` format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A cast cell value.
///
/// Every temporal field type (date, time, datetime, year, yearmonth) casts to
/// [`Value::DateTime`] normalized to UTC.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Number(f64),
    Boolean(bool),
    String(String),
    DateTime(DateTime<Utc>),
    Duration(Duration),
    GeoPoint(GeoPoint),
    Object(serde_json::Map<String, serde_json::Value>),
    Array(Vec<serde_json::Value>),
}

impl Value {
    /// Short name of the variant, used in conversion error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Duration(_) => "duration",
            Value::GeoPoint(_) => "geopoint",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            Value::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Number(value) => write!(f, "{value}"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::String(value) => f.write_str(value),
            Value::DateTime(value) => {
                f.write_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Duration(value) => write!(f, "{value:?}"),
            Value::GeoPoint(point) => write!(f, "{},{}", point.lon, point.lat),
            Value::Object(map) => {
                let json = serde_json::Value::Object(map.clone());
                write!(f, "{json}")
            }
            Value::Array(items) => {
                let json = serde_json::Value::Array(items.clone());
                write!(f, "{json}")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

impl From<GeoPoint> for Value {
    fn from(value: GeoPoint) -> Self {
        Value::GeoPoint(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_forms() {
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Number(20.5).to_string(), "20.5");
        assert_eq!(Value::GeoPoint(GeoPoint::new(90.0, 45.5)).to_string(), "90,45.5");
        let at = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(Value::DateTime(at).to_string(), "1970-01-01T00:00:01Z");
    }

    #[test]
    fn integer_widens_to_f64() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::String("3".into()).as_f64(), None);
    }

    #[test]
    fn geopoint_object_requires_both_keys() {
        let ok: GeoPoint = serde_json::from_str(r#"{"lon": 90, "lat": 45}"#).expect("geopoint");
        assert_eq!(ok, GeoPoint::new(90.0, 45.0));
        assert!(serde_json::from_str::<GeoPoint>(r#"{"longi": 90, "lat": 45}"#).is_err());
    }
}
