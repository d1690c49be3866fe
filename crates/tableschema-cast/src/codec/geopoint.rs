use std::sync::LazyLock;

use regex::Regex;

use tableschema_model::{CastError, DEFAULT_FORMAT, EncodeError, FieldType, GeoPoint, Value};

const ARRAY_FORMAT: &str = "array";
const OBJECT_FORMAT: &str = "object";

static DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-+]?[0-9]*\.?[0-9]*), ?([-+]?[0-9]*\.?[0-9]*)$").expect("geopoint regex")
});

static ARRAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([-+]?[0-9]*\.?[0-9]+), ?([-+]?[0-9]*\.?[0-9]+)\]$")
        .expect("geopoint array regex")
});

pub(crate) fn cast(format: &str, raw: &str) -> Result<Value, CastError> {
    parse(format, raw).map(Value::GeoPoint)
}

fn parse(format: &str, raw: &str) -> Result<GeoPoint, CastError> {
    match format {
        DEFAULT_FORMAT => parse_pair(&DEFAULT_RE, raw),
        ARRAY_FORMAT => parse_pair(&ARRAY_RE, raw),
        OBJECT_FORMAT => {
            serde_json::from_str::<GeoPoint>(raw).map_err(|e| invalid(raw, e.to_string()))
        }
        other => Err(CastError::UnsupportedFormat {
            field_type: FieldType::GeoPoint,
            format: other.to_string(),
        }),
    }
}

fn parse_pair(re: &Regex, raw: &str) -> Result<GeoPoint, CastError> {
    let caps = re
        .captures(raw)
        .ok_or_else(|| invalid(raw, "expected a longitude,latitude pair".to_string()))?;
    let coordinate = |index: usize| -> Result<f64, CastError> {
        caps[index]
            .parse::<f64>()
            .map_err(|e| invalid(raw, e.to_string()))
    };
    Ok(GeoPoint::new(coordinate(1)?, coordinate(2)?))
}

/// String values are validated against the format and echoed unchanged.
pub(crate) fn encode(format: &str, value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::String(raw) => {
            parse(format, raw).map_err(|e| match e {
                CastError::UnsupportedFormat { field_type, format } => {
                    EncodeError::UnsupportedFormat { field_type, format }
                }
                other => EncodeError::InvalidValue {
                    field_type: FieldType::GeoPoint,
                    value: raw.clone(),
                    reason: other.to_string(),
                },
            })?;
            Ok(raw.clone())
        }
        Value::GeoPoint(point) => match format {
            DEFAULT_FORMAT => Ok(format!("{},{}", point.lon, point.lat)),
            ARRAY_FORMAT => Ok(format!("[{},{}]", point.lon, point.lat)),
            OBJECT_FORMAT => Ok(format!("{point:?}")),
            other => Err(EncodeError::UnsupportedFormat {
                field_type: FieldType::GeoPoint,
                format: other.to_string(),
            }),
        },
        other => Err(EncodeError::IncompatibleValue {
            field_type: FieldType::GeoPoint,
            found: other.kind(),
        }),
    }
}

fn invalid(raw: &str, reason: String) -> CastError {
    CastError::InvalidValue {
        field_type: FieldType::GeoPoint,
        value: raw.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lon: f64, lat: f64) -> Value {
        Value::GeoPoint(GeoPoint::new(lon, lat))
    }

    #[test]
    fn three_formats() {
        assert_eq!(cast("default", "90,45"), Ok(point(90.0, 45.0)));
        assert_eq!(cast("default", "-90.5, +45"), Ok(point(-90.5, 45.0)));
        assert_eq!(cast("array", "[90,45]"), Ok(point(90.0, 45.0)));
        assert_eq!(cast("object", r#"{"lon": 90, "lat": 45}"#), Ok(point(90.0, 45.0)));
    }

    #[test]
    fn malformed_points() {
        assert!(cast("default", "90").is_err());
        assert!(cast("default", ",").is_err());
        assert!(cast("array", "90,45").is_err());
        assert!(cast("object", r#"{"lon": 90}"#).is_err());
        assert!(matches!(
            cast("polar", "90,45"),
            Err(CastError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn encode_echoes_strings_and_renders_points() {
        assert_eq!(
            encode("default", &Value::String("90, 45".into())).expect("echo"),
            "90, 45"
        );
        assert!(encode("default", &Value::String("[90,45]".into())).is_err());
        assert_eq!(encode("array", &point(90.0, 45.5)).expect("array"), "[90,45.5]");
        assert_eq!(
            encode("object", &point(90.0, 45.0)).expect("object"),
            "GeoPoint { lon: 90.0, lat: 45.0 }"
        );
        assert!(encode("default", &Value::Integer(1)).is_err());
    }
}
