//! Integer and number codecs.

use tableschema_model::{CastError, EncodeError, FieldType, Value};

use crate::options::CastOptions;

pub(crate) fn cast_integer(raw: &str, options: &CastOptions) -> Result<Value, CastError> {
    let canonical = canonicalize(raw, options, FieldType::Integer)?;
    canonical
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|e| invalid(FieldType::Integer, raw, e.to_string()))
}

pub(crate) fn cast_number(raw: &str, options: &CastOptions) -> Result<Value, CastError> {
    match raw.trim() {
        "NaN" => return Ok(Value::Number(f64::NAN)),
        "INF" => return Ok(Value::Number(f64::INFINITY)),
        "-INF" => return Ok(Value::Number(f64::NEG_INFINITY)),
        _ => {}
    }
    let canonical = canonicalize(raw, options, FieldType::Number)?;
    canonical
        .parse::<f64>()
        .map(Value::Number)
        .map_err(|e| invalid(FieldType::Number, raw, e.to_string()))
}

pub(crate) fn encode_integer(value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::Integer(v) => Ok(v.to_string()),
        Value::Number(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            Ok((*v as i64).to_string())
        }
        Value::Number(v) => Err(EncodeError::InvalidValue {
            field_type: FieldType::Integer,
            value: v.to_string(),
            reason: "not an integral number".to_string(),
        }),
        other => Err(EncodeError::IncompatibleValue {
            field_type: FieldType::Integer,
            found: other.kind(),
        }),
    }
}

pub(crate) fn encode_number(value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::Number(v) => Ok(format_number(*v)),
        Value::Integer(v) => Ok(v.to_string()),
        other => Err(EncodeError::IncompatibleValue {
            field_type: FieldType::Number,
            found: other.kind(),
        }),
    }
}

fn format_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "INF".to_string()
    } else if v == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        v.to_string()
    }
}

/// Rewrites a raw numeric cell into Rust's float/integer literal syntax.
fn canonicalize(raw: &str, options: &CastOptions, field_type: FieldType) -> Result<String, CastError> {
    let mut canonical = if options.bare_number {
        raw.trim().to_string()
    } else {
        strip_to_digits(raw.trim(), &options.decimal_char)
            .ok_or_else(|| invalid(field_type, raw, "no digits found".to_string()))?
    };
    if let Some(group) = options.group_char.as_deref().filter(|g| !g.is_empty()) {
        canonical = canonical.replace(group, "");
    }
    if !options.decimal_char.is_empty() && options.decimal_char != "." {
        canonical = canonical.replace(&options.decimal_char, ".");
    }
    Ok(canonical)
}

/// Keeps the span from the first digit to the last one, along with a
/// decimal separator directly before the first digit. The sign nearest to
/// the digits in the stripped prefix is kept, so `-$5` stays negative.
fn strip_to_digits(text: &str, decimal_char: &str) -> Option<String> {
    let first = text.find(|c: char| c.is_ascii_digit())?;
    let last = text.rfind(|c: char| c.is_ascii_digit())?;
    let mut start = first;
    if !decimal_char.is_empty() && text[..start].ends_with(decimal_char) {
        start -= decimal_char.len();
    }
    let digits = &text[start..=last];
    match text[..start].chars().rev().find(|c| matches!(c, '-' | '+')) {
        Some('-') => Some(format!("-{digits}")),
        _ => Some(digits.to_string()),
    }
}

fn invalid(field_type: FieldType, raw: &str, reason: String) -> CastError {
    CastError::InvalidValue {
        field_type,
        value: raw.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CastOptions {
        CastOptions::default()
    }

    #[test]
    fn integers_parse_and_reject_fractions() {
        assert_eq!(cast_integer("42", &options()), Ok(Value::Integer(42)));
        assert_eq!(cast_integer("-7", &options()), Ok(Value::Integer(-7)));
        assert!(cast_integer("4.2", &options()).is_err());
        assert!(cast_integer("abc", &options()).is_err());
    }

    #[test]
    fn special_floats() {
        assert!(matches!(cast_number("NaN", &options()), Ok(Value::Number(v)) if v.is_nan()));
        assert_eq!(cast_number("INF", &options()), Ok(Value::Number(f64::INFINITY)));
        assert_eq!(cast_number("-INF", &options()), Ok(Value::Number(f64::NEG_INFINITY)));
        assert_eq!(encode_number(&Value::Number(f64::NEG_INFINITY)).expect("encode"), "-INF");
        assert_eq!(encode_number(&Value::Number(f64::NAN)).expect("encode"), "NaN");
    }

    #[test]
    fn separators_are_substituted() {
        let european = options().with_decimal_char(",").with_group_char(".");
        assert_eq!(cast_number("1.234,5", &european), Ok(Value::Number(1234.5)));
        assert_eq!(cast_integer("1.234", &european), Ok(Value::Integer(1234)));
    }

    #[test]
    fn non_bare_numbers_drop_symbols() {
        let loose = options().with_bare_number(false);
        assert_eq!(cast_number("€ -12.50", &loose), Ok(Value::Number(-12.5)));
        assert_eq!(cast_number("95%", &loose), Ok(Value::Number(95.0)));
        assert_eq!(cast_number("$.5", &loose), Ok(Value::Number(0.5)));
        assert_eq!(cast_integer("USD 100", &loose), Ok(Value::Integer(100)));
        assert_eq!(cast_number("-$5.00", &loose), Ok(Value::Number(-5.0)));
        assert_eq!(cast_number("-€5", &loose), Ok(Value::Number(-5.0)));
        assert_eq!(cast_integer("- USD 7", &loose), Ok(Value::Integer(-7)));
        assert_eq!(cast_number("+$5", &loose), Ok(Value::Number(5.0)));
        assert!(cast_number("95%", &options()).is_err());
        assert!(cast_number("none", &loose).is_err());
    }

    #[test]
    fn numeric_coercion_on_encode() {
        assert_eq!(encode_integer(&Value::Number(3.0)).expect("integral"), "3");
        assert!(encode_integer(&Value::Number(3.5)).is_err());
        assert!(encode_integer(&Value::String("3".into())).is_err());
        assert_eq!(encode_number(&Value::Integer(3)).expect("widen"), "3");
        assert_eq!(encode_number(&Value::Number(20.2)).expect("number"), "20.2");
    }
}
