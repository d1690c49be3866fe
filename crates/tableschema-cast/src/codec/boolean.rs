use tableschema_model::{CastError, EncodeError, FieldType, Value};

use crate::options::CastOptions;

/// True values are checked first, so a value listed in both lists is `true`.
pub(crate) fn cast(raw: &str, options: &CastOptions) -> Result<Value, CastError> {
    if options.true_values.iter().any(|v| v == raw) {
        Ok(Value::Boolean(true))
    } else if options.false_values.iter().any(|v| v == raw) {
        Ok(Value::Boolean(false))
    } else {
        Err(CastError::InvalidValue {
            field_type: FieldType::Boolean,
            value: raw.to_string(),
            reason: "not one of the configured true or false values".to_string(),
        })
    }
}

pub(crate) fn encode(value: &Value, options: &CastOptions) -> Result<String, EncodeError> {
    match value {
        Value::Boolean(true) => Ok(first_or(&options.true_values, "true")),
        Value::Boolean(false) => Ok(first_or(&options.false_values, "false")),
        Value::String(raw)
            if options.true_values.contains(raw) || options.false_values.contains(raw) =>
        {
            Ok(raw.clone())
        }
        Value::String(raw) => Err(EncodeError::InvalidValue {
            field_type: FieldType::Boolean,
            value: raw.clone(),
            reason: "not one of the configured true or false values".to_string(),
        }),
        other => Err(EncodeError::IncompatibleValue {
            field_type: FieldType::Boolean,
            found: other.kind(),
        }),
    }
}

fn first_or(values: &[String], fallback: &str) -> String {
    values
        .first()
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists() {
        let options = CastOptions::default();
        assert_eq!(cast("TRUE", &options), Ok(Value::Boolean(true)));
        assert_eq!(cast("0", &options), Ok(Value::Boolean(false)));
        assert!(cast("yes", &options).is_err());
    }

    #[test]
    fn value_in_both_lists_is_true() {
        let options = CastOptions::default()
            .with_true_values(["x"])
            .with_false_values(["x"]);
        assert_eq!(cast("x", &options), Ok(Value::Boolean(true)));
    }

    #[test]
    fn encode_uses_first_configured_value() {
        let options = CastOptions::default()
            .with_true_values(["yes", "y"])
            .with_false_values(["no"]);
        assert_eq!(encode(&Value::Boolean(true), &options).expect("true"), "yes");
        assert_eq!(encode(&Value::Boolean(false), &options).expect("false"), "no");
        assert_eq!(encode(&Value::String("y".into()), &options).expect("echo"), "y");
        assert!(encode(&Value::String("maybe".into()), &options).is_err());
        assert!(encode(&Value::Integer(1), &options).is_err());
    }
}
