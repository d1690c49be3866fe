use tableschema_model::{CastError, EncodeError, FieldType, Value};

pub(crate) fn cast_object(raw: &str) -> Result<Value, CastError> {
    match parse(FieldType::Object, raw)? {
        serde_json::Value::Object(map) => Ok(Value::Object(map)),
        other => Err(wrong_shape(FieldType::Object, raw, &other)),
    }
}

pub(crate) fn cast_array(raw: &str) -> Result<Value, CastError> {
    match parse(FieldType::Array, raw)? {
        serde_json::Value::Array(items) => Ok(Value::Array(items)),
        other => Err(wrong_shape(FieldType::Array, raw, &other)),
    }
}

pub(crate) fn encode_object(value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::Object(map) => Ok(serde_json::to_string(map)?),
        other => Err(EncodeError::IncompatibleValue {
            field_type: FieldType::Object,
            found: other.kind(),
        }),
    }
}

pub(crate) fn encode_array(value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::Array(items) => Ok(serde_json::to_string(items)?),
        other => Err(EncodeError::IncompatibleValue {
            field_type: FieldType::Array,
            found: other.kind(),
        }),
    }
}

fn parse(field_type: FieldType, raw: &str) -> Result<serde_json::Value, CastError> {
    serde_json::from_str(raw).map_err(|e| CastError::InvalidValue {
        field_type,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn wrong_shape(field_type: FieldType, raw: &str, decoded: &serde_json::Value) -> CastError {
    let shape = match decoded {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    };
    CastError::InvalidValue {
        field_type,
        value: raw.to_string(),
        reason: format!("decoded to {shape}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_must_match() {
        assert!(matches!(cast_object(r#"{"name":"foo"}"#), Ok(Value::Object(_))));
        assert!(matches!(cast_array(r#"["name"]"#), Ok(Value::Array(_))));
        assert!(cast_object(r#"["name"]"#).is_err());
        assert!(cast_array(r#"{"name":"foo"}"#).is_err());
        assert!(cast_array("10").is_err());
        assert!(cast_object("{").is_err());
    }

    #[test]
    fn encode_compact_json() {
        let Ok(value) = cast_object(r#"{ "name" : "foo" }"#) else {
            panic!("object should cast");
        };
        assert_eq!(encode_object(&value).expect("encode"), r#"{"name":"foo"}"#);
        assert!(encode_array(&value).is_err());
    }
}
