//! String codec with `uri`, `email` and `uuid` format checks.

use std::str::FromStr;

use lettre::message::Mailbox;
use url::Url;
use uuid::Uuid;

use tableschema_model::{CastError, EncodeError, FieldType, Value};

const URI_FORMAT: &str = "uri";
const EMAIL_FORMAT: &str = "email";
const UUID_FORMAT: &str = "uuid";

/// Other formats, `default` included, accept any text.
pub(crate) fn cast(format: &str, raw: &str) -> Result<Value, CastError> {
    match format {
        URI_FORMAT => check_uri(raw)?,
        EMAIL_FORMAT => {
            Mailbox::from_str(raw).map_err(|e| invalid(raw, e.to_string()))?;
        }
        UUID_FORMAT => check_uuid(raw)?,
        _ => {}
    }
    Ok(Value::String(raw.to_string()))
}

pub(crate) fn encode(value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        other => Err(EncodeError::IncompatibleValue {
            field_type: FieldType::String,
            found: other.kind(),
        }),
    }
}

fn check_uri(raw: &str) -> Result<(), CastError> {
    let url = Url::parse(raw).map_err(|e| invalid(raw, e.to_string()))?;
    if !url.has_host() {
        return Err(invalid(raw, "uri has no authority".to_string()));
    }
    Ok(())
}

fn check_uuid(raw: &str) -> Result<(), CastError> {
    let uuid = Uuid::parse_str(raw).map_err(|e| invalid(raw, e.to_string()))?;
    match uuid.get_version_num() {
        4 => Ok(()),
        version => Err(invalid(raw, format!("uuid version {version}, expected 4"))),
    }
}

fn invalid(raw: &str, reason: String) -> CastError {
    CastError::InvalidValue {
        field_type: FieldType::String,
        value: raw.to_string(),
        reason,
    }
}
