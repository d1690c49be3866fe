//! JSON schema descriptor shapes.
//!
//! These types mirror the descriptor document one-to-one and carry no
//! precompiled state; `tableschema-cast` and `tableschema-core` build runtime
//! fields and schemas from them.
//!
//! Several keys accept more than one JSON shape for caller convenience:
//!
//! - `primaryKey` and every `fields` list inside `foreignKeys` accept a single
//!   string or a list of strings. Both normalize to `Vec<String>` and are
//!   written back as lists.
//! - `foreignKeys` accepts a single object or a list of objects.
//! - `maximum`/`minimum` accept a string or a bare JSON number/boolean and are
//!   kept as strings, parsed later with the field's own format.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::field_type::FieldType;

/// Format tag meaning "the type's canonical representation".
pub const DEFAULT_FORMAT: &str = "default";

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

/// Missing-value markers used when a descriptor does not declare any.
pub fn default_missing_values() -> Vec<String> {
    vec![String::new()]
}

/// Top-level schema descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(
        default,
        deserialize_with = "deserialize_key_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub primary_key: Vec<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_foreign_keys",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    #[serde(default = "default_missing_values")]
    pub missing_values: Vec<String>,
}

impl Default for SchemaDescriptor {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
            missing_values: default_missing_values(),
        }
    }
}

/// A single column descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_char: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_char: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bare_number: Option<bool>,
    #[serde(default, skip_serializing_if = "ConstraintsDescriptor::is_empty")]
    pub constraints: ConstraintsDescriptor,
}

impl FieldDescriptor {
    /// A descriptor with the given name and type and every other key at its default.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            format: default_format(),
            title: None,
            description: None,
            true_values: None,
            false_values: None,
            decimal_char: None,
            group_char: None,
            bare_number: None,
            constraints: ConstraintsDescriptor::default(),
        }
    }
}

/// Declared (uncompiled) field constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintsDescriptor {
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub maximum: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_bound",
        skip_serializing_if = "Option::is_none"
    )]
    pub minimum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(
        rename = "enum",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl ConstraintsDescriptor {
    pub fn is_empty(&self) -> bool {
        self == &ConstraintsDescriptor::default()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A foreign key: local fields referencing fields of another (or the same) resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyDescriptor {
    #[serde(default, deserialize_with = "deserialize_key_list")]
    pub fields: Vec<String>,
    #[serde(default)]
    pub reference: ReferenceDescriptor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDescriptor {
    #[serde(default)]
    pub resource: String,
    #[serde(default, deserialize_with = "deserialize_key_list")]
    pub fields: Vec<String>,
}

fn deserialize_key_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::String(name) => Ok(vec![name]),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(name) => Ok(name),
                other => Err(de::Error::custom(format!(
                    "key lists must contain only strings, found {other}"
                ))),
            })
            .collect(),
        other => Err(de::Error::custom(format!(
            "key lists must be either a string or a list of strings, found {other}"
        ))),
    }
}

fn deserialize_foreign_keys<'de, D>(deserializer: D) -> Result<Vec<ForeignKeyDescriptor>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(Vec::new()),
        object @ serde_json::Value::Object(_) => serde_json::from_value(object)
            .map(|key| vec![key])
            .map_err(de::Error::custom),
        list @ serde_json::Value::Array(_) => {
            serde_json::from_value(list).map_err(de::Error::custom)
        }
        other => Err(de::Error::custom(format!(
            "foreignKeys must be an object or a list of objects, found {other}"
        ))),
    }
}

fn deserialize_bound<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(bound) => Ok(Some(bound)),
        serde_json::Value::Number(bound) => Ok(Some(bound.to_string())),
        serde_json::Value::Bool(bound) => Ok(Some(bound.to_string())),
        other => Err(de::Error::custom(format!(
            "minimum/maximum must be a string or a number, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_defaults_apply() {
        let field: FieldDescriptor = serde_json::from_str(r#"{"name": "Foo"}"#).expect("field");
        assert_eq!(field.field_type, FieldType::String);
        assert_eq!(field.format, DEFAULT_FORMAT);
        assert!(field.constraints.is_empty());
    }

    #[test]
    fn primary_key_accepts_string_or_list() {
        let single: SchemaDescriptor =
            serde_json::from_str(r#"{"fields": [], "primaryKey": "ID"}"#).expect("single");
        assert_eq!(single.primary_key, vec!["ID"]);

        let many: SchemaDescriptor =
            serde_json::from_str(r#"{"fields": [], "primaryKey": ["ID", "Name"]}"#)
                .expect("many");
        assert_eq!(many.primary_key, vec!["ID", "Name"]);

        assert!(serde_json::from_str::<SchemaDescriptor>(r#"{"primaryKey": 10}"#).is_err());
    }

    #[test]
    fn foreign_keys_accept_object_or_list() {
        let object: SchemaDescriptor = serde_json::from_str(
            r#"{"foreignKeys": {"fields": "Id", "reference": {"resource": "people", "fields": "PersonId"}}}"#,
        )
        .expect("object");
        assert_eq!(object.foreign_keys.len(), 1);
        assert_eq!(object.foreign_keys[0].fields, vec!["Id"]);
        assert_eq!(object.foreign_keys[0].reference.resource, "people");
        assert_eq!(object.foreign_keys[0].reference.fields, vec!["PersonId"]);

        let list: SchemaDescriptor = serde_json::from_str(
            r#"{"foreignKeys": [{"fields": ["A", "B"], "reference": {"fields": ["C", "D"]}}]}"#,
        )
        .expect("list");
        assert_eq!(list.foreign_keys[0].fields, vec!["A", "B"]);
    }

    #[test]
    fn missing_values_default_only_when_absent() {
        let absent: SchemaDescriptor = serde_json::from_str("{}").expect("absent");
        assert_eq!(absent.missing_values, vec![String::new()]);

        let explicit: SchemaDescriptor =
            serde_json::from_str(r#"{"missingValues": []}"#).expect("explicit");
        assert!(explicit.missing_values.is_empty());
    }

    #[test]
    fn numeric_bounds_are_kept_as_strings() {
        let constraints: ConstraintsDescriptor =
            serde_json::from_str(r#"{"maximum": 10, "minimum": "2"}"#).expect("constraints");
        assert_eq!(constraints.maximum.as_deref(), Some("10"));
        assert_eq!(constraints.minimum.as_deref(), Some("2"));
    }

    #[test]
    fn serialization_skips_absent_keys() {
        let field = FieldDescriptor::new("Age", FieldType::Integer);
        let json = serde_json::to_string(&field).expect("serialize");
        assert_eq!(json, r#"{"name":"Age","type":"integer","format":"default"}"#);
    }
}
