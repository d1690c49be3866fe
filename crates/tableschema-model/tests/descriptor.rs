//! Tests for schema descriptor (de)serialization.

use tableschema_model::{FieldType, SchemaDescriptor};

const DESCRIPTOR: &str = r#"{
    "fields": [
        {"name": "ID", "type": "integer", "constraints": {"required": true, "unique": true}},
        {"name": "Name", "type": "string", "constraints": {"maxLength": 40, "pattern": "[A-Z].*"}},
        {"name": "Active", "type": "boolean", "trueValues": ["yes"], "falseValues": ["no"]},
        {"name": "Joined", "type": "date", "format": "%d/%m/%Y", "constraints": {"minimum": "01/01/2000"}},
        {"name": "Home", "type": "geopoint", "format": "array"}
    ],
    "primaryKey": "ID",
    "foreignKeys": {"fields": "ID", "reference": {"resource": "", "fields": "ID"}},
    "missingValues": ["", "NA"]
}"#;

#[test]
fn parses_every_descriptor_key() {
    let descriptor: SchemaDescriptor = serde_json::from_str(DESCRIPTOR).expect("parse descriptor");
    let names: Vec<&str> = descriptor.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["ID", "Name", "Active", "Joined", "Home"]);
    assert_eq!(descriptor.fields[3].field_type, FieldType::Date);
    assert_eq!(descriptor.fields[3].format, "%d/%m/%Y");
    assert_eq!(
        descriptor.fields[2].true_values.as_deref(),
        Some(&["yes".to_string()][..])
    );
    assert_eq!(descriptor.fields[1].constraints.max_length, Some(40));
    assert_eq!(descriptor.primary_key, vec!["ID"]);
    assert_eq!(descriptor.foreign_keys[0].reference.fields, vec!["ID"]);
    assert_eq!(descriptor.missing_values, vec!["", "NA"]);
}

#[test]
fn round_trip_preserves_field_order_and_normalizes_keys() {
    let descriptor: SchemaDescriptor = serde_json::from_str(DESCRIPTOR).expect("parse descriptor");
    let written = serde_json::to_value(&descriptor).expect("serialize");
    assert_eq!(written["primaryKey"], serde_json::json!(["ID"]));
    assert_eq!(written["foreignKeys"][0]["fields"], serde_json::json!(["ID"]));

    let reparsed: SchemaDescriptor = serde_json::from_value(written).expect("reparse");
    assert_eq!(reparsed, descriptor);
}

#[test]
fn unknown_type_is_rejected() {
    let err = serde_json::from_str::<SchemaDescriptor>(r#"{"fields": [{"name": "x", "type": "decimal"}]}"#)
        .expect_err("unknown type");
    assert!(err.to_string().contains("decimal"));
}
