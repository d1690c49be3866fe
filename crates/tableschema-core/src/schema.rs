//! Schema construction, validation and descriptor round-tripping.

use std::io::{Read, Write};

use tracing::debug;

use tableschema_cast::Field;
use tableschema_model::{
    FieldDescriptor, FieldType, ForeignKeyDescriptor, SchemaDescriptor, SchemaError,
};

/// An ordered set of fields plus key and missing-value metadata.
///
/// Field order defines the row layout: cell `i` of a row belongs to field `i`.
/// Schemas are validated when built and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
    primary_key: Vec<String>,
    foreign_keys: Vec<ForeignKeyDescriptor>,
    missing_values: Vec<String>,
}

impl Schema {
    /// Parses and validates a JSON descriptor.
    pub fn read<R: Read>(reader: R) -> Result<Self, SchemaError> {
        let descriptor: SchemaDescriptor = serde_json::from_reader(reader)?;
        Self::from_descriptor(&descriptor)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let descriptor: SchemaDescriptor = serde_json::from_str(json)?;
        Self::from_descriptor(&descriptor)
    }

    /// Builds every field (compiling patterns and enums) and validates keys.
    pub fn from_descriptor(descriptor: &SchemaDescriptor) -> Result<Self, SchemaError> {
        let fields = descriptor
            .fields
            .iter()
            .map(|field| Field::build(field, &descriptor.missing_values))
            .collect::<Result<Vec<_>, _>>()?;
        let schema = Self {
            fields,
            primary_key: descriptor.primary_key.clone(),
            foreign_keys: descriptor.foreign_keys.clone(),
            missing_values: descriptor.missing_values.clone(),
        };
        schema.validate()?;
        debug!(
            fields = schema.fields.len(),
            primary_key = ?schema.primary_key,
            "schema built"
        );
        Ok(schema)
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Checks field names and key references.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if let Some(index) = self.fields.iter().position(|f| f.name().is_empty()) {
            return Err(SchemaError::MissingFieldName { index });
        }
        if let Some(name) = self.primary_key.iter().find(|name| !self.has_field(name)) {
            return Err(SchemaError::UnknownPrimaryKey { name: name.clone() });
        }
        for key in &self.foreign_keys {
            if let Some(name) = key.fields.iter().find(|name| !self.has_field(name)) {
                return Err(SchemaError::UnknownForeignKey { name: name.clone() });
            }
            if key.fields.len() != key.reference.fields.len() {
                return Err(SchemaError::ForeignKeyArity {
                    fields: key.fields.len(),
                    reference: key.reference.fields.len(),
                });
            }
        }
        Ok(())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn headers(&self) -> Vec<&str> {
        self.fields.iter().map(Field::name).collect()
    }

    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    pub fn foreign_keys(&self) -> &[ForeignKeyDescriptor] {
        &self.foreign_keys
    }

    pub fn missing_values(&self) -> &[String] {
        &self.missing_values
    }

    /// Looks up a field by name, returning its column index.
    pub fn field(&self, name: &str) -> Option<(usize, &Field)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.name() == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// The marker written for absent values when encoding.
    pub fn missing_marker(&self) -> &str {
        self.missing_values.first().map_or("", String::as_str)
    }

    /// Column indexes tracked for uniqueness: primary key fields and fields
    /// marked `unique`, ascending.
    pub fn unique_field_indexes(&self) -> Vec<usize> {
        let mut indexes: Vec<usize> = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| {
                field.constraints().unique || self.primary_key.iter().any(|k| k == field.name())
            })
            .map(|(index, _)| index)
            .collect();
        indexes.dedup();
        indexes
    }

    pub fn to_descriptor(&self) -> SchemaDescriptor {
        SchemaDescriptor {
            fields: self.fields.iter().map(Field::to_descriptor).collect(),
            primary_key: self.primary_key.clone(),
            foreign_keys: self.foreign_keys.clone(),
            missing_values: self.missing_values.clone(),
        }
    }

    /// Writes the descriptor as pretty-printed JSON, preserving field order.
    pub fn write<W: Write>(&self, writer: W) -> Result<(), SchemaError> {
        serde_json::to_writer_pretty(writer, &self.to_descriptor())?;
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(&self.to_descriptor())?)
    }
}

/// Programmatic schema construction; [`SchemaBuilder::build`] validates.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    descriptor: SchemaDescriptor,
}

impl SchemaBuilder {
    /// Appends a field with default format, options and constraints.
    pub fn field(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.field_descriptor(FieldDescriptor::new(name, field_type))
    }

    pub fn field_descriptor(mut self, descriptor: FieldDescriptor) -> Self {
        self.descriptor.fields.push(descriptor);
        self
    }

    pub fn primary_key<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptor.primary_key = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn foreign_key(mut self, key: ForeignKeyDescriptor) -> Self {
        self.descriptor.foreign_keys.push(key);
        self
    }

    pub fn missing_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptor.missing_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        Schema::from_descriptor(&self.descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tableschema_model::ReferenceDescriptor;

    #[test]
    fn lookup_returns_declaration_index() {
        let schema = Schema::builder()
            .field("ID", FieldType::Integer)
            .field("Name", FieldType::String)
            .build()
            .expect("build");
        let (index, field) = schema.field("Name").expect("Name");
        assert_eq!(index, 1);
        assert_eq!(field.field_type(), FieldType::String);
        assert!(!schema.has_field("Age"));
        assert_eq!(schema.headers(), ["ID", "Name"]);
    }

    #[test]
    fn validate_rejects_unknown_primary_key() {
        let err = Schema::builder()
            .field("ID", FieldType::Integer)
            .primary_key(["Id"])
            .build()
            .expect_err("dangling primary key");
        assert!(matches!(err, SchemaError::UnknownPrimaryKey { ref name } if name == "Id"));
    }

    #[test]
    fn validate_rejects_foreign_key_arity_mismatch() {
        let err = Schema::builder()
            .field("A", FieldType::Integer)
            .field("B", FieldType::Integer)
            .foreign_key(ForeignKeyDescriptor {
                fields: vec!["A".into(), "B".into()],
                reference: ReferenceDescriptor {
                    resource: "other".into(),
                    fields: vec!["X".into()],
                },
            })
            .build()
            .expect_err("arity mismatch");
        assert!(matches!(
            err,
            SchemaError::ForeignKeyArity {
                fields: 2,
                reference: 1
            }
        ));
    }

    #[test]
    fn validate_rejects_unnamed_field() {
        let err = Schema::builder()
            .field("A", FieldType::Integer)
            .field("", FieldType::String)
            .build()
            .expect_err("unnamed field");
        assert!(matches!(err, SchemaError::MissingFieldName { index: 1 }));
    }

    #[test]
    fn unique_indexes_merge_primary_key_and_unique_fields() {
        let schema = Schema::from_json_str(
            r#"{"fields": [
                {"name": "A", "constraints": {"unique": true}},
                {"name": "B"},
                {"name": "C"}
            ], "primaryKey": ["C", "A"]}"#,
        )
        .expect("schema");
        assert_eq!(schema.unique_field_indexes(), vec![0, 2]);
    }
}
