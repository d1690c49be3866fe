//! Row to record binding, resolved once per record type.

use tracing::trace;

use tableschema_model::{EncodeError, Value};

use crate::error::RowError;
use crate::record::{Column, Record};
use crate::schema::Schema;

/// The bindings of a record type's columns to schema column indexes.
///
/// Columns whose field name is not in the schema are ignored. Bindings are
/// kept in schema declaration order, so encoded rows follow the schema.
#[derive(Debug)]
pub struct RecordBinder<'s, R> {
    schema: &'s Schema,
    bindings: Vec<Binding<R>>,
}

#[derive(Debug)]
struct Binding<R> {
    index: usize,
    column: Column<R>,
}

impl<'s, R: Record> RecordBinder<'s, R> {
    pub fn new(schema: &'s Schema) -> Self {
        let mut bindings: Vec<Binding<R>> = R::columns()
            .into_iter()
            .filter_map(|column| {
                schema
                    .field(column.field_name())
                    .map(|(index, _)| Binding { index, column })
            })
            .collect();
        bindings.sort_by_key(|binding| binding.index);
        Self { schema, bindings }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Bound schema column indexes, ascending.
    pub fn indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.bindings.iter().map(|binding| binding.index)
    }

    /// Casts a row into a new record.
    ///
    /// The row must have exactly one cell per schema field. Missing-value
    /// cells leave the attribute at its default unless the field is required.
    pub fn decode<S: AsRef<str>>(&self, row: &[S]) -> Result<R, RowError> {
        check_length(self.schema, row.len())?;
        let mut record = R::default();
        for binding in &self.bindings {
            let field = &self.schema.fields()[binding.index];
            let raw = row[binding.index].as_ref();
            let Some(value) = field
                .cast_cell(raw)
                .map_err(|e| RowError::from_cast(field.name(), e))?
            else {
                continue;
            };
            binding
                .column
                .set(&mut record, value)
                .map_err(|mismatch| RowError::Assign {
                    field: field.name().to_string(),
                    found: mismatch.found,
                    target: mismatch.target,
                })?;
        }
        trace!(cells = row.len(), "row decoded");
        Ok(record)
    }

    /// Encodes a record into one cell per bound field, in schema order.
    ///
    /// Only an absent attribute becomes the missing marker; a present value
    /// that has no [`Value`] form fails the row.
    pub fn encode(&self, record: &R) -> Result<Vec<String>, RowError> {
        self.bindings
            .iter()
            .map(|binding| {
                let field = &self.schema.fields()[binding.index];
                let value = binding.column.get(record).map_err(|e| RowError::Encode {
                    field: field.name().to_string(),
                    source: EncodeError::InvalidValue {
                        field_type: field.field_type(),
                        value: e.value,
                        reason: e.reason.to_string(),
                    },
                })?;
                match value {
                    None => Ok(self.schema.missing_marker().to_string()),
                    Some(value) => field.encode(&value).map_err(|source| RowError::Encode {
                        field: field.name().to_string(),
                        source,
                    }),
                }
            })
            .collect()
    }
}

impl Schema {
    pub fn binder<R: Record>(&self) -> RecordBinder<'_, R> {
        RecordBinder::new(self)
    }

    /// Casts a single row into a record. Build a [`RecordBinder`] once when
    /// casting many rows.
    pub fn cast_row<R: Record, S: AsRef<str>>(&self, row: &[S]) -> Result<R, RowError> {
        self.binder::<R>().decode(row)
    }

    pub fn encode_row<R: Record>(&self, record: &R) -> Result<Vec<String>, RowError> {
        self.binder::<R>().encode(record)
    }

    /// Casts every cell of a row by position. Missing cells become `None`.
    pub fn cast_values<S: AsRef<str>>(&self, row: &[S]) -> Result<Vec<Option<Value>>, RowError> {
        check_length(self, row.len())?;
        self.fields()
            .iter()
            .zip(row)
            .map(|(field, raw)| {
                field
                    .cast_cell(raw.as_ref())
                    .map_err(|e| RowError::from_cast(field.name(), e))
            })
            .collect()
    }

    /// Encodes one value per schema field. `None` becomes the missing marker.
    pub fn encode_values(&self, values: &[Option<Value>]) -> Result<Vec<String>, RowError> {
        check_length(self, values.len())?;
        self.fields()
            .iter()
            .zip(values)
            .map(|(field, value)| match value {
                None => Ok(self.missing_marker().to_string()),
                Some(value) => field.encode(value).map_err(|source| RowError::Encode {
                    field: field.name().to_string(),
                    source,
                }),
            })
            .collect()
    }
}

fn check_length(schema: &Schema, actual: usize) -> Result<(), RowError> {
    let expected = schema.fields().len();
    if actual != expected {
        return Err(RowError::LengthMismatch { expected, actual });
    }
    Ok(())
}
