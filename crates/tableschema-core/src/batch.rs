//! Batch casting and encoding over row sources.

use std::collections::HashSet;

use tracing::{debug, trace};

use tableschema_cast::Field;
use tableschema_model::{SourceError, Value};

use crate::binder::RecordBinder;
use crate::error::{ConversionError, RowConversionError, RowError, TableError};
use crate::record::Record;
use crate::schema::Schema;

/// How a batch cast reacts to a failing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CastMode {
    /// Abort on the first failing row and discard everything cast so far.
    #[default]
    FailFast,
    /// Record each failing row in the report and keep going.
    BestEffort,
}

/// Records that cast successfully plus the rows that did not.
///
/// Under [`CastMode::FailFast`] the report is always empty.
#[derive(Debug)]
pub struct CastOutcome<R> {
    pub records: Vec<R>,
    pub report: ConversionError,
}

impl<R> CastOutcome<R> {
    pub fn is_clean(&self) -> bool {
        self.report.is_empty()
    }

    /// Fails with the report if any row failed.
    pub fn into_result(self) -> Result<Vec<R>, ConversionError> {
        if self.report.is_empty() {
            Ok(self.records)
        } else {
            Err(self.report)
        }
    }
}

/// Tracks `(column index, canonical value)` pairs for key and unique fields.
struct UniqueTracker<'s> {
    fields: Vec<(usize, &'s Field)>,
    seen: HashSet<(usize, String)>,
}

impl<'s> UniqueTracker<'s> {
    fn new(schema: &'s Schema) -> Self {
        let fields = schema
            .unique_field_indexes()
            .into_iter()
            .map(|index| (index, &schema.fields()[index]))
            .collect();
        Self {
            fields,
            seen: HashSet::new(),
        }
    }

    /// Records the row's keys unless one of them was seen before, in which
    /// case nothing from this row is recorded.
    fn admit(&mut self, row: &[String]) -> Result<(), RowError> {
        let mut keys = Vec::with_capacity(self.fields.len());
        for &(index, field) in &self.fields {
            let raw = &row[index];
            if field.is_missing(raw) {
                continue;
            }
            let canonical = field
                .cast(raw)
                .map_err(|e| RowError::from_cast(field.name(), e))
                .and_then(|value| {
                    field.encode(&value).map_err(|source| RowError::Encode {
                        field: field.name().to_string(),
                        source,
                    })
                })?;
            let key = (index, canonical);
            if self.seen.contains(&key) {
                return Err(RowError::Duplicate {
                    field: field.name().to_string(),
                    value: key.1,
                });
            }
            keys.push(key);
        }
        self.seen.extend(keys);
        Ok(())
    }
}

impl Schema {
    /// Casts every row of a source into records.
    ///
    /// Rows are bound with [`RecordBinder::decode`] and then checked for
    /// primary key and `unique` duplicates. A source error always aborts.
    pub fn cast_table<R, I, E>(&self, rows: I, mode: CastMode) -> Result<CastOutcome<R>, TableError>
    where
        R: Record,
        I: IntoIterator<Item = Result<Vec<String>, E>>,
        E: Into<SourceError>,
    {
        let binder = RecordBinder::<R>::new(self);
        self.cast_rows(rows, mode, |row| binder.decode(row))
    }

    /// Like [`Schema::cast_table`], producing one `Option<Value>` per field.
    pub fn cast_table_values<I, E>(
        &self,
        rows: I,
        mode: CastMode,
    ) -> Result<CastOutcome<Vec<Option<Value>>>, TableError>
    where
        I: IntoIterator<Item = Result<Vec<String>, E>>,
        E: Into<SourceError>,
    {
        self.cast_rows(rows, mode, |row| self.cast_values(row))
    }

    /// Encodes records into rows; the first failure aborts.
    pub fn encode_table<R: Record>(&self, records: &[R]) -> Result<Vec<Vec<String>>, TableError> {
        let binder = RecordBinder::<R>::new(self);
        records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                binder.encode(record).map_err(|source| TableError::Row {
                    row_index: position + 1,
                    source,
                })
            })
            .collect()
    }

    /// Casts one column of raw cells by field name.
    pub fn cast_column<S: AsRef<str>>(
        &self,
        cells: &[S],
        name: &str,
    ) -> Result<Vec<Option<Value>>, TableError> {
        let (_, field) = self.field(name).ok_or_else(|| TableError::UnknownField {
            name: name.to_string(),
        })?;
        cells
            .iter()
            .enumerate()
            .map(|(position, raw)| {
                field
                    .cast_cell(raw.as_ref())
                    .map_err(|e| TableError::Row {
                        row_index: position + 1,
                        source: RowError::from_cast(field.name(), e),
                    })
            })
            .collect()
    }

    fn cast_rows<T, I, E>(
        &self,
        rows: I,
        mode: CastMode,
        decode: impl Fn(&[String]) -> Result<T, RowError>,
    ) -> Result<CastOutcome<T>, TableError>
    where
        I: IntoIterator<Item = Result<Vec<String>, E>>,
        E: Into<SourceError>,
    {
        let mut unique = UniqueTracker::new(self);
        let mut records = Vec::new();
        let mut report = ConversionError::default();

        for (position, row) in rows.into_iter().enumerate() {
            let row_index = position + 1;
            let row = row.map_err(|e| TableError::Source(e.into()))?;
            let result = decode(&row).and_then(|record| unique.admit(&row).map(|()| record));
            match result {
                Ok(record) => records.push(record),
                Err(cause) => {
                    trace!(row_index, error = %cause, "row failed to cast");
                    match mode {
                        CastMode::FailFast => {
                            return Err(TableError::Row {
                                row_index,
                                source: cause,
                            });
                        }
                        CastMode::BestEffort => {
                            report.errors.push(RowConversionError { row_index, cause });
                        }
                    }
                }
            }
        }

        debug!(
            cast = records.len(),
            failed = report.len(),
            ?mode,
            "table cast finished"
        );
        Ok(CastOutcome { records, report })
    }
}
