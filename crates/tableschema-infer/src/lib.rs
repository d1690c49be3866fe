//! Schema inference from sampled tabular data.
//!
//! Every column starts as `string`. A column's type is derived from the
//! non-missing cells of the sample by one of two strategies.
//!
//! # Type voting
//!
//! Each cell is cast against the candidate types in priority order and votes
//! for the first one that succeeds. The type with the most votes wins; ties go
//! to the candidate listed first. A column without votes stays `string`.
//!
//! # Implicit cast
//!
//! The first cell picks the narrowest matching candidate. A later cell that
//! does not fit the current type moves the column to the first type of the
//! current type's [`implicit_cast_chain`] that does fit, ending at `string`.
//! Memory use is constant per column.
//!
//! The strategies can disagree: `["0", "0", "2.5"]` votes `boolean` but widens
//! to `number`.

pub mod error;
pub mod options;
pub mod sample;

use tracing::debug;

use tableschema_cast::Field;
use tableschema_core::Schema;
use tableschema_model::{FieldType, SourceError};

pub use error::{InferError, Result};
pub use options::{DEFAULT_CANDIDATES, DEFAULT_SAMPLE_LIMIT, InferOptions, InferStrategy};
pub use sample::sample;

/// Types a column of `current` type may widen to, in order.
pub fn implicit_cast_chain(current: FieldType) -> &'static [FieldType] {
    match current {
        FieldType::Boolean | FieldType::Year => {
            &[FieldType::Integer, FieldType::Number, FieldType::String]
        }
        FieldType::Integer => &[FieldType::Number, FieldType::String],
        FieldType::YearMonth => &[FieldType::Date, FieldType::DateTime, FieldType::String],
        FieldType::Date => &[FieldType::DateTime, FieldType::String],
        FieldType::Number
        | FieldType::String
        | FieldType::Time
        | FieldType::DateTime
        | FieldType::Duration
        | FieldType::GeoPoint
        | FieldType::Object
        | FieldType::Array
        | FieldType::Any => &[FieldType::String],
    }
}

/// Samples rows from a source and infers a schema for them.
pub fn infer_from_source<H, I, E>(headers: &[H], source: I, options: &InferOptions) -> Result<Schema>
where
    H: AsRef<str>,
    I: IntoIterator<Item = std::result::Result<Vec<String>, E>>,
    E: Into<SourceError>,
{
    let rows = sample(source, options.sample_limit)?;
    infer(headers, &rows, options)
}

/// Infers a schema with the strategy selected in `options`.
///
/// Every row must have exactly one cell per header.
pub fn infer<H, R>(headers: &[H], rows: &[R], options: &InferOptions) -> Result<Schema>
where
    H: AsRef<str>,
    R: AsRef<[String]>,
{
    check_shape(headers.len(), rows)?;
    let testers = Testers::new()?;
    let types: Vec<FieldType> = (0..headers.len())
        .map(|column| {
            let cells = rows
                .iter()
                .map(|row| row.as_ref()[column].as_str())
                .filter(|cell| !options.missing_values.iter().any(|m| m == cell));
            match options.strategy {
                InferStrategy::TypeVoting => vote(&testers, &options.candidates, cells),
                InferStrategy::ImplicitCast => widen(&testers, &options.candidates, cells),
            }
        })
        .collect();

    let schema = headers
        .iter()
        .zip(&types)
        .fold(Schema::builder(), |builder, (header, field_type)| {
            builder.field(header.as_ref(), *field_type)
        })
        .missing_values(options.missing_values.iter().cloned())
        .build()?;
    debug!(
        columns = types.len(),
        rows = rows.len(),
        strategy = ?options.strategy,
        "schema inferred"
    );
    Ok(schema)
}

/// [`infer`] with [`InferStrategy::TypeVoting`].
pub fn infer_type_voting<H, R>(headers: &[H], rows: &[R], options: &InferOptions) -> Result<Schema>
where
    H: AsRef<str>,
    R: AsRef<[String]>,
{
    let options = options.clone().with_strategy(InferStrategy::TypeVoting);
    infer(headers, rows, &options)
}

/// [`infer`] with [`InferStrategy::ImplicitCast`].
pub fn infer_implicit_cast<H, R>(headers: &[H], rows: &[R], options: &InferOptions) -> Result<Schema>
where
    H: AsRef<str>,
    R: AsRef<[String]>,
{
    let options = options.clone().with_strategy(InferStrategy::ImplicitCast);
    infer(headers, rows, &options)
}

fn check_shape<R: AsRef<[String]>>(expected: usize, rows: &[R]) -> Result<()> {
    match rows
        .iter()
        .position(|row| row.as_ref().len() != expected)
    {
        Some(position) => Err(InferError::TabularShape {
            row: position + 1,
            expected,
            actual: rows[position].as_ref().len(),
        }),
        None => Ok(()),
    }
}

/// One unconstrained, default-format field per type, used to test cells.
struct Testers {
    fields: Vec<Field>,
}

impl Testers {
    fn new() -> Result<Self> {
        let fields = FieldType::ALL
            .iter()
            .map(|field_type| Field::builder(field_type.as_str(), *field_type).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { fields })
    }

    fn matches(&self, field_type: FieldType, cell: &str) -> bool {
        self.fields
            .iter()
            .find(|field| field.field_type() == field_type)
            .is_some_and(|field| field.test_string(cell))
    }

    fn narrowest(&self, candidates: &[FieldType], cell: &str) -> Option<FieldType> {
        candidates
            .iter()
            .copied()
            .find(|candidate| self.matches(*candidate, cell))
    }
}

fn vote<'a>(
    testers: &Testers,
    candidates: &[FieldType],
    cells: impl Iterator<Item = &'a str>,
) -> FieldType {
    let mut votes = vec![0usize; candidates.len()];
    for cell in cells {
        if let Some(position) = candidates
            .iter()
            .position(|candidate| testers.matches(*candidate, cell))
        {
            votes[position] += 1;
        }
    }
    let mut winner = FieldType::String;
    let mut best = 0;
    for (candidate, count) in candidates.iter().zip(votes) {
        if count > best {
            winner = *candidate;
            best = count;
        }
    }
    winner
}

fn widen<'a>(
    testers: &Testers,
    candidates: &[FieldType],
    cells: impl Iterator<Item = &'a str>,
) -> FieldType {
    let mut current: Option<FieldType> = None;
    for cell in cells {
        current = Some(match current {
            None => testers
                .narrowest(candidates, cell)
                .unwrap_or(FieldType::String),
            Some(FieldType::String) => break,
            Some(field_type) if testers.matches(field_type, cell) => field_type,
            Some(field_type) => testers
                .narrowest(implicit_cast_chain(field_type), cell)
                .unwrap_or(FieldType::String),
        });
    }
    current.unwrap_or(FieldType::String)
}
