use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use tableschema_core::{
    CastMode, ConversionError, RowConversionError, Schema, TableError, Value,
};
use tableschema_infer::{InferOptions, InferStrategy, infer_from_source};
use tableschema_ingest::{CsvOptions, CsvSource, write_csv};

use crate::cli::{CheckArgs, CsvArgs, InferArgs, StrategyArg, ValidateArgs};

/// Outcome of casting a CSV file against a schema.
#[derive(Debug)]
pub struct ValidationResult {
    pub csv: PathBuf,
    pub schema: PathBuf,
    pub rows_cast: usize,
    pub failures: Vec<RowConversionError>,
    /// True when `--fail-fast` stopped at the first failure.
    pub stopped_early: bool,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Infers a descriptor and returns it as pretty JSON. With `--output` the
/// descriptor is also written to that path.
pub fn run_infer(args: &InferArgs) -> Result<String> {
    let span = info_span!("infer", csv = %args.csv.display());
    let _guard = span.enter();

    let source = open_csv(&args.csv, &args.csv_args)?;
    let headers = source.headers().to_vec();
    let options = infer_options(args);
    let schema = infer_from_source(&headers, source, &options)
        .with_context(|| format!("infer schema from {}", args.csv.display()))?;
    let json = schema.to_json_string().context("serialize schema")?;

    if let Some(path) = &args.output {
        let file =
            File::create(path).with_context(|| format!("create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        schema
            .write(&mut writer)
            .and_then(|()| writer.flush().map_err(Into::into))
            .with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), fields = schema.fields().len(), "schema written");
    }
    Ok(json)
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationResult> {
    let span = info_span!("validate", csv = %args.csv.display());
    let _guard = span.enter();

    let schema = load_schema(&args.schema)?;
    let source = open_csv(&args.csv, &args.csv_args)?;
    if source.headers() != schema.headers().as_slice() {
        debug!(
            csv = ?source.headers(),
            schema = ?schema.headers(),
            "csv headers differ from schema field names"
        );
    }

    let mode = if args.fail_fast {
        CastMode::FailFast
    } else {
        CastMode::BestEffort
    };
    let (rows_cast, report, stopped_early) = match schema.cast_table_values(source, mode) {
        Ok(outcome) => {
            if let Some(path) = &args.output {
                write_encoded(&schema, &outcome.records, path)?;
            }
            (outcome.records.len(), outcome.report, false)
        }
        Err(TableError::Row { row_index, source }) => {
            if args.output.is_some() {
                debug!("no rows written after a fail-fast stop");
            }
            let report = ConversionError {
                errors: vec![RowConversionError {
                    row_index,
                    cause: source,
                }],
            };
            (row_index - 1, report, true)
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read {}", args.csv.display()));
        }
    };
    info!(rows_cast, failed = report.len(), "validation finished");

    Ok(ValidationResult {
        csv: args.csv.clone(),
        schema: args.schema.clone(),
        rows_cast,
        failures: report.errors,
        stopped_early,
    })
}

/// Writes cast records back out through each field's encoder.
fn write_encoded(schema: &Schema, records: &[Vec<Option<Value>>], path: &Path) -> Result<()> {
    let rows = records
        .iter()
        .enumerate()
        .map(|(index, values)| {
            schema
                .encode_values(values)
                .with_context(|| format!("encode cast row {}", index + 1))
        })
        .collect::<Result<Vec<_>>>()?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv(BufWriter::new(file), &schema.headers(), &rows)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "encoded rows written");
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<Schema> {
    load_schema(&args.schema)
}

pub fn load_schema(path: &Path) -> Result<Schema> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    Schema::read(file).with_context(|| format!("load schema {}", path.display()))
}

fn open_csv(path: &Path, args: &CsvArgs) -> Result<CsvSource<File>> {
    let options = csv_options(args)?;
    CsvSource::from_path(path, &options).with_context(|| format!("read csv {}", path.display()))
}

fn csv_options(args: &CsvArgs) -> Result<CsvOptions> {
    if !args.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {:?}", args.delimiter);
    }
    Ok(CsvOptions::default()
        .with_delimiter(args.delimiter as u8)
        .with_trim(args.trim))
}

fn infer_options(args: &InferArgs) -> InferOptions {
    let strategy = match args.strategy {
        StrategyArg::Voting => InferStrategy::TypeVoting,
        StrategyArg::Implicit => InferStrategy::ImplicitCast,
    };
    let options = InferOptions::default().with_strategy(strategy);
    match (args.all, args.sample_limit) {
        (true, _) => options.unlimited(),
        (false, Some(limit)) => options.with_sample_limit(limit),
        (false, None) => options,
    }
}
