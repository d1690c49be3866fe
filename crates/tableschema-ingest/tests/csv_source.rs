//! CSV files feeding schema inference and casting.

use std::fs;

use tableschema_core::{CastMode, FieldType, RowError, Schema, TableError, Value};
use tableschema_infer::{InferOptions, infer_from_source};
use tableschema_ingest::{CsvOptions, CsvSource, IngestError, read_csv_table, write_csv};

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    fs::write(file.path(), contents).expect("write csv");
    file
}

#[test]
fn infer_then_cast_a_csv_file() {
    let file = write_temp("Name,Age,Weight\nFoo,42,75.5\nBar,30,80\n");
    let options = CsvOptions::default();

    let source = CsvSource::from_path(file.path(), &options).expect("open");
    let headers = source.headers().to_vec();
    let schema = infer_from_source(&headers, source, &InferOptions::default()).expect("infer");
    let types: Vec<FieldType> = schema.fields().iter().map(|f| f.field_type()).collect();
    assert_eq!(
        types,
        vec![FieldType::String, FieldType::Integer, FieldType::Number]
    );

    let source = CsvSource::from_path(file.path(), &options).expect("reopen");
    let outcome = schema
        .cast_table_values(source, CastMode::FailFast)
        .expect("cast");
    assert_eq!(outcome.records[1][1], Some(Value::Integer(30)));
}

#[test]
fn ragged_csv_rows_fail_as_length_mismatch() {
    let file = write_temp("A,B\n1,2\n3\n");
    let schema = Schema::builder()
        .field("A", FieldType::Integer)
        .field("B", FieldType::Integer)
        .build()
        .expect("schema");
    let source = CsvSource::from_path(file.path(), &CsvOptions::default()).expect("open");
    let err = schema
        .cast_table_values(source, CastMode::FailFast)
        .expect_err("ragged row");
    assert!(matches!(
        err,
        TableError::Row {
            row_index: 2,
            source: RowError::LengthMismatch { .. }
        }
    ));
}

#[test]
fn read_table_and_write_it_back() {
    let file = write_temp("ID,Note\n1,plain\n2,\"with, comma\"\n");
    let table = read_csv_table(file.path(), &CsvOptions::default()).expect("read");
    assert_eq!(table.headers, ["ID", "Note"]);
    assert_eq!(table.rows[1], ["2", "with, comma"]);

    let mut out = Vec::new();
    write_csv(&mut out, &table.headers, &table.rows).expect("write");
    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "ID,Note\n1,plain\n2,\"with, comma\"\n"
    );
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let err = read_csv_table(&path, &CsvOptions::default()).expect_err("missing file");
    assert!(matches!(err, IngestError::Io { ref path, .. } if path.ends_with("absent.csv")));
}
