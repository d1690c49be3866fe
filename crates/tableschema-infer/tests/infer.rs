//! Inference over whole tables and row sources.

use tableschema_core::{CastMode, FieldType, Schema};
use tableschema_infer::{
    InferError, InferOptions, InferStrategy, infer, infer_from_source, infer_implicit_cast,
    infer_type_voting,
};
use tableschema_model::rows;

fn table(cells: &[[&str; 3]]) -> Vec<Vec<String>> {
    cells
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn types(schema: &Schema) -> Vec<FieldType> {
    schema.fields().iter().map(|f| f.field_type()).collect()
}

#[test]
fn infers_name_age_weight() {
    let rows = table(&[["Foo", "42", "75.5"], ["Bar", "30", "80"], ["Baz", "55", "60.25"]]);
    let schema = infer(&["Name", "Age", "Weight"], &rows, &InferOptions::default())
        .expect("infer");
    assert_eq!(schema.headers(), ["Name", "Age", "Weight"]);
    assert_eq!(
        types(&schema),
        vec![FieldType::String, FieldType::Integer, FieldType::Number]
    );

    // The inferred schema casts the rows it was inferred from.
    let outcome = schema
        .cast_table_values(rows.into_iter().map(Ok::<_, std::io::Error>), CastMode::FailFast)
        .expect("cast");
    assert_eq!(outcome.records.len(), 3);
}

#[test]
fn strategies_disagree_on_mostly_boolean_columns() {
    let rows = vec![vec!["0".to_string()], vec!["0".into()], vec!["2.5".into()]];
    let options = InferOptions::default();

    let voted = infer_type_voting(&["Flag"], &rows, &options).expect("voting");
    assert_eq!(types(&voted), vec![FieldType::Boolean]);

    let widened = infer_implicit_cast(&["Flag"], &rows, &options).expect("implicit");
    assert_eq!(types(&widened), vec![FieldType::Number]);
}

#[test]
fn ragged_rows_are_rejected() {
    let rows = vec![
        vec!["1".to_string(), "a".into()],
        vec!["2".into()],
    ];
    let err = infer(&["ID", "Code"], &rows, &InferOptions::default()).expect_err("ragged");
    assert!(matches!(
        err,
        InferError::TabularShape {
            row: 2,
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn sample_limit_bounds_the_rows_considered() {
    // Only the first two rows are sampled, so the trailing text never counts.
    let source = rows([["1"], ["2"], ["three"], ["four"], ["five"]]);
    let options = InferOptions::default()
        .with_strategy(InferStrategy::ImplicitCast)
        .with_sample_limit(2);
    let schema = infer_from_source(&["N"], source, &options).expect("infer");
    assert_eq!(types(&schema), vec![FieldType::Integer]);

    let source = rows([["1"], ["2"], ["three"], ["four"], ["five"]]);
    let schema = infer_from_source(&["N"], source, &options.clone().unlimited()).expect("infer");
    assert_eq!(types(&schema), vec![FieldType::String]);
}

#[test]
fn candidate_order_can_be_overridden() {
    let rows = vec![vec!["1".to_string()], vec!["0".into()]];
    let options = InferOptions::default().with_candidates([FieldType::Integer, FieldType::Boolean]);
    let schema = infer(&["N"], &rows, &options).expect("infer");
    assert_eq!(types(&schema), vec![FieldType::Integer]);
}

#[test]
fn custom_missing_values_flow_into_the_schema() {
    let rows = vec![vec!["NA".to_string()], vec!["12".into()]];
    let options = InferOptions::default().with_missing_values(["NA"]);
    let schema = infer(&["N"], &rows, &options).expect("infer");
    assert_eq!(types(&schema), vec![FieldType::Integer]);
    assert_eq!(schema.missing_values(), ["NA"]);
}

#[test]
fn empty_sample_yields_string_columns() {
    let rows: Vec<Vec<String>> = Vec::new();
    let schema = infer(&["A", "B"], &rows, &InferOptions::default()).expect("infer");
    assert_eq!(types(&schema), vec![FieldType::String, FieldType::String]);
}
