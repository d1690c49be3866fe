//! Field-level casting behaviour across types and constraints.

use std::time::Duration;

use tableschema_cast::{CastOptions, Field};
use tableschema_model::{CastError, FieldDescriptor, FieldType, Value};

const DAY: u64 = 24 * 60 * 60;

#[test]
fn integer_maximum_is_inclusive() {
    let field = Field::builder("n", FieldType::Integer)
        .maximum("2")
        .build()
        .expect("build");
    assert_eq!(field.cast("2"), Ok(Value::Integer(2)));
    assert!(matches!(field.cast("3"), Err(CastError::AboveMaximum { .. })));
}

#[test]
fn nan_fails_a_bounded_number_field() {
    let field = Field::builder("n", FieldType::Number)
        .maximum("10")
        .build()
        .expect("build");
    assert!(matches!(field.cast("NaN"), Err(CastError::Unordered { .. })));
    assert_eq!(field.cast("9.5"), Ok(Value::Number(9.5)));

    let unbounded = Field::builder("n", FieldType::Number).build().expect("build");
    assert!(unbounded.test_string("NaN"));
}

#[test]
fn signed_currency_keeps_its_sign() {
    let field = Field::builder("price", FieldType::Number)
        .options(&CastOptions::default().with_bare_number(false))
        .build()
        .expect("build");
    assert_eq!(field.cast("-$5.00"), Ok(Value::Number(-5.0)));
    assert_eq!(field.cast("$5.00"), Ok(Value::Number(5.0)));
}

#[test]
fn date_bounds_use_the_field_format() {
    let field = Field::builder("d", FieldType::Date)
        .format("%d/%m/%Y")
        .minimum("01/01/2000")
        .build()
        .expect("build");
    assert!(field.cast("02/01/2000").is_ok());
    assert!(matches!(
        field.cast("31/12/1999"),
        Err(CastError::BelowMinimum { .. })
    ));
}

#[test]
fn duration_decomposition() {
    let field = Field::builder("d", FieldType::Duration).build().expect("build");
    let expected = Duration::from_secs(
        3 * 360 * DAY + 6 * 30 * DAY + 4 * DAY + 12 * 3600 + 30 * 60 + 5,
    );
    assert_eq!(field.cast("P3Y6M4DT12H30M5S"), Ok(Value::Duration(expected)));

    let value = Duration::from_secs(360 * DAY + 30 * DAY + DAY + 3600 + 60)
        + Duration::from_millis(500);
    assert_eq!(
        field.encode(&Value::Duration(value)).expect("encode"),
        "P1Y1M1DT1H1M0.5S"
    );
}

#[test]
fn boolean_prefers_true_when_listed_twice() {
    let field = Field::builder("b", FieldType::Boolean)
        .options(
            &CastOptions::default()
                .with_true_values(["1", "yes"])
                .with_false_values(["1", "no"]),
        )
        .build()
        .expect("build");
    assert_eq!(field.cast("1"), Ok(Value::Boolean(true)));
    assert_eq!(field.cast("no"), Ok(Value::Boolean(false)));
}

#[test]
fn enum_restricts_only_when_non_empty() {
    let restricted = Field::builder("s", FieldType::String)
        .enum_values(["red", "green"])
        .build()
        .expect("build");
    assert!(restricted.test_string("red"));
    assert!(!restricted.test_string("blue"));

    let open = Field::builder("s", FieldType::String)
        .enum_values(Vec::<String>::new())
        .build()
        .expect("build");
    assert!(open.test_string("blue"));
}

#[test]
fn numeric_encode_coercion() {
    let integer = Field::builder("i", FieldType::Integer).build().expect("build");
    assert_eq!(integer.encode(&Value::Number(10.0)).expect("narrow"), "10");
    assert!(integer.encode(&Value::String("10".into())).is_err());

    let number = Field::builder("n", FieldType::Number).build().expect("build");
    assert_eq!(number.encode(&Value::Integer(10)).expect("widen"), "10");
}

#[test]
fn built_from_descriptor_json() {
    let descriptor: FieldDescriptor = serde_json::from_str(
        r#"{"name": "price", "type": "number", "decimalChar": ",", "groupChar": " ",
            "bareNumber": false, "constraints": {"minimum": 0}}"#,
    )
    .expect("descriptor");
    let field = Field::build(&descriptor, &[String::new()]).expect("build");
    assert_eq!(field.cast("1 234,50 €"), Ok(Value::Number(1234.5)));
    assert!(matches!(field.cast("-1,0"), Err(CastError::BelowMinimum { .. })));
    assert!(field.is_missing(""));
}

#[test]
fn string_formats() {
    let uri = Field::builder("u", FieldType::String).format("uri").build().expect("build");
    assert!(uri.test_string("https://frictionlessdata.io/specs"));
    assert!(!uri.test_string("frictionlessdata.io"));

    let email = Field::builder("e", FieldType::String).format("email").build().expect("build");
    assert!(email.test_string("someone@example.com"));
    assert!(!email.test_string("someone"));
}
