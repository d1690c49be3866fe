//! Typed destination records.
//!
//! A record type lists its columns once through [`Record::columns`]. Each
//! [`Column`] names the attribute, optionally overrides the schema field it
//! binds to, and carries a typed getter and setter. Conversions between
//! [`Value`] and attribute types go through [`FromValue`] and [`IntoValue`].

use std::any::type_name;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tableschema_model::{GeoPoint, Value};

/// A struct that rows can be cast into and encoded from.
pub trait Record: Default + 'static {
    fn columns() -> Vec<Column<Self>>;
}

/// A cast value could not be stored in the attribute's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub found: &'static str,
    pub target: &'static str,
}

type Setter<R> = Box<dyn Fn(&mut R, Value) -> Result<(), Mismatch> + Send + Sync>;
type Getter<R> = Box<dyn Fn(&R) -> Result<Option<Value>, Unrepresentable> + Send + Sync>;

/// One attribute of a record type.
pub struct Column<R> {
    attribute: &'static str,
    header: Option<&'static str>,
    set: Setter<R>,
    get: Getter<R>,
}

impl<R: 'static> Column<R> {
    pub fn new<T>(attribute: &'static str, get: fn(&R) -> T, set: fn(&mut R, T)) -> Self
    where
        T: FromValue + IntoValue + 'static,
    {
        Self {
            attribute,
            header: None,
            set: Box::new(move |record, value| {
                let found = value.kind();
                let converted = T::from_value(value).ok_or(Mismatch {
                    found,
                    target: type_name::<T>(),
                })?;
                set(record, converted);
                Ok(())
            }),
            get: Box::new(move |record| get(record).into_value()),
        }
    }

    /// Binds this attribute to the schema field `header` instead of its own name.
    pub fn header(mut self, header: &'static str) -> Self {
        self.header = Some(header);
        self
    }

    pub fn attribute(&self) -> &'static str {
        self.attribute
    }

    /// The schema field name this column resolves to.
    pub fn field_name(&self) -> &'static str {
        self.header.unwrap_or(self.attribute)
    }

    pub(crate) fn set(&self, record: &mut R, value: Value) -> Result<(), Mismatch> {
        (self.set)(record, value)
    }

    pub(crate) fn get(&self, record: &R) -> Result<Option<Value>, Unrepresentable> {
        (self.get)(record)
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("attribute", &self.attribute)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

pub trait FromValue: Sized {
    fn from_value(value: Value) -> Option<Self>;
}

/// An attribute value with no [`Value`] representation, such as a `u64`
/// above `i64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unrepresentable {
    pub value: String,
    pub reason: &'static str,
}

/// `Ok(None)` encodes as the schema's missing-value marker.
pub trait IntoValue {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        Ok(Some(self))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Option<Self> {
        T::from_value(value).map(Some)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        self.map_or(Ok(None), IntoValue::into_value)
    }
}

macro_rules! integer_conversions {
    ($($ty:ty),*) => {$(
        impl FromValue for $ty {
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Integer(v) => <$ty>::try_from(v).ok(),
                    _ => None,
                }
            }
        }

        impl IntoValue for $ty {
            fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
                i64::try_from(self)
                    .map(|v| Some(Value::Integer(v)))
                    .map_err(|_| Unrepresentable {
                        value: self.to_string(),
                        reason: "outside the signed 64-bit integer range",
                    })
            }
        }
    )*};
}

integer_conversions!(i64, i32, u32, u64);

impl FromValue for f64 {
    fn from_value(value: Value) -> Option<Self> {
        value.as_f64()
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        Ok(Some(Value::Number(self)))
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        Ok(Some(Value::Boolean(self)))
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(text),
            _ => None,
        }
    }
}

impl IntoValue for String {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        Ok(Some(Value::String(self)))
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

impl IntoValue for DateTime<Utc> {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        Ok(Some(Value::DateTime(self)))
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::DateTime(dt) => Some(dt.date_naive()),
            _ => None,
        }
    }
}

impl IntoValue for NaiveDate {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        Ok(Some(Value::DateTime(self.and_time(NaiveTime::MIN).and_utc())))
    }
}

impl FromValue for Duration {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Duration(duration) => Some(duration),
            _ => None,
        }
    }
}

impl IntoValue for Duration {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        Ok(Some(Value::Duration(self)))
    }
}

impl FromValue for GeoPoint {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::GeoPoint(point) => Some(point),
            _ => None,
        }
    }
}

impl IntoValue for GeoPoint {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        Ok(Some(Value::GeoPoint(self)))
    }
}

impl FromValue for serde_json::Map<String, serde_json::Value> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl IntoValue for serde_json::Map<String, serde_json::Value> {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        Ok(Some(Value::Object(self)))
    }
}

impl FromValue for Vec<serde_json::Value> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl IntoValue for Vec<serde_json::Value> {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        Ok(Some(Value::Array(self)))
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(serde_json::Value::Object(map)),
            Value::Array(items) => Some(serde_json::Value::Array(items)),
            Value::String(text) => Some(serde_json::Value::String(text)),
            Value::Boolean(v) => Some(serde_json::Value::Bool(v)),
            Value::Integer(v) => Some(serde_json::Value::from(v)),
            Value::Number(v) => serde_json::Number::from_f64(v).map(serde_json::Value::Number),
            Value::DateTime(_) | Value::Duration(_) | Value::GeoPoint(_) => None,
        }
    }
}

impl IntoValue for serde_json::Value {
    fn into_value(self) -> Result<Option<Value>, Unrepresentable> {
        let value = match self {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::Bool(v) => Value::Boolean(v),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(v), _) => Value::Integer(v),
                (None, Some(v)) => Value::Number(v),
                (None, None) => {
                    return Err(Unrepresentable {
                        value: n.to_string(),
                        reason: "not representable as a 64-bit number",
                    });
                }
            },
            serde_json::Value::String(text) => Value::String(text),
            serde_json::Value::Array(items) => Value::Array(items),
            serde_json::Value::Object(map) => Value::Object(map),
        };
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Person {
        name: String,
        age: Option<u32>,
    }

    impl Record for Person {
        fn columns() -> Vec<Column<Self>> {
            vec![
                Column::new("name", |p: &Person| p.name.clone(), |p, v| p.name = v)
                    .header("Name"),
                Column::new("age", |p: &Person| p.age, |p, v| p.age = v),
            ]
        }
    }

    #[test]
    fn columns_resolve_header_overrides() {
        let columns = Person::columns();
        assert_eq!(columns[0].field_name(), "Name");
        assert_eq!(columns[1].field_name(), "age");
    }

    #[test]
    fn setters_reject_mismatched_kinds() {
        let columns = Person::columns();
        let mut person = Person::default();
        columns[1]
            .set(&mut person, Value::Integer(42))
            .expect("integer fits u32");
        assert_eq!(person.age, Some(42));

        let err = columns[1]
            .set(&mut person, Value::String("42".into()))
            .expect_err("string into u32");
        assert_eq!(err.found, "string");

        assert!(columns[1].set(&mut person, Value::Integer(-1)).is_err());
    }

    #[test]
    fn getters_map_none_to_missing() {
        let columns = Person::columns();
        let person = Person {
            name: "Foo".into(),
            age: None,
        };
        assert_eq!(columns[0].get(&person), Ok(Some(Value::String("Foo".into()))));
        assert_eq!(columns[1].get(&person), Ok(None));
    }

    #[test]
    fn out_of_range_integers_are_not_missing() {
        let err = u64::MAX.into_value().expect_err("above i64::MAX");
        assert_eq!(err.value, u64::MAX.to_string());
        assert!(Some(u64::MAX).into_value().is_err());
        assert_eq!(
            (i64::MAX as u64).into_value(),
            Ok(Some(Value::Integer(i64::MAX)))
        );
        assert_eq!(None::<u64>.into_value(), Ok(None));
    }
}
