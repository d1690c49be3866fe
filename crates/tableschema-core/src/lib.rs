//! Table schemas: descriptor handling, row/record binding and batch casting.

pub mod batch;
pub mod binder;
pub mod error;
pub mod record;
pub mod schema;

pub use batch::{CastMode, CastOutcome};
pub use binder::RecordBinder;
pub use error::{ConversionError, RowConversionError, RowError, TableError};
pub use record::{Column, FromValue, IntoValue, Mismatch, Record, Unrepresentable};
pub use schema::{Schema, SchemaBuilder};

pub use tableschema_cast::{CastOptions, Field, FieldBuilder};
pub use tableschema_model::{
    CastError, EncodeError, FieldType, GeoPoint, SchemaError, SourceError, Value,
};
