pub mod descriptor;
pub mod error;
pub mod field_type;
pub mod source;
pub mod value;

pub use descriptor::{
    ConstraintsDescriptor, DEFAULT_FORMAT, FieldDescriptor, ForeignKeyDescriptor,
    ReferenceDescriptor, SchemaDescriptor, default_missing_values,
};
pub use error::{CastError, EncodeError, SchemaError};
pub use field_type::FieldType;
pub use source::{SourceError, rows};
pub use value::{GeoPoint, Value};
