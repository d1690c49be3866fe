//! Value codecs, constraint evaluation and typed fields.
//!
//! A [`Field`] couples a [`FieldType`](tableschema_model::FieldType) with a
//! format, [`CastOptions`] and compiled [`Constraints`], and converts raw
//! cells to [`Value`](tableschema_model::Value)s and back.

pub mod codec;
pub mod constraints;
pub mod field;
pub mod options;

pub use constraints::{Constraints, TypeContext};
pub use field::{Field, FieldBuilder};
pub use options::CastOptions;
