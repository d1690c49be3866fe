//! Typed, constrained table columns.

use tableschema_model::{
    CastError, ConstraintsDescriptor, EncodeError, FieldDescriptor, FieldType,
    SchemaError, Value, default_missing_values,
};

use crate::codec;
use crate::constraints::{Constraints, TypeContext};
use crate::options::CastOptions;

/// A named column with a type, a format, type options and compiled constraints.
///
/// Fields are immutable once built and safe to share between threads.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    field_type: FieldType,
    format: String,
    title: Option<String>,
    description: Option<String>,
    options: CastOptions,
    constraints: Constraints,
    missing_values: Vec<String>,
}

impl Field {
    /// Builds a field from its descriptor, compiling the pattern and enum
    /// constraints. `missing_values` comes from the owning schema.
    pub fn build(descriptor: &FieldDescriptor, missing_values: &[String]) -> Result<Self, SchemaError> {
        let format = codec::normalize_format(&descriptor.format).to_string();
        let options = CastOptions::from_descriptor(descriptor);
        let context = TypeContext {
            field_type: descriptor.field_type,
            format: &format,
            options: &options,
        };
        let constraints = Constraints::build(&descriptor.name, context, &descriptor.constraints)?;
        Ok(Self {
            name: descriptor.name.clone(),
            field_type: descriptor.field_type,
            format,
            title: descriptor.title.clone(),
            description: descriptor.description.clone(),
            options,
            constraints,
            missing_values: missing_values.to_vec(),
        })
    }

    pub fn builder(name: impl Into<String>, field_type: FieldType) -> FieldBuilder {
        FieldBuilder::new(name, field_type)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn options(&self) -> &CastOptions {
        &self.options
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn missing_values(&self) -> &[String] {
        &self.missing_values
    }

    pub fn is_missing(&self, raw: &str) -> bool {
        self.missing_values.iter().any(|marker| marker == raw)
    }

    /// Parses `raw` and applies every constraint except `required`.
    ///
    /// Missing-value markers are not special here; use [`Field::cast_cell`]
    /// for missing-aware casting.
    pub fn cast(&self, raw: &str) -> Result<Value, CastError> {
        let context = self.context();
        self.constraints.check_raw(self.field_type, raw)?;
        let value = codec::cast(self.field_type, &self.format, &self.options, raw)?;
        self.constraints.check_bounds(self.field_type, raw, &value)?;
        self.constraints.check_enum(context, &value)?;
        Ok(value)
    }

    /// Casts a cell, returning `None` for a missing-value marker.
    ///
    /// A missing cell on a required field is [`CastError::Required`].
    pub fn cast_cell(&self, raw: &str) -> Result<Option<Value>, CastError> {
        if self.is_missing(raw) {
            if self.constraints.required {
                return Err(CastError::Required);
            }
            return Ok(None);
        }
        self.cast(raw).map(Some)
    }

    /// Renders a value as this field's canonical text.
    pub fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        codec::encode(self.field_type, &self.format, &self.options, value)
    }

    /// Returns true if `raw` casts successfully.
    pub fn test_string(&self, raw: &str) -> bool {
        self.cast(raw).is_ok()
    }

    pub fn to_descriptor(&self) -> FieldDescriptor {
        let mut descriptor = FieldDescriptor::new(self.name.clone(), self.field_type);
        descriptor.format = self.format.clone();
        descriptor.title = self.title.clone();
        descriptor.description = self.description.clone();
        self.options.apply_to(&mut descriptor);
        descriptor.constraints = self.constraints.to_descriptor();
        descriptor
    }

    fn context(&self) -> TypeContext<'_> {
        TypeContext {
            field_type: self.field_type,
            format: &self.format,
            options: &self.options,
        }
    }
}

/// Programmatic field construction.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    descriptor: FieldDescriptor,
    missing_values: Vec<String>,
}

impl FieldBuilder {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            descriptor: FieldDescriptor::new(name, field_type),
            missing_values: default_missing_values(),
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.descriptor.format = format.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.descriptor.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.descriptor.description = Some(description.into());
        self
    }

    pub fn options(mut self, options: &CastOptions) -> Self {
        options.apply_to(&mut self.descriptor);
        self
    }

    pub fn constraints(mut self, constraints: ConstraintsDescriptor) -> Self {
        self.descriptor.constraints = constraints;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.descriptor.constraints.required = required;
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.descriptor.constraints.unique = unique;
        self
    }

    pub fn minimum(mut self, minimum: impl Into<String>) -> Self {
        self.descriptor.constraints.minimum = Some(minimum.into());
        self
    }

    pub fn maximum(mut self, maximum: impl Into<String>) -> Self {
        self.descriptor.constraints.maximum = Some(maximum.into());
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.descriptor.constraints.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.descriptor.constraints.max_length = Some(max_length);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.descriptor.constraints.pattern = Some(pattern.into());
        self
    }

    pub fn enum_values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<serde_json::Value>,
    {
        self.descriptor.constraints.enum_values =
            Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn missing_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<Field, SchemaError> {
        Field::build(&self.descriptor, &self.missing_values)
    }
}

impl Default for FieldBuilder {
    fn default() -> Self {
        Self::new(String::new(), FieldType::default())
    }
}
