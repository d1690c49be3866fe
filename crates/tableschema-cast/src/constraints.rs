//! Compiled field constraints.
//!
//! Patterns are compiled, `minimum`/`maximum` parsed and enum literals
//! canonicalized once, when the owning field is built. A bound that does not
//! parse is kept as its error and fails every cast that reaches it. Cast-time checks run in this order, stopping at the
//! first failure:
//!
//! 1. `pattern` against the raw cell (every type)
//! 2. `minLength`/`maxLength` against the raw cell (textual types only)
//! 3. the type codec, then `minimum`/`maximum` (ordered types only)
//! 4. `enum` against the canonical encoding of the cast value

use std::cmp::Ordering;
use std::collections::BTreeSet;

use regex::Regex;

use tableschema_model::{CastError, ConstraintsDescriptor, FieldType, SchemaError, Value};

use crate::codec;
use crate::options::CastOptions;

#[derive(Debug, Clone)]
pub struct Constraints {
    pub required: bool,
    pub unique: bool,
    minimum: Option<Bound>,
    maximum: Option<Bound>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pattern: Option<CompiledPattern>,
    enum_literals: Option<Vec<serde_json::Value>>,
    enum_canonical: BTreeSet<String>,
}

#[derive(Debug, Clone)]
struct Bound {
    source: String,
    parsed: Result<Value, CastError>,
}

impl Bound {
    fn parse(context: TypeContext<'_>, source: &str) -> Self {
        let parsed = codec::cast(context.field_type, context.format, context.options, source)
            .map_err(|e| CastError::InvalidBound {
                bound: source.to_string(),
                reason: e.to_string(),
            });
        Self {
            source: source.to_string(),
            parsed,
        }
    }

    /// Orders `value` against this bound; `NaN` and kind mismatches have no order.
    fn compare(&self, raw: &str, value: &Value) -> Result<Ordering, CastError> {
        let bound = self.parsed.as_ref().map_err(Clone::clone)?;
        compare(value, bound).ok_or_else(|| CastError::Unordered {
            value: raw.to_string(),
            bound: self.source.clone(),
        })
    }
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    source: String,
    regex: Regex,
}

/// Type information a constraint set needs to parse bounds and enum literals.
#[derive(Debug, Clone, Copy)]
pub struct TypeContext<'a> {
    pub field_type: FieldType,
    pub format: &'a str,
    pub options: &'a CastOptions,
}

impl Constraints {
    /// Compiles a declared constraint set for the named field.
    pub fn build(
        field: &str,
        context: TypeContext<'_>,
        declared: &ConstraintsDescriptor,
    ) -> Result<Self, SchemaError> {
        let pattern = declared
            .pattern
            .as_ref()
            .map(|source| {
                Regex::new(&format!("^(?:{source})$"))
                    .map(|regex| CompiledPattern {
                        source: source.clone(),
                        regex,
                    })
                    .map_err(|e| SchemaError::InvalidPattern {
                        field: field.to_string(),
                        source: e,
                    })
            })
            .transpose()?;

        let mut enum_canonical = BTreeSet::new();
        for literal in declared.enum_values.iter().flatten() {
            let raw = match literal {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            let invalid = |reason: String| SchemaError::InvalidEnum {
                field: field.to_string(),
                value: raw.clone(),
                reason,
            };
            let value = codec::cast(context.field_type, context.format, context.options, &raw)
                .map_err(|e| invalid(e.to_string()))?;
            let encoded = codec::encode(context.field_type, context.format, context.options, &value)
                .map_err(|e| invalid(e.to_string()))?;
            enum_canonical.insert(encoded);
        }

        Ok(Self {
            required: declared.required,
            unique: declared.unique,
            minimum: declared
                .minimum
                .as_deref()
                .map(|source| Bound::parse(context, source)),
            maximum: declared
                .maximum
                .as_deref()
                .map(|source| Bound::parse(context, source)),
            min_length: declared.min_length,
            max_length: declared.max_length,
            pattern,
            enum_literals: declared.enum_values.clone(),
            enum_canonical,
        })
    }

    pub fn minimum(&self) -> Option<&str> {
        self.minimum.as_ref().map(|b| b.source.as_str())
    }

    pub fn maximum(&self) -> Option<&str> {
        self.maximum.as_ref().map(|b| b.source.as_str())
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(|p| p.source.as_str())
    }

    /// Canonical encodings accepted by the `enum` constraint.
    pub fn enum_values(&self) -> &BTreeSet<String> {
        &self.enum_canonical
    }

    /// Pattern and length checks on the raw cell.
    pub fn check_raw(&self, field_type: FieldType, raw: &str) -> Result<(), CastError> {
        if let Some(pattern) = &self.pattern
            && !pattern.regex.is_match(raw)
        {
            return Err(CastError::PatternMismatch {
                value: raw.to_string(),
                pattern: pattern.source.clone(),
            });
        }
        if field_type.is_textual() {
            let length = raw.chars().count();
            if let Some(min_length) = self.min_length
                && length < min_length
            {
                return Err(CastError::TooShort { length, min_length });
            }
            if let Some(max_length) = self.max_length
                && length > max_length
            {
                return Err(CastError::TooLong { length, max_length });
            }
        }
        Ok(())
    }

    /// Inclusive `minimum`/`maximum` check for ordered types.
    pub fn check_bounds(
        &self,
        field_type: FieldType,
        raw: &str,
        value: &Value,
    ) -> Result<(), CastError> {
        if !field_type.is_ordered() {
            return Ok(());
        }
        if let Some(maximum) = &self.maximum
            && maximum.compare(raw, value)? == Ordering::Greater
        {
            return Err(CastError::AboveMaximum {
                value: raw.to_string(),
                maximum: maximum.source.clone(),
            });
        }
        if let Some(minimum) = &self.minimum
            && minimum.compare(raw, value)? == Ordering::Less
        {
            return Err(CastError::BelowMinimum {
                value: raw.to_string(),
                minimum: minimum.source.clone(),
            });
        }
        Ok(())
    }

    /// An empty or absent enum accepts everything.
    pub fn check_enum(&self, context: TypeContext<'_>, value: &Value) -> Result<(), CastError> {
        if self.enum_canonical.is_empty() {
            return Ok(());
        }
        let encoded = codec::encode(context.field_type, context.format, context.options, value)
            .map_err(|_| CastError::NotInEnum {
                value: value.to_string(),
            })?;
        if self.enum_canonical.contains(&encoded) {
            Ok(())
        } else {
            Err(CastError::NotInEnum { value: encoded })
        }
    }

    pub fn to_descriptor(&self) -> ConstraintsDescriptor {
        ConstraintsDescriptor {
            required: self.required,
            unique: self.unique,
            maximum: self.maximum().map(str::to_string),
            minimum: self.minimum().map(str::to_string),
            min_length: self.min_length,
            max_length: self.max_length,
            pattern: self.pattern().map(str::to_string),
            enum_values: self.enum_literals.clone(),
        }
    }
}

fn compare(value: &Value, bound: &Value) -> Option<Ordering> {
    match (value, bound) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
        (Value::Number(_) | Value::Integer(_), Value::Number(_) | Value::Integer(_)) => {
            value.as_f64()?.partial_cmp(&bound.as_f64()?)
        }
        _ => None,
    }
}
