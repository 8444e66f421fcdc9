use std::collections::HashSet;
use std::fmt;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::constraint::{Bound, Constraint};
use crate::error::{SchemaError, ValidationError};
use crate::value::FieldValue;

/// Declares a record type: a name and its fields in declaration order.
///
/// Build one with [`RecordSchema::builder`]. Schemas are immutable once built
/// and cheap to share behind an `Arc` or a `LazyLock`.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    pub(crate) name: String,
    pub(crate) fields: Vec<FieldDescriptor>,
    pub(crate) extra_fields: ExtraFields,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            extra_fields: ExtraFields::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn extra_fields(&self) -> ExtraFields {
        self.extra_fields
    }

    /// Names of fields that must appear in every input.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name.as_str())
    }
}

/// What to do with input keys the schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraFields {
    /// Drop them silently (default).
    #[default]
    Ignore,
    /// Fail with [`ValidationError::UnexpectedField`].
    Forbid,
}

/// Collects field descriptors, then checks them as a whole in [`build`](Self::build).
#[derive(Debug)]
pub struct RecordSchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    extra_fields: ExtraFields,
}

impl RecordSchemaBuilder {
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn extra_fields(mut self, policy: ExtraFields) -> Self {
        self.extra_fields = policy;
        self
    }

    /// Validates the declaration.
    ///
    /// # Errors
    ///
    /// Fails on duplicate field names, a range whose lower bound is not below
    /// its upper bound, an invalid pattern, or a default that does not satisfy
    /// its own field. Defaults are stored coerced to the declared type.
    pub fn build(self) -> Result<RecordSchema, SchemaError> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());
        for mut field in self.fields {
            if !seen.insert(field.name.clone()) {
                return Err(SchemaError::DuplicateField(field.name));
            }
            if let Some(reason) = field.pattern_error.take() {
                return Err(SchemaError::InvalidPattern {
                    field: field.name,
                    reason,
                });
            }
            field.check_bounds()?;
            if let Some(raw) = field.default.take() {
                // Non-finite floats have no JSON form and would round-trip as null.
                if let FieldValue::Float(f) = raw
                    && !f.is_finite()
                {
                    return Err(SchemaError::InvalidDefault {
                        source: ValidationError::TypeMismatch {
                            field: field.name.clone(),
                            expected: field.field_type,
                            actual: serde_json::Value::String(f.to_string()),
                        },
                        field: field.name,
                    });
                }
                let value = field
                    .validate_value(&raw.to_json())
                    .map_err(|source| SchemaError::InvalidDefault {
                        field: field.name.clone(),
                        source,
                    })?;
                field.default = Some(value);
            }
            fields.push(field);
        }
        Ok(RecordSchema {
            name: self.name,
            fields,
            extra_fields: self.extra_fields,
        })
    }
}

/// One declared field of a [`RecordSchema`].
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub(crate) name: String,
    pub(crate) field_type: FieldType,
    pub(crate) nullable: bool,
    pub(crate) default: Option<FieldValue>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) description: Option<String>,
    pattern_error: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            nullable: false,
            default: None,
            constraints: Vec::new(),
            description: None,
            pattern_error: None,
        }
    }

    /// Shorthand for a string field.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Shorthand for an integer field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// Shorthand for a float field.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float)
    }

    /// Shorthand for a boolean field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    /// Shorthand for an email-shaped string field.
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Email)
    }

    /// Accepts `null` and defaults to it when omitted.
    pub fn optional(mut self) -> Self {
        self.nullable = true;
        self.default = Some(FieldValue::Null);
        self
    }

    /// Accepts `null` without supplying a default.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Value must be strictly greater than `v`.
    pub fn gt(self, v: f64) -> Self {
        self.lower(Bound::Exclusive(v))
    }

    /// Value must be greater than or equal to `v`.
    pub fn ge(self, v: f64) -> Self {
        self.lower(Bound::Inclusive(v))
    }

    /// Value must be strictly less than `v`.
    pub fn lt(self, v: f64) -> Self {
        self.upper(Bound::Exclusive(v))
    }

    /// Value must be less than or equal to `v`.
    pub fn le(self, v: f64) -> Self {
        self.upper(Bound::Inclusive(v))
    }

    pub fn min_length(mut self, min: usize) -> Self {
        match self.length_mut() {
            Some(Constraint::Length { min: m, .. }) => *m = Some(min),
            _ => self.constraints.push(Constraint::Length {
                min: Some(min),
                max: None,
            }),
        }
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        match self.length_mut() {
            Some(Constraint::Length { max: m, .. }) => *m = Some(max),
            _ => self.constraints.push(Constraint::Length {
                min: None,
                max: Some(max),
            }),
        }
        self
    }

    /// String values must match `pattern`. An invalid pattern is reported by
    /// [`RecordSchemaBuilder::build`].
    pub fn pattern(mut self, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.constraints.push(Constraint::Pattern(re)),
            Err(e) => self.pattern_error = Some(e.to_string()),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// True when the field has no default and so must be supplied.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Looks the field up in `raw`, falling back to the default.
    pub(crate) fn resolve(&self, raw: &crate::RawRecord) -> Result<FieldValue, ValidationError> {
        match raw.get(&self.name) {
            Some(v) => self.validate_value(v),
            None => self
                .default
                .clone()
                .ok_or_else(|| ValidationError::MissingField {
                    field: self.name.clone(),
                }),
        }
    }

    /// Coerces and checks a single present raw value against this field.
    pub(crate) fn validate_value(
        &self,
        raw: &serde_json::Value,
    ) -> Result<FieldValue, ValidationError> {
        if raw.is_null() {
            return if self.nullable {
                Ok(FieldValue::Null)
            } else {
                Err(self.mismatch(raw))
            };
        }
        let value = FieldValue::coerce(self.field_type, raw).ok_or_else(|| self.mismatch(raw))?;
        for constraint in &self.constraints {
            if let Some(constraint) = constraint.check(&value) {
                return Err(ValidationError::ConstraintViolation {
                    field: self.name.clone(),
                    constraint,
                    actual: value,
                });
            }
        }
        Ok(value)
    }

    fn mismatch(&self, raw: &serde_json::Value) -> ValidationError {
        ValidationError::TypeMismatch {
            field: self.name.clone(),
            expected: self.field_type,
            actual: raw.clone(),
        }
    }

    fn lower(mut self, bound: Bound) -> Self {
        match self.range_mut() {
            Some(Constraint::Range { lower, .. }) => *lower = Some(bound),
            _ => self.constraints.push(Constraint::Range {
                lower: Some(bound),
                upper: None,
            }),
        }
        self
    }

    fn upper(mut self, bound: Bound) -> Self {
        match self.range_mut() {
            Some(Constraint::Range { upper, .. }) => *upper = Some(bound),
            _ => self.constraints.push(Constraint::Range {
                lower: None,
                upper: Some(bound),
            }),
        }
        self
    }

    fn range_mut(&mut self) -> Option<&mut Constraint> {
        self.constraints
            .iter_mut()
            .find(|c| matches!(c, Constraint::Range { .. }))
    }

    fn length_mut(&mut self) -> Option<&mut Constraint> {
        self.constraints
            .iter_mut()
            .find(|c| matches!(c, Constraint::Length { .. }))
    }

    fn check_bounds(&self) -> Result<(), SchemaError> {
        for c in &self.constraints {
            match c {
                Constraint::Range { lower, upper } => {
                    for bound in lower.iter().chain(upper.iter()) {
                        if !bound.value().is_finite() {
                            return Err(SchemaError::NonFiniteBound {
                                field: self.name.clone(),
                                value: bound.value(),
                            });
                        }
                    }
                    if let (Some(lo), Some(hi)) = (lower, upper) {
                        let empty = match (lo, hi) {
                            (Bound::Inclusive(a), Bound::Inclusive(b)) => a > b,
                            _ => lo.value() >= hi.value(),
                        };
                        if empty {
                            return Err(SchemaError::InvalidBounds {
                                field: self.name.clone(),
                                lower: lo.value(),
                                upper: hi.value(),
                            });
                        }
                    }
                }
                Constraint::Length {
                    min: Some(min),
                    max: Some(max),
                } if min > max => {
                    return Err(SchemaError::InvalidLength {
                        field: self.name.clone(),
                        min: *min,
                        max: *max,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// The declared primitive type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    /// A string that must look like `local@domain.tld`.
    Email,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
