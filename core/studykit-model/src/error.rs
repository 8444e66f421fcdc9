//! Error types for schema definition and record construction.

use serde_json::Value;
use thiserror::Error;

use crate::schema::FieldType;
use crate::value::FieldValue;

/// Why a raw mapping could not become a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A field without a default was absent from the input.
    #[error("missing field '{field}'")]
    MissingField { field: String },

    /// The raw value could not be coerced to the declared type.
    #[error("field '{field}' expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        actual: Value,
    },

    /// The coerced value failed one of the field's constraints.
    #[error("field '{field}' {constraint} (got {actual})")]
    ConstraintViolation {
        field: String,
        constraint: String,
        actual: FieldValue,
    },

    /// An undeclared key was present and the schema forbids extra fields.
    #[error("unexpected field '{field}'")]
    UnexpectedField { field: String },

    /// A [`RecordHandler`](crate::RecordHandler) rejected the record.
    #[error("record rejected: {reason}")]
    Rejected { reason: String },
}

impl ValidationError {
    /// The field this error concerns, if it is tied to one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::TypeMismatch { field, .. }
            | Self::ConstraintViolation { field, .. }
            | Self::UnexpectedField { field } => Some(field),
            Self::Rejected { .. } => None,
        }
    }

    /// Stable machine-readable code, used by the HTTP surface.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::ConstraintViolation { .. } => "constraint_violation",
            Self::UnexpectedField { .. } => "unexpected_field",
            Self::Rejected { .. } => "rejected",
        }
    }
}

/// Every violation found by [`RecordSchema::construct_all`](crate::RecordSchema::construct_all),
/// in declaration order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} validation error(s){}", .errors.len(), bulleted(.errors))]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// The error fail-fast construction would have reported.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

fn bulleted(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| format!("\n  {e}")).collect()
}

/// Errors raised while declaring a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("duplicate field '{0}'")]
    DuplicateField(String),

    /// The declared default does not satisfy its own field's type or constraints.
    #[error("invalid default for field '{field}': {source}")]
    InvalidDefault {
        field: String,
        #[source]
        source: ValidationError,
    },

    #[error("invalid bounds on field '{field}': lower {lower} is not below upper {upper}")]
    InvalidBounds { field: String, lower: f64, upper: f64 },

    /// A range bound is NaN or infinite.
    #[error("invalid bound on field '{field}': {value} is not a finite number")]
    NonFiniteBound { field: String, value: f64 },

    #[error("invalid length on field '{field}': min {min} exceeds max {max}")]
    InvalidLength { field: String, min: usize, max: usize },

    #[error("invalid pattern on field '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },
}

/// Errors from decoding text into a record.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The decoded JSON was valid but not an object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Result type for decoding operations.
pub type ModelResult<T> = Result<T, ModelError>;
