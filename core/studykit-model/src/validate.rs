//! Record construction: defaults, coercion, constraints, extra-key policy.

use serde_json::Value;
use tracing::debug;

use crate::error::{ModelError, ModelResult, ValidationError, ValidationErrors};
use crate::handler::RecordHandler;
use crate::record::Record;
use crate::schema::{ExtraFields, RecordSchema};
use crate::RawRecord;

impl RecordSchema {
    /// Builds a record from `raw`, stopping at the first violation in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingField`] for an absent field without default,
    /// [`ValidationError::TypeMismatch`] when coercion fails,
    /// [`ValidationError::ConstraintViolation`] when a constraint fails, and
    /// [`ValidationError::UnexpectedField`] for undeclared keys under
    /// [`ExtraFields::Forbid`].
    pub fn construct(&self, raw: &RawRecord) -> Result<Record, ValidationError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            match field.resolve(raw) {
                Ok(v) => fields.push((field.name.clone(), v)),
                Err(e) => {
                    debug!(schema = %self.name, field = %field.name, "record rejected: {e}");
                    return Err(e);
                }
            }
        }
        if let Some(field) = self.unexpected_keys(raw).next() {
            debug!(schema = %self.name, field, "record rejected: unexpected field");
            return Err(ValidationError::UnexpectedField {
                field: field.to_owned(),
            });
        }
        Ok(Record::new(self.name.clone(), fields))
    }

    /// Like [`construct`](Self::construct), but collects every violation.
    ///
    /// Field errors come first in declaration order, followed by unexpected
    /// keys in key order.
    pub fn construct_all(&self, raw: &RawRecord) -> Result<Record, ValidationErrors> {
        let mut fields = Vec::with_capacity(self.fields.len());
        let mut errors = Vec::new();
        for field in &self.fields {
            match field.resolve(raw) {
                Ok(v) => fields.push((field.name.clone(), v)),
                Err(e) => errors.push(e),
            }
        }
        errors.extend(
            self.unexpected_keys(raw)
                .map(|k| ValidationError::UnexpectedField { field: k.to_owned() }),
        );
        if errors.is_empty() {
            Ok(Record::new(self.name.clone(), fields))
        } else {
            debug!(schema = %self.name, count = errors.len(), "record rejected");
            Err(ValidationErrors::new(errors))
        }
    }

    /// Runs `handler`'s hooks around [`construct`](Self::construct).
    pub fn construct_with(
        &self,
        raw: &RawRecord,
        handler: &dyn RecordHandler,
    ) -> Result<Record, ValidationError> {
        let mut raw = raw.clone();
        handler.before_validate(&mut raw);
        let record = self.construct(&raw)?;
        handler
            .after_validate(&record)
            .map_err(|reason| ValidationError::Rejected { reason })?;
        Ok(record)
    }

    /// Constructs from an arbitrary JSON value, which must be an object.
    pub fn construct_json(&self, value: &Value) -> ModelResult<Record> {
        match value {
            Value::Object(map) => Ok(self.construct(map)?),
            other => Err(ModelError::NotAnObject(json_kind(other))),
        }
    }

    /// Parses JSON text and constructs a record from it.
    pub fn from_json_str(&self, text: &str) -> ModelResult<Record> {
        let value: Value = serde_json::from_str(text)?;
        self.construct_json(&value)
    }

    /// Inverse of [`Record::encode`].
    pub fn decode(&self, text: &str) -> ModelResult<Record> {
        self.from_json_str(text)
    }

    fn unexpected_keys<'a>(&'a self, raw: &'a RawRecord) -> impl Iterator<Item = &'a str> + 'a {
        let forbid = self.extra_fields == ExtraFields::Forbid;
        raw.keys()
            .filter(move |k| forbid && self.field(k).is_none())
            .map(String::as_str)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
