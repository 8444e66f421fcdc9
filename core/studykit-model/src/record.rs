use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::FieldValue;
use crate::RawRecord;

/// An immutable, fully-validated instance of a [`RecordSchema`](crate::RecordSchema).
///
/// Every declared field is present, in declaration order. There is no way to
/// mutate a record; build a new one from a modified [`to_map`](Self::to_map).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: String,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub(crate) fn new(schema: String, fields: Vec<(String, FieldValue)>) -> Self {
        Self { schema, fields }
    }

    /// Name of the schema this record was constructed from.
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field name to JSON value, suitable as input to another `construct`.
    pub fn to_map(&self) -> RawRecord {
        self.fields
            .iter()
            .map(|(n, v)| (n.clone(), v.to_json()))
            .collect()
    }

    /// Canonical text encoding: a compact JSON object with keys in declaration order.
    pub fn encode(&self) -> String {
        let mut out = String::from("{");
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&serde_json::Value::String(name.clone()).to_string());
            out.push(':');
            out.push_str(&value.to_json().to_string());
        }
        out.push('}');
        out
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
