//! Named schemas the server validates against.

use std::collections::BTreeMap;
use std::sync::Arc;

use studykit_model::{FieldDescriptor, RecordSchema, SchemaError};

/// Schemas keyed by [`RecordSchema::name`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Arc<RecordSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding [`student_schema`] and [`patient_schema`].
    pub fn with_defaults() -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        registry.register(student_schema()?);
        registry.register(patient_schema()?);
        Ok(registry)
    }

    /// Adds a schema, returning the one it replaced under the same name.
    pub fn register(&mut self, schema: RecordSchema) -> Option<Arc<RecordSchema>> {
        self.schemas
            .insert(schema.name().to_string(), Arc::new(schema))
    }

    pub fn get(&self, name: &str) -> Option<Arc<RecordSchema>> {
        self.schemas.get(name).cloned()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// `name` defaults to "nitish", `age` is optional, `email` is required and
/// `cgpa` lies in (0, 10) with default 5.
pub fn student_schema() -> Result<RecordSchema, SchemaError> {
    RecordSchema::builder("student")
        .field(FieldDescriptor::string("name").default("nitish"))
        .field(FieldDescriptor::integer("age").optional())
        .field(FieldDescriptor::email("email"))
        .field(
            FieldDescriptor::float("cgpa")
                .gt(0.0)
                .lt(10.0)
                .default(5.0)
                .describe("decimal value representing the cgpa of the student"),
        )
        .build()
}

pub fn patient_schema() -> Result<RecordSchema, SchemaError> {
    RecordSchema::builder("patient")
        .field(FieldDescriptor::string("name"))
        .field(FieldDescriptor::integer("age"))
        .build()
}
