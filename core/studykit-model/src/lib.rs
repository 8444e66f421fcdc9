//! Schema-described records for studykit.
//!
//! Defines the declarative validation model the rest of the workspace builds on:
//! - [`RecordSchema`]: a named, ordered list of typed field descriptors
//! - [`FieldDescriptor`]: one field: type, nullability, default, constraints
//! - [`Constraint`]: the closed set of checks applied after coercion
//! - [`Record`]: an immutable, fully-validated instance of a schema
//! - [`RecordHandler`]: optional hooks for pre-processing and cross-field rules
//!
//! Construction is all-or-nothing: [`RecordSchema::construct`] either returns a
//! record whose every field satisfies its declared type and constraints, or the
//! first [`ValidationError`] in declaration order. [`RecordSchema::construct_all`]
//! reports every violation instead.
//!
//! ```
//! use studykit_model::{FieldDescriptor, RecordSchema};
//! use serde_json::json;
//!
//! let schema = RecordSchema::builder("Student")
//!     .field(FieldDescriptor::string("name").default("nitish"))
//!     .field(FieldDescriptor::integer("age").optional())
//!     .field(FieldDescriptor::email("email"))
//!     .field(FieldDescriptor::float("cgpa").gt(0.0).lt(10.0).default(5.0))
//!     .build()
//!     .unwrap();
//!
//! let record = schema
//!     .construct_json(&json!({"age": "32", "email": "abc@gmail.com"}))
//!     .unwrap();
//! assert_eq!(record.get_i64("age"), Some(32));
//! assert_eq!(record.get_str("name"), Some("nitish"));
//! ```

mod constraint;
mod error;
mod handler;
mod record;
mod schema;
mod validate;
mod value;

pub use constraint::{Bound, Constraint};
pub use error::{ModelError, ModelResult, SchemaError, ValidationError, ValidationErrors};
pub use handler::RecordHandler;
pub use record::Record;
pub use schema::{ExtraFields, FieldDescriptor, FieldType, RecordSchema, RecordSchemaBuilder};
pub use value::FieldValue;

/// Raw, untyped input to [`RecordSchema::construct`]: field name to JSON value.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;
