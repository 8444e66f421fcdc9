use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use studykit_model::{
    Constraint, ExtraFields, FieldDescriptor, FieldType, FieldValue, ModelError, RawRecord,
    RecordSchema, ValidationError,
};

fn raw(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("test input must be an object, got {other}"),
    }
}

fn student() -> RecordSchema {
    RecordSchema::builder("Student")
        .field(FieldDescriptor::string("name").default("nitish"))
        .field(FieldDescriptor::integer("age").optional())
        .field(FieldDescriptor::email("email"))
        .field(
            FieldDescriptor::float("cgpa")
                .gt(0.0)
                .lt(10.0)
                .default(5)
                .describe("A decimal value representing the cgpa of the student"),
        )
        .build()
        .unwrap()
}

fn patient() -> RecordSchema {
    RecordSchema::builder("Patient")
        .field(FieldDescriptor::string("name"))
        .field(FieldDescriptor::integer("age"))
        .build()
        .unwrap()
}

// ── Reference scenarios ──────────────────────────────────────────

#[test]
fn student_with_defaults_and_coerced_age() {
    let record = student()
        .construct(&raw(json!({"age": "32", "email": "abc@gmail.com"})))
        .unwrap();

    assert_eq!(record.get_str("name"), Some("nitish"));
    assert_eq!(record.get_i64("age"), Some(32));
    assert_eq!(record.get_str("email"), Some("abc@gmail.com"));
    assert_eq!(record.get_f64("cgpa"), Some(5.0));
    assert_eq!(record.schema_name(), "Student");
}

#[test]
fn student_with_malformed_email_is_type_mismatch() {
    let err = student()
        .construct(&raw(json!({"age": "32", "email": "not-an-email"})))
        .unwrap_err();

    assert_eq!(
        err,
        ValidationError::TypeMismatch {
            field: "email".into(),
            expected: FieldType::Email,
            actual: json!("not-an-email"),
        }
    );
}

#[test]
fn omitted_optional_is_null() {
    let record = student()
        .construct(&raw(json!({"email": "abc@gmail.com"})))
        .unwrap();
    assert_eq!(record.get("age"), Some(&FieldValue::Null));
}

#[test]
fn explicit_null_for_optional_is_accepted() {
    let record = student()
        .construct(&raw(json!({"age": null, "email": "abc@gmail.com"})))
        .unwrap();
    assert!(record.get("age").unwrap().is_null());
}

#[test]
fn supplied_values_override_defaults() {
    let record = student()
        .construct(&raw(json!({
            "name": "Azaan",
            "email": "azaan@example.org",
            "cgpa": 8.7
        })))
        .unwrap();
    assert_eq!(record.get_str("name"), Some("Azaan"));
    assert_eq!(record.get_f64("cgpa"), Some(8.7));
}

// ── Missing fields ───────────────────────────────────────────────

#[test]
fn missing_required_field() {
    let err = student().construct(&raw(json!({"age": 20}))).unwrap_err();
    assert_eq!(err, ValidationError::MissingField { field: "email".into() });
    assert_eq!(err.field(), Some("email"));
    assert_eq!(err.code(), "missing_field");
}

#[test]
fn nullable_without_default_must_be_present() {
    let schema = RecordSchema::builder("Reading")
        .field(FieldDescriptor::float("value").nullable())
        .build()
        .unwrap();
    let err = schema.construct(&RawRecord::new()).unwrap_err();
    assert!(matches!(err, ValidationError::MissingField { .. }));
    assert!(schema.construct(&raw(json!({"value": null}))).is_ok());
}

// ── Type coercion ────────────────────────────────────────────────

#[test]
fn string_field_rejects_numbers() {
    let err = patient()
        .construct(&raw(json!({"name": 42, "age": 24})))
        .unwrap_err();
    assert!(matches!(err, ValidationError::TypeMismatch { ref field, .. } if field == "name"));
}

#[test]
fn integer_field_rejects_fractional_values() {
    let err = patient()
        .construct(&raw(json!({"name": "Azaan", "age": 24.5})))
        .unwrap_err();
    assert_eq!(err.code(), "type_mismatch");
}

#[test]
fn integer_field_rejects_words() {
    let err = patient()
        .construct(&raw(json!({"name": "Azaan", "age": "twenty"})))
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::TypeMismatch {
            field: "age".into(),
            expected: FieldType::Integer,
            actual: json!("twenty"),
        }
    );
}

#[test]
fn null_for_non_nullable_is_type_mismatch() {
    let err = patient()
        .construct(&raw(json!({"name": "Azaan", "age": null})))
        .unwrap_err();
    assert!(matches!(err, ValidationError::TypeMismatch { .. }));
}

#[test]
fn float_field_accepts_integers_and_numeric_strings() {
    let schema = RecordSchema::builder("Reading")
        .field(FieldDescriptor::float("value"))
        .build()
        .unwrap();
    let a = schema.construct(&raw(json!({"value": 3}))).unwrap();
    let b = schema.construct(&raw(json!({"value": " 3.5 "}))).unwrap();
    assert_eq!(a.get("value"), Some(&FieldValue::Float(3.0)));
    assert_eq!(b.get("value"), Some(&FieldValue::Float(3.5)));
}

#[test]
fn boolean_field_accepts_common_spellings() {
    let schema = RecordSchema::builder("Flag")
        .field(FieldDescriptor::boolean("on"))
        .build()
        .unwrap();
    for (input, expected) in [
        (json!(true), true),
        (json!("yes"), true),
        (json!("Off"), false),
        (json!(1), true),
        (json!("0"), false),
    ] {
        let record = schema.construct(&raw(json!({ "on": input }))).unwrap();
        assert_eq!(record.get_bool("on"), Some(expected));
    }
    assert!(schema.construct(&raw(json!({"on": 2}))).is_err());
    assert!(schema.construct(&raw(json!({"on": "maybe"}))).is_err());
}

#[test]
fn email_is_trimmed_and_domain_lowercased() {
    let record = student()
        .construct(&raw(json!({"email": "  Abc@Gmail.COM "})))
        .unwrap();
    assert_eq!(record.get_str("email"), Some("Abc@gmail.com"));
}

#[test]
fn arrays_and_objects_never_coerce() {
    let err = patient()
        .construct(&raw(json!({"name": ["Azaan"], "age": 1})))
        .unwrap_err();
    assert!(matches!(err, ValidationError::TypeMismatch { .. }));
}

// ── Constraints ──────────────────────────────────────────────────

#[test]
fn cgpa_outside_exclusive_bounds() {
    for bad in [0.0, 10.0, -1.0, 12.5] {
        let err = student()
            .construct(&raw(json!({"email": "abc@gmail.com", "cgpa": bad})))
            .unwrap_err();
        match err {
            ValidationError::ConstraintViolation { field, actual, .. } => {
                assert_eq!(field, "cgpa");
                assert_eq!(actual, FieldValue::Float(bad));
            }
            other => panic!("expected constraint violation, got {other:?}"),
        }
    }
}

#[test]
fn constraint_checked_after_coercion() {
    let err = student()
        .construct(&raw(json!({"email": "abc@gmail.com", "cgpa": "11"})))
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::ConstraintViolation {
            field: "cgpa".into(),
            constraint: "must be less than 10".into(),
            actual: FieldValue::Float(11.0),
        }
    );
}

#[test]
fn constraints_skip_null() {
    let schema = RecordSchema::builder("Reading")
        .field(FieldDescriptor::float("value").gt(0.0).optional())
        .build()
        .unwrap();
    assert!(schema.construct(&raw(json!({"value": null}))).is_ok());
}

#[test]
fn length_and_pattern_constraints() {
    let schema = RecordSchema::builder("Course")
        .field(
            FieldDescriptor::string("code")
                .min_length(4)
                .max_length(6)
                .pattern(r"^[A-Z]+[0-9]+$"),
        )
        .build()
        .unwrap();

    assert!(schema.construct(&raw(json!({"code": "CS101"}))).is_ok());

    let short = schema.construct(&raw(json!({"code": "C1"}))).unwrap_err();
    assert!(matches!(short, ValidationError::ConstraintViolation { ref constraint, .. }
        if constraint == "must have at least 4 characters"));

    let lower = schema.construct(&raw(json!({"code": "cs101"}))).unwrap_err();
    assert!(matches!(lower, ValidationError::ConstraintViolation { ref constraint, .. }
        if constraint.contains("must match pattern")));
}

#[test]
fn custom_constraint() {
    let schema = RecordSchema::builder("Even")
        .field(
            FieldDescriptor::integer("n")
                .constraint(Constraint::custom("an even number", |v| {
                    v.as_i64().is_some_and(|n| n % 2 == 0)
                })),
        )
        .build()
        .unwrap();
    assert!(schema.construct(&raw(json!({"n": 4}))).is_ok());
    let err = schema.construct(&raw(json!({"n": 3}))).unwrap_err();
    assert_eq!(err.to_string(), "field 'n' must satisfy an even number (got 3)");
}

// ── Fail-fast vs collect-all ─────────────────────────────────────

#[test]
fn fail_fast_reports_first_field_in_declaration_order() {
    let schema = RecordSchema::builder("Ordered")
        .field(FieldDescriptor::integer("a"))
        .field(FieldDescriptor::integer("b"))
        .field(FieldDescriptor::integer("c"))
        .build()
        .unwrap();
    // "c" is invalid and "a" is missing; "a" is declared first.
    let err = schema.construct(&raw(json!({"b": 1, "c": "x"}))).unwrap_err();
    assert_eq!(err, ValidationError::MissingField { field: "a".into() });
}

#[test]
fn construct_all_reports_every_violation_in_order() {
    let errors = student()
        .construct_all(&raw(json!({"name": 7, "age": "old", "cgpa": 99})))
        .unwrap_err();
    let fields: Vec<&str> = errors.errors().iter().filter_map(|e| e.field()).collect();
    assert_eq!(fields, vec!["name", "age", "email", "cgpa"]);
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.first().map(|e| e.code()), Some("type_mismatch"));
}

#[test]
fn validation_errors_display_lists_each_error() {
    let errors = patient().construct_all(&raw(json!({}))).unwrap_err();
    assert_eq!(
        errors.to_string(),
        "2 validation error(s)\n  missing field 'name'\n  missing field 'age'"
    );
    let as_error: &dyn std::error::Error = &errors;
    assert!(as_error.source().is_none());
}

#[test]
fn construct_all_agrees_with_construct_on_success() {
    let input = raw(json!({"age": "32", "email": "abc@gmail.com"}));
    let schema = student();
    assert_eq!(schema.construct_all(&input).unwrap(), schema.construct(&input).unwrap());
}

// ── Extra keys ───────────────────────────────────────────────────

#[test]
fn extra_keys_ignored_by_default() {
    let record = patient()
        .construct(&raw(json!({"name": "Azaan", "age": 24, "ward": "B"})))
        .unwrap();
    assert_eq!(record.len(), 2);
    assert!(record.get("ward").is_none());
}

#[test]
fn extra_keys_forbidden_after_declared_fields() {
    let schema = RecordSchema::builder("Patient")
        .field(FieldDescriptor::string("name"))
        .field(FieldDescriptor::integer("age"))
        .extra_fields(ExtraFields::Forbid)
        .build()
        .unwrap();

    let err = schema
        .construct(&raw(json!({"name": "Azaan", "age": 24, "ward": "B"})))
        .unwrap_err();
    assert_eq!(err, ValidationError::UnexpectedField { field: "ward".into() });

    // A declared-field error still wins over an unexpected key.
    let err = schema.construct(&raw(json!({"name": "Azaan", "ward": "B"}))).unwrap_err();
    assert_eq!(err, ValidationError::MissingField { field: "age".into() });
}

// ── JSON entry points ────────────────────────────────────────────

#[test]
fn from_json_str_parses_and_validates() {
    let record = patient()
        .from_json_str(r#"{"name": "Azaan", "age": "24"}"#)
        .unwrap();
    assert_eq!(record.get_i64("age"), Some(24));
}

#[test]
fn from_json_str_rejects_non_objects() {
    let err = patient().from_json_str("[1, 2]").unwrap_err();
    assert!(matches!(err, ModelError::NotAnObject("array")));
}

#[test]
fn from_json_str_rejects_malformed_text() {
    let err = patient().from_json_str("{name:").unwrap_err();
    assert!(matches!(err, ModelError::Serialization(_)));
}

#[test]
fn from_json_str_surfaces_validation_errors() {
    let err = patient().from_json_str(r#"{"name": "Azaan"}"#).unwrap_err();
    assert!(matches!(
        err,
        ModelError::Validation(ValidationError::MissingField { .. })
    ));
}
