use serde_json::{json, Value};
use studykit_model::{
    FieldDescriptor, RawRecord, Record, RecordHandler, RecordSchema, ValidationError,
};

fn raw(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("test input must be an object, got {other}"),
    }
}

fn term_schema() -> RecordSchema {
    RecordSchema::builder("Term")
        .field(FieldDescriptor::string("title"))
        .field(FieldDescriptor::integer("start_week").ge(1.0))
        .field(FieldDescriptor::integer("end_week").ge(1.0))
        .build()
        .unwrap()
}

// ── Default implementations ──────────────────────────────────────

struct NoOpHandler;
impl RecordHandler for NoOpHandler {}

#[test]
fn default_hooks_match_plain_construct() {
    let schema = term_schema();
    let input = raw(json!({"title": "Spring", "start_week": 1, "end_week": 12}));
    let with = schema.construct_with(&input, &NoOpHandler).unwrap();
    let without = schema.construct(&input).unwrap();
    assert_eq!(with, without);
}

#[test]
fn default_after_validate_accepts_any_record() {
    let record = term_schema()
        .construct(&raw(json!({"title": "x", "start_week": 3, "end_week": 1})))
        .unwrap();
    assert!(NoOpHandler.after_validate(&record).is_ok());
}

// ── Cross-field rules ────────────────────────────────────────────

struct OrderedWeeks;
impl RecordHandler for OrderedWeeks {
    fn after_validate(&self, record: &Record) -> Result<(), String> {
        let start = record.get_i64("start_week").unwrap_or(0);
        let end = record.get_i64("end_week").unwrap_or(0);
        if end < start {
            return Err(format!("end_week {end} precedes start_week {start}"));
        }
        Ok(())
    }
}

#[test]
fn after_validate_rejects_record() {
    let err = term_schema()
        .construct_with(
            &raw(json!({"title": "Spring", "start_week": 10, "end_week": 2})),
            &OrderedWeeks,
        )
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::Rejected {
            reason: "end_week 2 precedes start_week 10".into()
        }
    );
    assert_eq!(err.field(), None);
    assert_eq!(err.code(), "rejected");
}

#[test]
fn after_validate_not_called_on_field_errors() {
    let err = term_schema()
        .construct_with(&raw(json!({"title": "Spring"})), &OrderedWeeks)
        .unwrap_err();
    assert!(matches!(err, ValidationError::MissingField { .. }));
}

// ── Input normalization ──────────────────────────────────────────

struct LegacyKeys;
impl RecordHandler for LegacyKeys {
    fn before_validate(&self, raw: &mut RawRecord) {
        if let Some(v) = raw.remove("name") {
            raw.entry("title").or_insert(v);
        }
    }
}

#[test]
fn before_validate_renames_keys() {
    let input = raw(json!({"name": "Autumn", "start_week": 1, "end_week": 2}));
    let record = term_schema().construct_with(&input, &LegacyKeys).unwrap();
    assert_eq!(record.get_str("title"), Some("Autumn"));
    // The caller's mapping is untouched.
    assert!(input.contains_key("name"));
}

// ── Trait object safety ──────────────────────────────────────────

#[test]
fn handlers_work_as_trait_objects() {
    let handlers: Vec<Box<dyn RecordHandler>> = vec![
        Box::new(NoOpHandler),
        Box::new(OrderedWeeks),
        Box::new(LegacyKeys),
    ];
    let input = raw(json!({"title": "Summer", "start_week": 1, "end_week": 4}));
    for h in &handlers {
        assert!(term_schema().construct_with(&input, h.as_ref()).is_ok());
    }
}
