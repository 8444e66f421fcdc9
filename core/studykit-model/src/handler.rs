use crate::{RawRecord, Record};

/// Optional hooks around record construction, used with
/// [`RecordSchema::construct_with`](crate::RecordSchema::construct_with).
///
/// Per-field rules belong on the [`FieldDescriptor`](crate::FieldDescriptor).
/// Implement this for input normalization (renaming legacy keys) or
/// cross-field rules (`end` must not precede `start`).
pub trait RecordHandler: Send + Sync {
    /// Called on a private copy of the input before any field is validated.
    fn before_validate(&self, raw: &mut RawRecord) {
        let _ = raw;
    }

    /// Validate a fully-constructed record.
    /// Return `Err(reason)` to reject it.
    fn after_validate(&self, record: &Record) -> Result<(), String> {
        let _ = record;
        Ok(())
    }
}
