/// Column projection: resolving a dotted field path against a record
use crate::types::{Record, Value};

/// Resolve `field_path` against `record`.
///
/// A direct key match wins, so field names that contain literal dots still
/// resolve. Otherwise the path is walked one key at a time; a null or
/// missing value anywhere along the chain yields `None`.
pub fn resolve<'a>(record: &'a Record, field_path: &str) -> Option<&'a Value> {
    if field_path.is_empty() {
        return None;
    }

    if let Some(value) = record.get(field_path) {
        return Some(value);
    }

    let mut keys = field_path.split('.');
    let first = keys.next()?;
    let mut current = record.get(first)?;

    for key in keys {
        // Null short-circuits; non-record values have no children
        current = current.as_record()?.get(key)?;
    }

    Some(current)
}
