use crate::scanner::CourseRecord;
use html_escape::decode_html_entities;
use serde_json::Value;

/// Decode HTML entity sequences in every string-valued field of a record.
/// Non-string values (numbers, booleans, null) pass through unchanged.
///
/// Pure transform: the input record is not mutated, a new map is built.
pub fn normalize_record(record: &CourseRecord) -> CourseRecord {
    record
        .iter()
        .map(|(key, value)| (key.clone(), normalize_value(value)))
        .collect()
}

/// Normalize a whole record sequence, preserving length and order.
pub fn normalize_records(records: &[CourseRecord]) -> Vec<CourseRecord> {
    records.iter().map(normalize_record).collect()
}

fn normalize_value(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(decode_html_entities(text).into_owned()),
        other => other.clone(),
    }
}
