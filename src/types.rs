/// Core data structures for export
///
/// This module defines the schema-less record model the exporter works on,
/// the column definitions that project records into cells, and the
/// artifact handed to delivery sinks.
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// MIME type attached to every generated CSV artifact
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// One exportable data item: an arbitrary key-value mapping
pub type Record = BTreeMap<String, Value>;

/// A single field value inside a [`Record`]
///
/// Absence of a value ("undefined") is not a variant; lookups return
/// `Option<&Value>` and `None` means the key was not there.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Convert a JSON value into a record value
    ///
    /// With `detect_dates`, strings that parse as RFC 3339 date-times (or
    /// the same with a colon-less `+0000` offset) or plain `YYYY-MM-DD`
    /// dates become date-typed values.
    pub fn from_json(value: serde_json::Value, detect_dates: bool) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => {
                if detect_dates {
                    parse_date_like(&s).unwrap_or(Value::Text(s))
                } else {
                    Value::Text(s)
                }
            }
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(|v| Value::from_json(v, detect_dates)).collect())
            }
            serde_json::Value::Object(map) => Value::Record(record_from_json(map, detect_dates)),
        }
    }

    /// Convert back to JSON (dates become ISO strings)
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            Value::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Record(record) => {
                serde_json::Value::Object(record.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
            }
        }
    }

    /// Nested record, if this value is one
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

/// Build a record from a JSON object
pub fn record_from_json(map: serde_json::Map<String, serde_json::Value>, detect_dates: bool) -> Record {
    map.into_iter().map(|(k, v)| (k, Value::from_json(v, detect_dates))).collect()
}

fn parse_date_like(s: &str) -> Option<Value> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Value::DateTime(dt));
    }
    // Remote query timestamps: "2024-03-15T14:30:00.000+0000"
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(Value::DateTime(dt));
    }
    // Exactly "YYYY-MM-DD"; chrono alone would also accept "2024-3-5"
    if s.len() == 10
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
    {
        return Some(Value::Date(d));
    }
    None
}

/// Pairing of a display label and the field path projecting one cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub label: String,
    #[serde(rename = "field", alias = "field_path", alias = "fieldName")]
    pub field_path: String,
}

impl ColumnSpec {
    pub fn new(label: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self { label: label.into(), field_path: field_path.into() }
    }
}

/// Generated CSV bytes plus the metadata a sink needs to save them
#[derive(Debug, Clone, PartialEq)]
pub struct CsvArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl CsvArtifact {
    pub fn new(filename: &str, text: String) -> Self {
        Self { filename: filename.to_string(), mime_type: CSV_MIME_TYPE, bytes: text.into_bytes() }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Where a delivered artifact ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivered {
    File(std::path::PathBuf),
    Stdout,
}

impl Delivered {
    pub fn describe(&self) -> String {
        match self {
            Delivered::File(path) => path.display().to_string(),
            Delivered::Stdout => "<stdout>".to_string(),
        }
    }
}
