/// Record loading from JSON and JSON Lines
///
/// Accepted shapes:
/// - A JSON array of objects
/// - A JSON object with a `records` array (the usual remote-query envelope)
/// - JSON Lines: one object per non-blank line
use crate::types::{Record, record_from_json};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Input document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Pick by file extension (.jsonl/.ndjson are JSON Lines, everything else JSON)
    Auto,
    Json,
    Jsonl,
}

impl InputFormat {
    /// Resolve `Auto` against the input path; stdin defaults to JSON
    pub fn resolve(self, path: Option<&Path>) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let ext = path.and_then(|p| p.extension()).and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
                match ext.as_deref() {
                    Some("jsonl") | Some("ndjson") => InputFormat::Jsonl,
                    _ => InputFormat::Json,
                }
            }
            other => other,
        }
    }
}

/// Load records from a file, or stdin when `path` is `None`
pub fn load_records_from(path: Option<&Path>, format: InputFormat, detect_dates: bool) -> Result<Vec<Record>, String> {
    let format = format.resolve(path);
    let records = match path {
        Some(p) => {
            let file = File::open(p).map_err(|e| format!("Failed to open {:?}: {}", p, e))?;
            load_records(BufReader::new(file), format, detect_dates)
                .map_err(|e| format!("Failed to load records from {:?}: {}", p, e))?
        }
        None => load_records(BufReader::new(std::io::stdin().lock()), format, detect_dates)
            .map_err(|e| format!("Failed to load records from stdin: {}", e))?,
    };
    debug!("Loaded {} records ({:?})", records.len(), format);
    Ok(records)
}

/// Parse records from `reader`
pub fn load_records<R: BufRead>(mut reader: R, format: InputFormat, detect_dates: bool) -> Result<Vec<Record>, String> {
    match format {
        InputFormat::Jsonl => load_json_lines(reader, detect_dates),
        InputFormat::Json | InputFormat::Auto => {
            let mut s = String::new();
            reader.read_to_string(&mut s).map_err(|e| e.to_string())?;
            parse_json_document(&s, detect_dates)
        }
    }
}

fn parse_json_document(s: &str, detect_dates: bool) -> Result<Vec<Record>, String> {
    let doc: serde_json::Value = serde_json::from_str(s).map_err(|e| format!("Invalid JSON: {}", e))?;

    let rows = match doc {
        serde_json::Value::Array(rows) => rows,
        serde_json::Value::Object(mut map) => match map.remove("records") {
            Some(serde_json::Value::Array(rows)) => rows,
            _ => return Err("Expected an array of records or an object with a \"records\" array".to_string()),
        },
        _ => return Err("Expected an array of records or an object with a \"records\" array".to_string()),
    };

    rows.into_iter().enumerate().map(|(i, row)| row_to_record(i, row, detect_dates)).collect()
}

fn load_json_lines<R: BufRead>(reader: R, detect_dates: bool) -> Result<Vec<Record>, String> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| e.to_string())?;
        if line.trim().is_empty() {
            continue;
        }
        let row: serde_json::Value =
            serde_json::from_str(&line).map_err(|e| format!("Invalid JSON on line {}: {}", i + 1, e))?;
        records.push(row_to_record(records.len(), row, detect_dates)?);
    }
    Ok(records)
}

fn row_to_record(index: usize, row: serde_json::Value, detect_dates: bool) -> Result<Record, String> {
    match row {
        serde_json::Value::Object(map) => Ok(record_from_json(map, detect_dates)),
        other => Err(format!("Record {} is not an object (found {})", index, json_kind(&other))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
