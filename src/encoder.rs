/// CSV encoding of projected records
///
/// This module handles:
/// - Rendering field values as cell text (dates truncated to `YYYY-MM-DD`)
/// - Writing the header and data rows through a fully quoting `csv` writer
///
/// Every field is wrapped in double quotes, embedded quotes are doubled,
/// fields are joined with `,` and rows with `\n`. The document has no
/// trailing newline.
use crate::error::ExportError;
use crate::projector;
use crate::types::{ColumnSpec, Record, Value};
use chrono::Utc;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Encode records as a CSV document
pub fn encode(records: &[Record], columns: &[ColumnSpec]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.label.as_str())).map_err(csv_error)?;
    for record in records {
        writer.write_record(project_row(record, columns)).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::serialization(format!("Failed to finish CSV: {}", e.error())))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ExportError::serialization(e.to_string()))?;

    // The writer terminates every row; the document ends without one
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn csv_error(e: csv::Error) -> ExportError {
    ExportError::serialization(format!("Failed to write CSV: {}", e))
}

/// Resolve and render every column of `record` as unquoted cell text
pub fn project_row(record: &Record, columns: &[ColumnSpec]) -> Vec<String> {
    columns.iter().map(|c| render_cell(projector::resolve(record, &c.field_path))).collect()
}

/// Render a resolved value; null and missing both become empty text
pub fn render_cell(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(v) => render_value(v),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => render_number(n),
        Value::Text(s) => s.clone(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        // Calendar date of the UTC instant, like an ISO timestamp cut at 'T'
        Value::DateTime(dt) => dt.with_timezone(&Utc).date_naive().format("%Y-%m-%d").to_string(),
        Value::List(items) => items.iter().map(render_value).collect::<Vec<_>>().join(","),
        Value::Record(_) => value.to_json().to_string(),
    }
}

/// Shortest text for a number: whole floats drop their ".0"
fn render_number(n: &serde_json::Number) -> String {
    if n.is_f64()
        && let Some(f) = n.as_f64()
        && f.fract() == 0.0
        && f >= i64::MIN as f64
        && f < i64::MAX as f64
    {
        return (f as i64).to_string();
    }
    n.to_string()
}


#[cfg(test)]
#[path = "encoder_test.rs"]
mod encoder_test;
