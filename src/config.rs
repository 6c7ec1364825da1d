/// Configuration resolution module
///
/// This module handles:
/// - Building an ExportPlan from CLI arguments
/// - Parsing "LABEL=PATH" column flags
/// - Loading TOML column files and named presets
/// - Choosing the output filename and destination
use crate::cli::{CliArgs, default_config_dir};
use crate::input::InputFormat;
use crate::toml_helpers::load_toml;
use crate::types::ColumnSpec;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the built-in preset for job application exports
pub const JOB_APPLICATIONS_PRESET: &str = "job-applications";

/// Filename used when nothing else names the output
pub const DEFAULT_FILENAME: &str = "export.csv";

/// Everything needed to run one export, resolved upfront
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    pub input: Option<PathBuf>,
    pub format: InputFormat,
    pub detect_dates: bool,
    pub columns: Vec<ColumnSpec>,
    pub filename: String,
    pub destination: Destination,
    pub preview_rows: usize,
}

/// Where the CSV goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Directory(PathBuf),
    Stdout,
}

/// Contents of a TOML columns file
///
/// ```toml
/// filename = "Job_Applications_Export.csv"
///
/// [[columns]]
/// label = "Company"
/// field = "Company__c"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnsFile {
    #[serde(default)]
    pub filename: Option<String>,
    pub columns: Vec<ColumnSpec>,
}

/// Build an ExportPlan from CLI arguments
///
/// This resolves all configuration upfront, so the export itself only deals
/// with concrete columns, a filename and a destination.
pub fn build_export_plan(args: &CliArgs) -> Result<ExportPlan, String> {
    let (columns, preset_filename) = resolve_columns(args)?;
    validate_columns(&columns)?;
    debug!("Resolved {} columns", columns.len());

    let filename = args.filename.clone().or(preset_filename).unwrap_or_else(|| DEFAULT_FILENAME.to_string());

    let destination =
        if args.stdout { Destination::Stdout } else { Destination::Directory(args.output_dir.clone()) };

    Ok(ExportPlan {
        input: args.input.clone(),
        format: args.format,
        detect_dates: args.detect_dates,
        columns,
        filename,
        destination,
        preview_rows: args.preview,
    })
}

/// Columns plus the filename their source suggests, if any
fn resolve_columns(args: &CliArgs) -> Result<(Vec<ColumnSpec>, Option<String>), String> {
    if !args.columns.is_empty() {
        let columns = args.columns.iter().map(|c| parse_column_flag(c)).collect::<Result<Vec<_>, _>>()?;
        return Ok((columns, None));
    }

    if let Some(ref path) = args.columns_file {
        let file = load_columns_file(path)?;
        return Ok((file.columns, file.filename));
    }

    if let Some(ref name) = args.preset {
        let file = resolve_preset(name, &default_config_dir())?;
        return Ok((file.columns, file.filename));
    }

    Err("No columns specified".to_string())
}

/// Parse "LABEL=PATH" (or a bare PATH, which doubles as the label)
///
/// The last "=" separates label from path, so labels may contain "=".
pub fn parse_column_flag(flag: &str) -> Result<ColumnSpec, String> {
    let (label, path) = match flag.rsplit_once('=') {
        Some((label, path)) => (label.trim(), path.trim()),
        None => (flag.trim(), flag.trim()),
    };

    if path.is_empty() {
        return Err(format!("Column {:?} has an empty field path", flag));
    }

    Ok(ColumnSpec::new(label, path))
}

/// Load a TOML columns file
pub fn load_columns_file(path: &Path) -> Result<ColumnsFile, String> {
    let value = load_toml(path)?;
    let file: ColumnsFile = value.try_into().map_err(|e| format!("Invalid columns file {:?}: {}", path, e))?;
    Ok(file)
}

/// Look up a preset: built-ins first, then `<config_dir>/<name>.toml`
pub fn resolve_preset(name: &str, config_dir: &Path) -> Result<ColumnsFile, String> {
    if name == JOB_APPLICATIONS_PRESET {
        return Ok(job_applications_preset());
    }

    if name.trim().is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(format!("Invalid preset name '{}'", name));
    }

    let path = config_dir.join(format!("{}.toml", name));
    if !path.exists() {
        return Err(format!(
            "Unknown preset '{}' (built-in: {}; looked for {})",
            name,
            JOB_APPLICATIONS_PRESET,
            path.display()
        ));
    }
    debug!("Loading preset '{}' from {:?}", name, path);
    load_columns_file(&path)
}

/// Columns of the job application tracker export
pub fn job_applications_preset() -> ColumnsFile {
    let columns = [
        ("Company", "Company__c"),
        ("Position", "Position__c"),
        ("Application Date", "ApplicationDate__c"),
        ("Status", "Status__c"),
        ("Interview Date", "InterviewDate__c"),
        ("Contact Name", "ContactName__c"),
        ("Contact Email", "ContactEmail__c"),
        ("Notes", "Notes__c"),
    ]
    .into_iter()
    .map(|(label, field)| ColumnSpec::new(label, field))
    .collect();

    ColumnsFile { filename: Some("Job_Applications_Export.csv".to_string()), columns }
}

fn validate_columns(columns: &[ColumnSpec]) -> Result<(), String> {
    if columns.is_empty() {
        return Err("No columns to export".to_string());
    }
    if let Some(c) = columns.iter().find(|c| c.field_path.trim().is_empty()) {
        return Err(format!("Column '{}' has an empty field path", c.label));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
