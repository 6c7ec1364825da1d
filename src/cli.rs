use crate::input::InputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Get the default configuration directory for tabular-export
/// Uses platform-specific config directories:
/// - Linux: ~/.config/tabular-export
/// - macOS: ~/Library/Application Support/tabular-export
/// - Windows: %APPDATA%/tabular-export
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir().map(|p| p.join("tabular-export")).unwrap_or_else(|| PathBuf::from(".tabular-export"))
}

#[derive(Parser, Debug, Clone)]
#[command(name = "tabular-export")]
#[command(about = "Export JSON records to a fully quoted CSV file")]
#[command(version)]
pub struct CliArgs {
    /// Records file (JSON array or JSON Lines); "-" or omitted reads stdin
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Input format
    #[arg(long, value_enum, default_value = "auto")]
    pub format: InputFormat,

    /// Treat ISO date and RFC 3339 date-time strings as dates (exported as YYYY-MM-DD)
    #[arg(long)]
    pub detect_dates: bool,

    /// Column definition as LABEL=FIELD.PATH (repeatable, in output order)
    /// Without "=", the field path doubles as the label
    #[arg(long = "column", short = 'c', value_name = "LABEL=PATH")]
    pub columns: Vec<String>,

    /// TOML file with [[columns]] tables (label, field) and an optional filename
    #[arg(long, value_name = "PATH")]
    pub columns_file: Option<PathBuf>,

    /// Named column preset: built-in "job-applications" or <config dir>/<NAME>.toml
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Directory the CSV file is saved into
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// Name of the CSV file (default: from the preset/columns file, else export.csv)
    #[arg(long, short = 'f', value_name = "NAME")]
    pub filename: Option<String>,

    /// Write the CSV to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Print the first N projected rows as a table before exporting
    #[arg(long, value_name = "N", default_value = "0")]
    pub preview: usize,

    /// Override console width for the preview table (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,

    /// Suppress the outcome notification on the console (it is still logged)
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        let mut args = CliArgs::parse();

        // "-" is an explicit request for stdin
        if args.input.as_deref().is_some_and(|p| p.as_os_str() == "-") {
            args.input = None;
        }

        args
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        let sources = [!self.columns.is_empty(), self.columns_file.is_some(), self.preset.is_some()];
        let source_count = sources.iter().filter(|s| **s).count();

        if source_count == 0 {
            return Err("Must specify at least one of: --column, --columns-file, or --preset".to_string());
        }
        if source_count > 1 {
            return Err("Specify only one of: --column, --columns-file, or --preset".to_string());
        }

        if self.stdout && self.filename.is_some() {
            return Err("Cannot specify both --stdout and --filename".to_string());
        }

        if let Some(ref input) = self.input
            && !input.exists()
        {
            return Err(format!("Input file {} does not exist", input.display()));
        }

        Ok(())
    }
}
