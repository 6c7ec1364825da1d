use std::fs::File;
use std::io::Read;
/// TOML loading helpers
///
/// This module consolidates reading and parsing of TOML configuration
/// files (columns files and user presets).
use std::path::Path;

/// Load and parse a TOML file
pub fn load_toml(path: &Path) -> Result<toml::Value, String> {
    let mut file = File::open(path).map_err(|e| format!("Failed to open {:?}: {}", path, e))?;
    let mut s = String::new();
    file.read_to_string(&mut s).map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
    parse_toml(&s).map_err(|e| format!("Failed to parse TOML in {:?}: {}", path, e))
}

/// Parse TOML text into a value
pub fn parse_toml(s: &str) -> Result<toml::Value, toml::de::Error> {
    toml::from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_toml_columns_array() {
        let toml_str = r#"
filename = "out.csv"

[[columns]]
label = "Company"
field = "Company__c"
"#;
        let value = parse_toml(toml_str).unwrap();
        assert_eq!(value.get("filename").and_then(|v| v.as_str()), Some("out.csv"));
        let columns = value.get("columns").and_then(|v| v.as_array()).unwrap();
        assert_eq!(columns.len(), 1);
    }

    #[test]
    fn test_load_toml_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "this is = = not toml").unwrap();

        let err = load_toml(file.path()).unwrap_err();
        assert!(err.starts_with("Failed to parse TOML in"), "Got: {}", err);
    }

    #[test]
    fn test_load_toml_missing_file() {
        let err = load_toml(Path::new("no/such/columns.toml")).unwrap_err();
        assert!(err.starts_with("Failed to open"), "Got: {}", err);
    }
}
