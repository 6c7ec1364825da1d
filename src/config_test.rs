/// Tests for config module
#[cfg(test)]
mod tests {
    use crate::cli::CliArgs;
    use crate::config::*;
    use crate::input::InputFormat;
    use crate::types::ColumnSpec;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args_with_columns(columns: Vec<&str>) -> CliArgs {
        CliArgs {
            input: None,
            format: InputFormat::Auto,
            detect_dates: false,
            columns: columns.into_iter().map(String::from).collect(),
            columns_file: None,
            preset: None,
            output_dir: PathBuf::from("."),
            filename: None,
            stdout: false,
            preview: 0,
            console_width: None,
            quiet: false,
        }
    }

    #[test]
    fn test_parse_column_flag_with_label() {
        assert_eq!(parse_column_flag("Owner Name=Owner.Name").unwrap(), ColumnSpec::new("Owner Name", "Owner.Name"));
    }

    #[test]
    fn test_parse_column_flag_bare_path() {
        assert_eq!(parse_column_flag("Status__c").unwrap(), ColumnSpec::new("Status__c", "Status__c"));
    }

    #[test]
    fn test_parse_column_flag_label_with_equals() {
        assert_eq!(parse_column_flag("a=b=Field__c").unwrap(), ColumnSpec::new("a=b", "Field__c"));
    }

    #[test]
    fn test_parse_column_flag_empty_path_fails() {
        assert!(parse_column_flag("Company=").is_err());
        assert!(parse_column_flag("  ").is_err());
    }

    #[test]
    fn test_plan_from_column_flags() {
        let args = args_with_columns(vec!["Company=Company__c", "Owner.Name"]);
        let plan = build_export_plan(&args).expect("Should build plan");

        assert_eq!(plan.columns, vec![ColumnSpec::new("Company", "Company__c"), ColumnSpec::new("Owner.Name", "Owner.Name")]);
        assert_eq!(plan.filename, DEFAULT_FILENAME);
        assert_eq!(plan.destination, Destination::Directory(PathBuf::from(".")));
    }

    #[test]
    fn test_plan_uses_preset_filename() {
        let args = CliArgs { preset: Some(JOB_APPLICATIONS_PRESET.to_string()), ..args_with_columns(vec![]) };
        let plan = build_export_plan(&args).expect("Should build plan");

        assert_eq!(plan.filename, "Job_Applications_Export.csv");
        assert_eq!(plan.columns.len(), 8);
        assert_eq!(plan.columns[0], ColumnSpec::new("Company", "Company__c"));
        assert_eq!(plan.columns[7], ColumnSpec::new("Notes", "Notes__c"));
    }

    #[test]
    fn test_explicit_filename_wins_over_preset() {
        let args = CliArgs {
            preset: Some(JOB_APPLICATIONS_PRESET.to_string()),
            filename: Some("mine.csv".to_string()),
            ..args_with_columns(vec![])
        };
        assert_eq!(build_export_plan(&args).unwrap().filename, "mine.csv");
    }

    #[test]
    fn test_stdout_destination() {
        let args = CliArgs { stdout: true, ..args_with_columns(vec!["A=a"]) };
        assert_eq!(build_export_plan(&args).unwrap().destination, Destination::Stdout);
    }

    #[test]
    fn test_columns_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("columns.toml");
        std::fs::write(
            &path,
            r#"
filename = "people.csv"

[[columns]]
label = "Name"
field = "Name"

[[columns]]
label = "City"
field_path = "Address.City"
"#,
        )
        .unwrap();

        let args = CliArgs { columns_file: Some(path), ..args_with_columns(vec![]) };
        let plan = build_export_plan(&args).expect("Should build plan");

        assert_eq!(plan.filename, "people.csv");
        assert_eq!(plan.columns, vec![ColumnSpec::new("Name", "Name"), ColumnSpec::new("City", "Address.City")]);
    }

    #[test]
    fn test_columns_file_without_columns_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("columns.toml");
        std::fs::write(&path, "filename = \"x.csv\"\n").unwrap();

        let err = load_columns_file(&path).unwrap_err();
        assert!(err.starts_with("Invalid columns file"), "Got: {}", err);
    }

    #[test]
    fn test_empty_columns_list_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("columns.toml");
        std::fs::write(&path, "columns = []\n").unwrap();

        let args = CliArgs { columns_file: Some(path), ..args_with_columns(vec![]) };
        assert_eq!(build_export_plan(&args).unwrap_err(), "No columns to export");
    }

    #[test]
    fn test_user_preset_from_config_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("contacts.toml"), "[[columns]]\nlabel = \"Email\"\nfield = \"Email\"\n").unwrap();

        let preset = resolve_preset("contacts", dir.path()).expect("Should find preset");
        assert_eq!(preset.columns, vec![ColumnSpec::new("Email", "Email")]);
        assert_eq!(preset.filename, None);
    }

    #[test]
    fn test_unknown_preset_fails() {
        let dir = TempDir::new().unwrap();
        let err = resolve_preset("nope", dir.path()).unwrap_err();
        assert!(err.starts_with("Unknown preset 'nope'"), "Got: {}", err);
    }

    #[test]
    fn test_preset_name_cannot_leave_config_dir() {
        let root = TempDir::new().unwrap();
        let config_dir = root.path().join("config");
        std::fs::create_dir(&config_dir).unwrap();
        std::fs::write(root.path().join("outside.toml"), "[[columns]]\nlabel = \"X\"\nfield = \"x\"\n").unwrap();

        for name in ["../outside", "sub/name", "sub\\name", "..", ""] {
            let err = resolve_preset(name, &config_dir).unwrap_err();
            assert!(err.starts_with("Invalid preset name"), "{:?} gave: {}", name, err);
        }
    }

    #[test]
    fn test_builtin_preset_ignores_config_dir() {
        let dir = TempDir::new().unwrap();
        let preset = resolve_preset(JOB_APPLICATIONS_PRESET, dir.path()).unwrap();
        assert_eq!(preset, job_applications_preset());
    }
}
