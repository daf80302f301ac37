//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// File name looked up in the project directory.
pub const CONFIG_FILE: &str = "gatesim.toml";

/// Loads and validates a `gatesim.toml` configuration from a project directory.
///
/// Reads `<project_dir>/gatesim.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `gatesim.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.project.netlist.is_empty() {
        return Err(ConfigError::MissingField("project.netlist".to_string()));
    }
    if config.stimulus.vectors == 0 {
        return Err(ConfigError::ValidationError(
            "stimulus.vectors must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReportFormat;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[project]
name = "adder4"
netlist = "adder4.net"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.name, "adder4");
        assert_eq!(config.project.netlist, "adder4.net");
        assert_eq!(config.stimulus.vectors, 100);
        assert_eq!(config.stimulus.seed, 0);
        assert_eq!(config.report.format, ReportFormat::Text);
        assert!(!config.report.per_wire);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[project]
name = "adder4"
netlist = "nets/adder4.net"
description = "ripple carry"

[stimulus]
vectors = 1000
seed = 42

[report]
format = "json"
per_wire = true
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.description, "ripple carry");
        assert_eq!(config.stimulus.vectors, 1000);
        assert_eq!(config.stimulus.seed, 42);
        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(config.report.per_wire);
        assert_eq!(
            config.netlist_path(Path::new("/work")),
            Path::new("/work/nets/adder4.net")
        );
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let toml = r#"
[project]
name = "p"
netlist = "p.net"

[stimulus]
seed = 9
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.stimulus.vectors, 100);
        assert_eq!(config.stimulus.seed, 9);
    }

    #[test]
    fn missing_name_errors() {
        let toml = r#"
[project]
name = ""
netlist = "p.net"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "project.name"));
    }

    #[test]
    fn missing_netlist_errors() {
        let toml = r#"
[project]
name = "p"
netlist = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "project.netlist"));
    }

    #[test]
    fn zero_vectors_rejected() {
        let toml = r#"
[project]
name = "p"
netlist = "p.net"

[stimulus]
vectors = 0
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_format_is_a_parse_error() {
        let toml = r#"
[project]
name = "p"
netlist = "p.net"

[report]
format = "xml"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[project]\nname = \"d\"\nnetlist = \"d.net\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.project.name, "d");
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
