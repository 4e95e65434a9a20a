//! Settings file parser for multiple formats

use crate::{ChartSettings, ConfigError, ConfigValidator, Result};
use std::fs;
use std::path::Path;

/// Settings file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Settings parser
pub struct ConfigParser;

impl ConfigParser {
    /// Read a file, apply env overrides and validate
    pub fn load(path: impl AsRef<Path>) -> Result<ChartSettings> {
        let mut settings = Self::parse_file(path)?;
        settings.apply_env_overrides()?;
        ConfigValidator::validate(&settings)?;
        Ok(settings)
    }

    /// Parse settings from a file
    pub fn parse_file(path: impl AsRef<Path>) -> Result<ChartSettings> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)?;
        let format = Self::detect_format(path)?;

        log::debug!("Parsing chart settings from {} as {:?}", path.display(), format);
        Self::parse_string(&content, format)
    }

    /// Parse settings from a string
    pub fn parse_string(content: &str, format: ConfigFormat) -> Result<ChartSettings> {
        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("YAML parse error: {}", e))),
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e))),
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e))),
        }
    }

    /// Detect settings format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ConfigError::Parse("Cannot determine config format from file extension".to_string())
        })?;

        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::Parse(format!(
                "Unsupported config format: {}",
                ext
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
surface_id: series-chart
x_axis_title: Mês
cache_timeout_secs: 120
"#;

        let settings = ConfigParser::parse_string(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(settings.surface_id, "series-chart");
        assert_eq!(settings.x_axis_title, "Mês");
        assert_eq!(settings.cache_timeout_secs, 120);
        assert_eq!(settings.y_axis_title, "Solicitações");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
data_global = "seriesData"
cache_enabled = false
"#;

        let settings = ConfigParser::parse_string(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(settings.data_global, "seriesData");
        assert!(!settings.cache_enabled);
    }

    #[test]
    fn test_parse_error() {
        let err = ConfigParser::parse_string("{ not json", ConfigFormat::Json).unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_parse_file_detects_format() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(file, r#"{{"label_format": "%m/%Y"}}"#).unwrap();

        let settings = ConfigParser::parse_file(file.path()).unwrap();
        assert_eq!(settings.label_format, "%m/%Y");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::with_suffix(".ini").unwrap();
        let err = ConfigParser::parse_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format"));
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "surface_id: \"\"").unwrap();

        let err = ConfigParser::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
