//! Configuration loading utilities

use crate::Config;
use orderlens_common::OrderLensError;
use std::{env, path::Path, str::FromStr};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "ORDERLENS_CONFIG_PATH";

/// Files probed in the working directory when no path is given
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["orderlens.yaml", "orderlens.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),
}

impl From<ConfigError> for OrderLensError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        OrderLensError::config_with_source(message, err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path, |name| env::var(name).ok())
    }

    /// Load a YAML file, taking overrides from `lookup` instead of the process environment
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)?
        };

        Self::apply_overrides(&mut config, lookup)?;
        config.validate_all()?;

        debug!(path = %path.display(), "Read configuration file");
        Ok(config)
    }

    /// Locate and load the configuration.
    ///
    /// An explicit path wins, then `ORDERLENS_CONFIG_PATH`, then the default
    /// file names in the working directory. Without any file the defaults
    /// are used, still subject to environment overrides.
    pub fn load(explicit: Option<&Path>) -> orderlens_common::Result<Config> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::MissingConfig(path.display().to_string()).into());
            }
            return Ok(Self::load_config(path)?);
        }

        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
        {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::defaults_with(|name| env::var(name).ok())?)
    }

    /// Default configuration with overrides from `lookup`
    pub fn defaults_with<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        Self::apply_overrides(&mut config, lookup)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Apply `ORDERLENS_*` overrides to configuration
    fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("ORDERLENS_DATA_PATH") {
            config.dataset.path = path;
        }

        if let Some(bind) = lookup("ORDERLENS_BIND") {
            config.server.bind = bind;
        }

        if let Some(top_n) = lookup("ORDERLENS_TOP_N") {
            config.dashboard.top_n = parse_var("ORDERLENS_TOP_N", &top_n)?;
        }

        if let Some(currency) = lookup("ORDERLENS_CURRENCY") {
            config.dashboard.currency = currency;
        }

        if let Some(locale) = lookup("ORDERLENS_LOCALE") {
            config.dashboard.locale = locale;
        }

        if let Some(width) = lookup("ORDERLENS_GRAPH_WIDTH") {
            config.graph.width = parse_var("ORDERLENS_GRAPH_WIDTH", &width)?;
        }

        if let Some(height) = lookup("ORDERLENS_GRAPH_HEIGHT") {
            config.graph.height = parse_var("ORDERLENS_GRAPH_HEIGHT", &height)?;
        }

        if let Some(level) = lookup("ORDERLENS_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("ORDERLENS_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, io::Write};
    use tempfile::NamedTempFile;

    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_load_valid_yaml_config() {
        let yaml_content = "dataset:\n  path: \"data/orders.csv\"\ndashboard:\n  title: \"Olist\"\n  top_n: 8\n  category_label: original\n  zero_fill_months: true\n  currency: \"BRL\"\n  locale: \"pt-BR\"\nserver:\n  bind: \"0.0.0.0:9000\"\ngraph:\n  width: 1200\n  height: 600\n  background_color: \"#FFFFFF\"\n  primary_color: \"#FF0000\"\n  muted_color: \"#CCCCCC\"\n  font_family: \"serif\"\n  font_size: 12\nlogging:\n  level: \"debug\"\n  file: \"/var/log/orderlens\"\n  json: true\n  max_files: 7";

        let temp_file = create_test_config_file(yaml_content);
        let config = ConfigLoader::load_config_with(temp_file.path(), no_env)
            .expect("Failed to load config");

        assert_eq!(config.dataset.path, "data/orders.csv");
        assert_eq!(config.dashboard.top_n, 8);
        assert_eq!(
            config.dashboard.category_label,
            orderlens_common::CategoryLabel::Original
        );
        assert!(config.dashboard.zero_fill_months);
        assert_eq!(config.dashboard.locale, "pt-BR");
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.graph.width, 1200);
        assert_eq!(config.logging.file.as_deref(), Some("/var/log/orderlens"));
        assert_eq!(config.logging.max_files, 7);
    }

    #[test]
    fn test_load_minimal_config() {
        let temp_file = create_test_config_file("graph:\n  width: 800\n");
        let config = ConfigLoader::load_config_with(temp_file.path(), no_env)
            .expect("Failed to load config");

        assert_eq!(config.graph.width, 800);
        assert_eq!(config.graph.height, 500); // default value
        assert_eq!(config.dashboard.top_n, 5); // default value
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let temp_file = create_test_config_file("");
        let config = ConfigLoader::load_config_with(temp_file.path(), no_env).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_file = create_test_config_file("dashboard:\n  top_n: [unclosed array");
        let result = ConfigLoader::load_config_with(temp_file.path(), no_env);

        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_unknown_category_label_is_parse_error() {
        let temp_file = create_test_config_file("dashboard:\n  category_label: klingon\n");
        let result = ConfigLoader::load_config_with(temp_file.path(), no_env);

        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let temp_file = create_test_config_file("dashboard:\n  top_n: 0\n  currency: \"dollars\"\n");
        let result = ConfigLoader::load_config_with(temp_file.path(), no_env);

        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_environment_variable_overrides() {
        let temp_file = create_test_config_file("dataset:\n  path: \"from_file.csv\"\n");
        let lookup = env_from(&[
            ("ORDERLENS_DATA_PATH", "from_env.csv"),
            ("ORDERLENS_BIND", "127.0.0.1:9999"),
            ("ORDERLENS_TOP_N", "10"),
            ("ORDERLENS_CURRENCY", "IDR"),
            ("ORDERLENS_LOCALE", "id-ID"),
            ("ORDERLENS_GRAPH_WIDTH", "1500"),
            ("ORDERLENS_GRAPH_HEIGHT", "700"),
            ("ORDERLENS_LOG_LEVEL", "debug"),
            ("ORDERLENS_LOG_FILE", "/tmp/logs"),
        ]);

        let config = ConfigLoader::load_config_with(temp_file.path(), lookup)
            .expect("Failed to load config");

        assert_eq!(config.dataset.path, "from_env.csv");
        assert_eq!(config.server.bind, "127.0.0.1:9999");
        assert_eq!(config.dashboard.top_n, 10);
        assert_eq!(config.dashboard.currency, "IDR");
        assert_eq!(config.dashboard.locale, "id-ID");
        assert_eq!(config.graph.width, 1500);
        assert_eq!(config.graph.height, 700);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file.as_deref(), Some("/tmp/logs"));
    }

    #[test]
    fn test_env_parse_error() {
        let temp_file = create_test_config_file("");
        let lookup = env_from(&[("ORDERLENS_GRAPH_WIDTH", "not_a_number")]);
        let result = ConfigLoader::load_config_with(temp_file.path(), lookup);

        match result.unwrap_err() {
            ConfigError::EnvParseError { var, .. } => assert_eq!(var, "ORDERLENS_GRAPH_WIDTH"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_env_override_is_validated() {
        let lookup = env_from(&[("ORDERLENS_TOP_N", "500")]);
        let result = ConfigLoader::defaults_with(lookup);

        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config_with("/nonexistent/path/orderlens.yaml", no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_explicit_missing_path_is_config_error() {
        let error = ConfigLoader::load(Some(Path::new("/nonexistent/orderlens.yaml"))).unwrap_err();
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("/nonexistent/orderlens.yaml"));
    }
}
