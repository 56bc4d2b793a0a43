//! Application configuration structures

use orderlens_common::CategoryLabel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Input dataset location
    #[validate(nested)]
    pub dataset: DatasetConfig,

    /// What the dashboard shows and how numbers are formatted
    #[validate(nested)]
    pub dashboard: DashboardConfig,

    /// HTTP server settings
    #[validate(nested)]
    pub server: ServerConfig,

    /// Chart rendering settings
    #[validate(nested)]
    pub graph: GraphConfig,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingConfig,
}

/// Input dataset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path of the pre-joined orders CSV
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Dataset path must be non-empty and free of invalid characters"
    ))]
    pub path: String,
}

/// Dashboard content configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page title
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    /// How many entries the top/bottom and RFM charts show
    #[validate(range(min = 1, max = 50, message = "top_n must be between 1 and 50"))]
    pub top_n: usize,

    /// Category column used for the product charts
    pub category_label: CategoryLabel,

    /// Insert empty months into the monthly chart
    pub zero_fill_months: bool,

    /// ISO 4217 currency code for the revenue figure
    #[validate(custom(
        function = "crate::validation::validate_currency_code",
        message = "Currency must be three upper-case letters"
    ))]
    pub currency: String,

    /// UI locale
    #[validate(custom(
        function = "crate::validation::validate_locale",
        message = "Locale must be one of: en-US, id-ID, pt-BR"
    ))]
    pub locale: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the dashboard listens on
    #[validate(custom(
        function = "crate::validation::validate_socket_addr",
        message = "Bind address must look like 127.0.0.1:8501"
    ))]
    pub bind: String,
}

/// Graph rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GraphConfig {
    /// Graph width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Graph height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(custom(
        function = "crate::validation::validate_hex_color",
        message = "Background color must be a hex color like #F9F9F9"
    ))]
    pub background_color: String,

    /// Color of the highlighted first bar and the monthly line
    #[validate(custom(
        function = "crate::validation::validate_hex_color",
        message = "Primary color must be a hex color like #90CAF9"
    ))]
    pub primary_color: String,

    /// Color of the remaining bars
    #[validate(custom(
        function = "crate::validation::validate_hex_color",
        message = "Muted color must be a hex color like #D3D3D3"
    ))]
    pub muted_color: String,

    /// Font family for text rendering
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Font size for labels
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub font_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Optional directory for daily-rolling log files
    pub file: Option<String>,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,

    /// Number of rotated log files to keep
    #[validate(range(min = 1, max = 100, message = "Max log files must be between 1 and 100"))]
    pub max_files: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "main_data.csv".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Data Summary and Insights".to_string(),
            top_n: 5,
            category_label: CategoryLabel::English,
            zero_fill_months: false,
            currency: "USD".to_string(),
            locale: "en-US".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 500,
            background_color: "#F9F9F9".to_string(),
            primary_color: "#90CAF9".to_string(),
            muted_color: "#D3D3D3".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 14,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            json: false,
            max_files: 5,
        }
    }
}

impl Config {
    /// Validate every section, including checks that span fields
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        self.graph.validate_palette()
    }
}

impl GraphConfig {
    /// The highlight must stand out from the remaining bars
    pub fn validate_palette(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = validator::ValidationErrors::new();

        if self.primary_color.eq_ignore_ascii_case(&self.muted_color) {
            let mut error = validator::ValidationError::new("indistinct_palette");
            error.message = Some("Primary and muted colors must differ".into());
            errors.add("muted_color", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl LoggingConfig {
    /// Translate into the settings the logging initializer takes
    pub fn to_logging_config(&self) -> orderlens_common::LoggingConfig {
        orderlens_common::LoggingConfig {
            level: self.level.clone(),
            json_format: self.json,
            directory: self.file.as_ref().map(PathBuf::from),
            max_files: self.max_files,
            ..orderlens_common::LoggingConfig::default()
        }
    }
}
