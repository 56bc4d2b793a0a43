//! Error types and utilities for OrderLens

use thiserror::Error;

/// Result type alias for OrderLens operations
pub type Result<T> = std::result::Result<T, OrderLensError>;

/// Main error type for OrderLens operations
#[derive(Error, Debug)]
pub enum OrderLensError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The order dataset could not be loaded
    #[error("Dataset load error: {0}")]
    Load(#[from] LoadError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internationalization and localization errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

/// Reasons the order dataset cannot be loaded.
///
/// Every variant is fatal: the dashboard has nothing to show without a
/// complete table.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("cannot read '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV itself is malformed
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks required columns
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A field value could not be parsed
    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// The file has a header but no data rows
    #[error("dataset contains no orders")]
    Empty,
}

impl OrderLensError {
    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

impl From<csv::Error> for OrderLensError {
    fn from(err: csv::Error) -> Self {
        Self::Load(LoadError::Csv(err))
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to OrderLensError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for OrderLensError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let graph_error = OrderLensError::graph("no backend");
        assert_eq!(graph_error.to_string(), "Graph error: no backend");
        assert!(graph_error.source().is_none());

        let validation_error = OrderLensError::validation_field("Invalid input", "top_n");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid input"));
        assert!(matches!(
            validation_error,
            OrderLensError::Validation { field: Some(ref f), .. } if f == "top_n"
        ));
    }

    #[test]
    fn test_error_with_source() {
        let config_error = OrderLensError::config_with_source(
            "Failed to read file",
            io::Error::new(io::ErrorKind::NotFound, "File not found"),
        );
        assert_eq!(
            config_error.to_string(),
            "Configuration error: Failed to read file"
        );
        assert!(config_error.source().is_some());

        let graph_error = OrderLensError::graph_with_source(
            "Chart failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );
        assert_eq!(graph_error.to_string(), "Graph error: Chart failed");
        assert!(graph_error.source().is_some());
    }

    #[test]
    fn test_load_error_messages() {
        let missing = LoadError::MissingColumns {
            columns: vec!["order_id".to_string(), "payment_value".to_string()],
        };
        assert_eq!(
            missing.to_string(),
            "missing required columns: order_id, payment_value"
        );

        let invalid = LoadError::InvalidField {
            line: 7,
            column: "order_purchase_timestamp",
            value: "yesterday".to_string(),
        };
        assert_eq!(
            invalid.to_string(),
            "line 7: invalid order_purchase_timestamp value 'yesterday'"
        );

        let wrapped: OrderLensError = LoadError::Empty.into();
        assert!(matches!(wrapped, OrderLensError::Load(LoadError::Empty)));
        assert_eq!(wrapped.to_string(), "Dataset load error: dataset contains no orders");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: OrderLensError = io_error.into();

        assert!(err.to_string().contains("I/O error"));
        assert!(err.source().is_some());
        assert!(matches!(err, OrderLensError::Io(_)));
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#)
            .unwrap_err();
        let err: OrderLensError = serde_error.into();

        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = OrderLensError::config_with_source("Middle layer", root_error);
        let top_error = OrderLensError::graph_with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 2);
    }
}
