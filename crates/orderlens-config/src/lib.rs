//! Configuration management for OrderLens

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    Config, DashboardConfig, DatasetConfig, GraphConfig, LoggingConfig, ServerConfig,
};
