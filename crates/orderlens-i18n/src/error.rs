//! Error types for internationalization operations

use orderlens_common::OrderLensError;
use thiserror::Error;

/// Errors that can occur during internationalization operations
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// The locale has no bundled messages
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Failed to parse a Fluent resource
    #[error("Failed to parse Fluent resource for {locale}: {errors:?}")]
    FluentParseError { locale: String, errors: Vec<String> },

    /// Message not found in any bundle
    #[error("Message not found: {key}")]
    MessageNotFound { key: String },

    /// Failed to format a message
    #[error("Failed to format message '{key}': {errors:?}")]
    MessageFormatError { key: String, errors: Vec<String> },

    /// Bundle creation failed
    #[error("Failed to create bundle for locale {locale}: {source}")]
    BundleCreationError {
        locale: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl From<I18nError> for OrderLensError {
    fn from(err: I18nError) -> Self {
        let locale = match &err {
            I18nError::InvalidLanguageId(locale) | I18nError::UnsupportedLocale(locale) => {
                Some(locale.clone())
            }
            I18nError::FluentParseError { locale, .. }
            | I18nError::BundleCreationError { locale, .. } => Some(locale.clone()),
            I18nError::MessageNotFound { .. } | I18nError::MessageFormatError { .. } => None,
        };

        OrderLensError::Localization {
            message: err.to_string(),
            locale,
            source: Some(Box::new(err)),
        }
    }
}
