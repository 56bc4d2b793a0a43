//! FluentBundle management and message formatting

use crate::error::{I18nError, I18nResult};
use crate::Locale;
use fluent_bundle::{concurrent::FluentBundle, FluentArgs, FluentResource};
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Holds one Fluent bundle per loaded locale.
///
/// The concurrent bundle flavour is `Send + Sync`, so a manager can sit in
/// shared server state behind an `Arc`.
pub struct BundleManager {
    bundles: HashMap<Locale, FluentBundle<FluentResource>>,
}

impl std::fmt::Debug for BundleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleManager")
            .field("locales", &self.available_locales())
            .finish()
    }
}

impl BundleManager {
    /// Create a new BundleManager
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
        }
    }

    /// Parse `source` and add it to the locale's bundle
    pub fn add_resource(&mut self, locale: Locale, source: &str) -> I18nResult<()> {
        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            I18nError::FluentParseError {
                locale: locale.code().to_string(),
                errors: errors.iter().map(|e| format!("{e:?}")).collect(),
            }
        })?;

        let lang_id = locale.to_language_identifier()?;
        let bundle = self.bundles.entry(locale).or_insert_with(|| {
            let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
            bundle.set_use_isolating(false);
            bundle
        });

        bundle.add_resource(resource).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| format!("{e:?}")).collect();
            error!("Failed to add resource to bundle: {:?}", error_messages);

            I18nError::BundleCreationError {
                locale: locale.code().to_string(),
                source: Box::new(I18nError::FluentParseError {
                    locale: locale.code().to_string(),
                    errors: error_messages,
                }),
            }
        })?;

        debug!(locale = %locale, "Added resource to bundle");
        Ok(())
    }

    /// Format a message with the given arguments
    pub fn format_message(
        &self,
        locale: Locale,
        message_id: &str,
        args: Option<&FluentArgs>,
    ) -> I18nResult<String> {
        let not_found = || I18nError::MessageNotFound {
            key: message_id.to_string(),
        };

        let bundle = self.bundles.get(&locale).ok_or_else(not_found)?;
        let pattern = bundle
            .get_message(message_id)
            .and_then(|message| message.value())
            .ok_or_else(not_found)?;

        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, args, &mut errors);

        if !errors.is_empty() {
            let error_messages: Vec<String> = errors.iter().map(|e| format!("{e:?}")).collect();
            warn!(
                "Formatting errors for message '{}': {:?}",
                message_id, error_messages
            );

            return Err(I18nError::MessageFormatError {
                key: message_id.to_string(),
                errors: error_messages,
            });
        }

        Ok(formatted.into_owned())
    }

    /// Check if a message exists in the bundle
    pub fn has_message(&self, locale: Locale, message_id: &str) -> bool {
        self.bundles
            .get(&locale)
            .is_some_and(|bundle| bundle.has_message(message_id))
    }

    /// Get all available locales
    pub fn available_locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self.bundles.keys().copied().collect();
        locales.sort_by_key(|locale| locale.code());
        locales
    }
}

impl Default for BundleManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Build `Some(FluentArgs)` from `key => value` pairs
#[macro_export]
macro_rules! fluent_args {
    () => {
        None
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::FluentArgs::new();
        $(
            args.set($key, $value);
        )+
        Some(args)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_format() {
        let mut manager = BundleManager::new();
        manager
            .add_resource(Locale::EnglishUs, "hello = Hello, { $name }!")
            .unwrap();

        let args: Option<FluentArgs> = crate::fluent_args!["name" => "Ana"];
        let formatted = manager
            .format_message(Locale::EnglishUs, "hello", args.as_ref())
            .unwrap();
        assert_eq!(formatted, "Hello, Ana!");
        assert!(manager.has_message(Locale::EnglishUs, "hello"));
        assert!(!manager.has_message(Locale::Indonesian, "hello"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let mut manager = BundleManager::new();
        let error = manager
            .add_resource(Locale::EnglishUs, "broken = { $name")
            .unwrap_err();
        assert!(matches!(error, I18nError::FluentParseError { .. }));
    }

    #[test]
    fn test_duplicate_message_is_rejected() {
        let mut manager = BundleManager::new();
        manager.add_resource(Locale::EnglishUs, "a = one").unwrap();
        let error = manager.add_resource(Locale::EnglishUs, "a = two").unwrap_err();
        assert!(matches!(error, I18nError::BundleCreationError { .. }));
    }

    #[test]
    fn test_missing_argument_is_format_error() {
        let mut manager = BundleManager::new();
        manager
            .add_resource(Locale::EnglishUs, "hello = Hello, { $name }!")
            .unwrap();

        let error = manager
            .format_message(Locale::EnglishUs, "hello", None)
            .unwrap_err();
        assert!(matches!(error, I18nError::MessageFormatError { .. }));
    }
}
