//! Internationalization manager

use crate::bundle::BundleManager;
use crate::currency;
use crate::error::{I18nError, I18nResult};
use crate::Locale;
use fluent::{FluentArgs, FluentValue};
use tracing::{debug, info, warn};

/// Messages for one active locale, with English as the fallback
#[derive(Debug)]
pub struct I18nManager {
    locale: Locale,
    bundle_manager: BundleManager,
}

impl I18nManager {
    /// Load the bundled resources for `locale` and the English fallback
    pub fn new(locale: Locale) -> I18nResult<Self> {
        let mut bundle_manager = BundleManager::new();
        bundle_manager.add_resource(Locale::EnglishUs, Locale::EnglishUs.resource())?;
        if locale != Locale::EnglishUs {
            bundle_manager.add_resource(locale, locale.resource())?;
        }

        info!(locale = %locale, "I18nManager initialized");
        Ok(Self {
            locale,
            bundle_manager,
        })
    }

    /// Create a manager from a locale code such as `pt-BR`
    pub fn from_code(code: &str) -> I18nResult<Self> {
        Self::new(code.parse()?)
    }

    /// The active locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Format a message, reporting a missing key or bad arguments
    pub fn try_message(&self, key: &str, args: Option<&FluentArgs>) -> I18nResult<String> {
        if self.bundle_manager.has_message(self.locale, key) {
            return self.bundle_manager.format_message(self.locale, key, args);
        }

        if self.locale != Locale::EnglishUs
            && self.bundle_manager.has_message(Locale::EnglishUs, key)
        {
            debug!(
                "Message '{}' not found in locale {}, falling back to en-US",
                key, self.locale
            );
            return self
                .bundle_manager
                .format_message(Locale::EnglishUs, key, args);
        }

        Err(I18nError::MessageNotFound {
            key: key.to_string(),
        })
    }

    /// Format a message, falling back to English and then to the key itself
    pub fn message(&self, key: &str, args: Option<&FluentArgs>) -> String {
        self.try_message(key, args).unwrap_or_else(|e| {
            warn!("Message '{}' unavailable ({}), using the key", key, e);
            key.to_string()
        })
    }

    /// Check if a message exists in the active locale or the fallback
    pub fn has_message(&self, key: &str) -> bool {
        self.bundle_manager.has_message(self.locale, key)
            || self.bundle_manager.has_message(Locale::EnglishUs, key)
    }

    /// Localized full month name, `month` in `1..=12`
    pub fn month_name(&self, month: u32) -> String {
        self.message(&format!("month-{month}"), None)
    }

    /// Format an amount in `code` using the active locale
    pub fn format_currency(&self, amount: f64, code: &str) -> String {
        currency::format_currency(amount, code, self.locale)
    }

    /// The "Total Revenue: …" headline
    pub fn total_revenue(&self, amount: f64, code: &str) -> String {
        let mut args = FluentArgs::new();
        args.set("amount", self.format_currency(amount, code));
        self.message("total-revenue", Some(&args))
    }

    /// Axis label for monetary values, carrying the currency symbol
    pub fn monetary_axis(&self, code: &str) -> String {
        let mut args = FluentArgs::new();
        args.set("symbol", currency::currency_symbol(code).to_string());
        self.message("axis-monetary", Some(&args))
    }

    /// The row-count caption shown under the date picker
    pub fn rows_in_range(&self, count: usize, start: &str, end: &str) -> String {
        let mut args = FluentArgs::new();
        args.set("count", FluentValue::from(count));
        args.set("start", start.to_string());
        args.set("end", end.to_string());
        self.message("rows-in-range", Some(&args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_messages() {
        let manager = I18nManager::new(Locale::EnglishUs).unwrap();
        assert_eq!(manager.message("app-title", None), "Data Summary and Insights");
        assert_eq!(manager.message("tab-sold-products", None), "Sold Products");
        assert_eq!(manager.month_name(1), "January");
    }

    #[test]
    fn test_localized_messages() {
        let manager = I18nManager::from_code("id-ID").unwrap();
        assert_eq!(manager.message("date-range-label", None), "Periode");
        assert_eq!(manager.month_name(5), "Mei");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        let manager = I18nManager::new(Locale::PortugueseBrazil).unwrap();
        assert_eq!(manager.message("no-such-message", None), "no-such-message");
        assert!(manager.try_message("no-such-message", None).is_err());
    }

    #[test]
    fn test_total_revenue_headline() {
        let manager = I18nManager::new(Locale::EnglishUs).unwrap();
        assert_eq!(
            manager.total_revenue(1234.56, "USD"),
            "Total Revenue: $1,234.56"
        );

        let manager = I18nManager::new(Locale::PortugueseBrazil).unwrap();
        assert_eq!(
            manager.total_revenue(1234.56, "BRL"),
            "Receita Total: R$ 1.234,56"
        );
    }

    #[test]
    fn test_monetary_axis_uses_symbol() {
        let manager = I18nManager::new(Locale::EnglishUs).unwrap();
        assert_eq!(manager.monetary_axis("USD"), "Amount ($)");
    }

    #[test]
    fn test_rows_in_range_plural() {
        let manager = I18nManager::new(Locale::EnglishUs).unwrap();
        assert_eq!(
            manager.rows_in_range(1, "2023-01-01", "2023-01-31"),
            "1 order line between 2023-01-01 and 2023-01-31"
        );
        assert_eq!(
            manager.rows_in_range(3, "2023-01-01", "2023-02-15"),
            "3 order lines between 2023-01-01 and 2023-02-15"
        );
    }

    #[test]
    fn test_unsupported_code() {
        assert!(matches!(
            I18nManager::from_code("xx-XX").unwrap_err(),
            I18nError::UnsupportedLocale(_)
        ));
    }
}
