//! Internationalization support for OrderLens
//!
//! UI messages come from Fluent resources bundled into the binary for
//! `en-US`, `id-ID` and `pt-BR`. Lookups fall back to English and then to
//! the message key. Currency amounts are formatted per locale.
//!
//! # Example
//!
//! ```rust
//! use orderlens_i18n::{I18nManager, Locale};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = I18nManager::new(Locale::PortugueseBrazil)?;
//! assert_eq!(manager.format_currency(1234.56, "BRL"), "R$ 1.234,56");
//! println!("{}", manager.message("app-title", None));
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod currency;
pub mod error;
pub mod locale;
pub mod manager;

pub use bundle::BundleManager;
pub use currency::{currency_symbol, format_currency, format_number};
pub use error::{I18nError, I18nResult};
pub use locale::Locale;
pub use manager::I18nManager;

// Re-export commonly used Fluent types
pub use fluent::{FluentArgs, FluentValue};
