//! Locale management and utilities

use crate::error::{I18nError, I18nResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use unic_langid::LanguageIdentifier;

/// Supported locales
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnglishUs,
    #[serde(rename = "id-ID")]
    Indonesian,
    #[serde(rename = "pt-BR")]
    PortugueseBrazil,
}

impl Locale {
    /// Get the language code for this locale
    pub fn code(&self) -> &'static str {
        match self {
            Self::EnglishUs => "en-US",
            Self::Indonesian => "id-ID",
            Self::PortugueseBrazil => "pt-BR",
        }
    }

    /// Parse a locale from a language code (`pt-BR`, `pt_BR` or `pt`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.replace('_', "-").as_str() {
            "en" | "en-US" => Some(Self::EnglishUs),
            "id" | "id-ID" => Some(Self::Indonesian),
            "pt" | "pt-BR" => Some(Self::PortugueseBrazil),
            _ => None,
        }
    }

    /// Convert to Fluent LanguageIdentifier
    pub fn to_language_identifier(&self) -> I18nResult<LanguageIdentifier> {
        self.code()
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(self.code().to_string()))
    }

    /// Get all supported locales
    pub fn all() -> [Self; 3] {
        [Self::EnglishUs, Self::Indonesian, Self::PortugueseBrazil]
    }

    /// Get the display name for this locale
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::EnglishUs => "English (US)",
            Self::Indonesian => "Bahasa Indonesia",
            Self::PortugueseBrazil => "Português (Brasil)",
        }
    }

    /// Bundled Fluent source for this locale
    pub fn resource(&self) -> &'static str {
        match self {
            Self::EnglishUs => include_str!("../locales/en-US/main.ftl"),
            Self::Indonesian => include_str!("../locales/id-ID/main.ftl"),
            Self::PortugueseBrazil => include_str!("../locales/pt-BR/main.ftl"),
        }
    }

    /// Thousands and decimal separators
    pub fn separators(&self) -> (char, char) {
        match self {
            Self::EnglishUs => (',', '.'),
            Self::Indonesian | Self::PortugueseBrazil => ('.', ','),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| I18nError::UnsupportedLocale(s.to_string()))
    }
}
