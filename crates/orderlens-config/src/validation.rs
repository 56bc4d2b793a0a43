//! Validation utilities and regex patterns

use regex::Regex;
use std::{net::SocketAddr, sync::LazyLock};
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #90CAF9)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Regex pattern for ISO 4217 style currency codes
pub static CURRENCY_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("Invalid currency regex pattern"));

/// Locales with bundled UI messages
pub const SUPPORTED_LOCALES: [&str; 3] = ["en-US", "id-ID", "pt-BR"];

/// Validate a `#RRGGBB` color
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_hex_color"))
    }
}

/// Validate a three-letter upper-case currency code
pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    if CURRENCY_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_currency_code"))
    }
}

/// Validate that a locale has bundled messages
pub fn validate_locale(locale: &str) -> Result<(), ValidationError> {
    if SUPPORTED_LOCALES.contains(&locale) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_locale"))
    }
}

/// Validate a `host:port` socket address
pub fn validate_socket_addr(bind: &str) -> Result<(), ValidationError> {
    bind.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_socket_addr"))
}

/// Validate a log level name
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays allowed for Windows drive letters
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}
