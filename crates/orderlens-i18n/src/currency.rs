//! Locale-aware number and currency formatting

use crate::Locale;

/// Display symbol for a currency code; unknown codes stand for themselves
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "BRL" => "R$",
        "IDR" => "Rp",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        other => other,
    }
}

/// Format `value` with `decimals` fraction digits and the locale's grouping
pub fn format_number(value: f64, decimals: usize, locale: Locale) -> String {
    let (group, decimal) = locale.separators();
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(group);
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push(decimal);
        grouped.push_str(fraction);
    }

    if value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format a monetary amount the way the locale writes it.
///
/// `en-US` and `id-ID` put the symbol directly before the digits, `pt-BR`
/// separates it with a space. Negative amounts get a leading `-`.
pub fn format_currency(amount: f64, code: &str, locale: Locale) -> String {
    let symbol = currency_symbol(code);
    let digits = format_number(amount.abs(), 2, locale);
    let sign = if amount < 0.0 && digits.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match locale {
        Locale::PortugueseBrazil => format!("{sign}{symbol} {digits}"),
        Locale::EnglishUs | Locale::Indonesian => format!("{sign}{symbol}{digits}"),
    }
}
