//! FILENAME: model/src/format.rs
//! PURPOSE: Pure number formatting for table cells and exports.
//! CONTEXT: Maps a raw cell value and a format mode (raw / thousands /
//! millions) to a localized display string. Missing or non-finite input
//! renders a fixed placeholder instead of panicking.

use serde::{Deserialize, Serialize};

/// Rendered in place of absent or non-numeric cells.
pub const MISSING_PLACEHOLDER: &str = "--";

/// How numeric cells are scaled for display. Orthogonal to the column
/// window and to the tree state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    Raw,
    Thousands,
    Millions,
}

impl Default for FormatMode {
    fn default() -> Self {
        FormatMode::Raw
    }
}

/// Locale-dependent pieces of the rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub group_sep: char,
    pub decimal_sep: char,
    pub thousands_marker: &'static str,
    pub millions_marker: &'static str,
}

impl Locale {
    /// The Russian-style locale the backend data is published in:
    /// space-grouped integers, comma decimals, "тыс." / "млн." markers.
    pub fn ru() -> Self {
        Locale {
            group_sep: ' ',
            decimal_sep: ',',
            thousands_marker: "тыс.",
            millions_marker: "млн.",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::ru()
    }
}

/// Formats a cell value for display.
///
/// - `Raw`: locale-grouped decimal with 2 fraction digits.
/// - `Thousands`: value / 1 000, no fraction digits, thousands marker.
/// - `Millions`: value / 1 000 000, no fraction digits, millions marker.
/// - `None` or non-finite input: the fixed placeholder.
pub fn format_value(value: Option<f64>, mode: FormatMode, locale: &Locale) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return MISSING_PLACEHOLDER.to_string(),
    };

    match mode {
        FormatMode::Raw => format_decimal(value, 2, locale),
        FormatMode::Thousands => format!(
            "{} {}",
            format_decimal(value / 1_000.0, 0, locale),
            locale.thousands_marker
        ),
        FormatMode::Millions => format!(
            "{} {}",
            format_decimal(value / 1_000_000.0, 0, locale),
            locale.millions_marker
        ),
    }
}

/// Formats with the given fraction digits and locale-grouped integer part.
fn format_decimal(value: f64, decimal_places: usize, locale: &Locale) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places);
    let (integer_part, decimal_part) = match rounded.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (rounded.as_str(), None),
    };

    let negative = integer_part.starts_with('-');
    let digits: &str = integer_part.trim_start_matches('-');

    let mut result = String::new();
    if negative {
        result.push('-');
    }

    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(locale.group_sep);
        }
        result.push(c);
    }

    if let Some(decimal) = decimal_part {
        result.push(locale.decimal_sep);
        result.push_str(decimal);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ru() -> Locale {
        Locale::ru()
    }

    #[test]
    fn raw_groups_and_keeps_two_fraction_digits() {
        assert_eq!(
            format_value(Some(1_234_567.0), FormatMode::Raw, &ru()),
            "1 234 567,00"
        );
        assert_eq!(format_value(Some(0.5), FormatMode::Raw, &ru()), "0,50");
        assert_eq!(
            format_value(Some(-9_876.543), FormatMode::Raw, &ru()),
            "-9 876,54"
        );
    }

    #[test]
    fn thousands_divides_rounds_and_suffixes() {
        assert_eq!(
            format_value(Some(1_234_567.0), FormatMode::Thousands, &ru()),
            "1 235 тыс."
        );
    }

    #[test]
    fn millions_divides_rounds_and_suffixes() {
        assert_eq!(
            format_value(Some(1_234_567.0), FormatMode::Millions, &ru()),
            "1 млн."
        );
    }

    #[test]
    fn missing_and_non_finite_render_placeholder() {
        assert_eq!(format_value(None, FormatMode::Raw, &ru()), "--");
        assert_eq!(format_value(Some(f64::NAN), FormatMode::Millions, &ru()), "--");
        assert_eq!(
            format_value(Some(f64::INFINITY), FormatMode::Thousands, &ru()),
            "--"
        );
    }
}
