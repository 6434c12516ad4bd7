//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;

use nexus_core::format_grouped;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Groups the integer digits of a number with commas (`2450` -> `2,450`).
///
/// Values that are not numbers are passed through unchanged.
///
/// Usage in templates: `{{ page.views|grouped }}`
#[askama::filter_fn]
pub fn grouped(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(grouped_text(&value.to_string()))
}

fn grouped_text(raw: &str) -> String {
    Decimal::from_str(raw.trim()).map_or_else(|_| raw.to_string(), format_grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_text() {
        assert_eq!(grouped_text("45000"), "45,000");
        assert_eq!(grouped_text("450.5"), "450.5");
        assert_eq!(grouped_text("3m 12s"), "3m 12s");
    }
}
