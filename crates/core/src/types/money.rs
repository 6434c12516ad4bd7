//! Currency amounts and number display.
//!
//! Amounts are kept as [`Decimal`] so that fixture values such as `1200.50`
//! survive without floating point drift. Display follows the dashboard's
//! locale-style rendering: thousands are grouped with commas and at most three
//! fraction digits are shown, with trailing zeros dropped.

use rust_decimal::{Decimal, RoundingStrategy};

/// Serde adapter that writes an amount as a bare JSON number.
///
/// Whole amounts become integers (`120.00` -> `120`) and everything else a
/// float (`450.50` -> `450.5`). Reading accepts numbers or strings.
pub mod amount_serde {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize a [`Decimal`] as a JSON number.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if writing fails.
    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = value.normalize();
        if normalized.scale() == 0
            && let Some(whole) = normalized.to_i64()
        {
            return serializer.serialize_i64(whole);
        }
        match normalized.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => serializer.serialize_str(&normalized.to_string()),
        }
    }

    /// Deserialize a [`Decimal`] from a JSON number or string.
    ///
    /// # Errors
    ///
    /// Returns the deserializer's error for non-numeric input.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

/// Maximum fraction digits shown by [`format_grouped`].
const MAX_FRACTION_DIGITS: u32 = 3;

/// Format a number with grouped thousands (`1200.5` -> `"1,200.5"`).
#[must_use]
pub fn format_grouped(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format an integer with grouped thousands (`54230` -> `"54,230"`).
#[must_use]
pub fn format_grouped_int(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    if value < 0 {
        format!("-{}", group_digits(&digits))
    } else {
        group_digits(&digits)
    }
}

/// Format a currency amount for display (`1200.5` -> `"$1,200.5"`).
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    format!("${}", format_grouped(value))
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped_integer() {
        assert_eq!(format_grouped(Decimal::new(54230, 0)), "54,230");
        assert_eq!(format_grouped(Decimal::new(894_300, 0)), "894,300");
        assert_eq!(format_grouped(Decimal::new(42, 0)), "42");
    }

    #[test]
    fn test_format_grouped_trims_trailing_zeros() {
        assert_eq!(format_grouped(Decimal::new(120_050, 2)), "1,200.5");
        assert_eq!(format_grouped(Decimal::new(890_000, 2)), "8,900");
        assert_eq!(format_grouped(Decimal::new(0, 2)), "0");
    }

    #[test]
    fn test_format_grouped_rounds_to_three_digits() {
        assert_eq!(format_grouped(Decimal::new(12_345_678, 4)), "1,234.568");
    }

    #[test]
    fn test_format_grouped_negative() {
        assert_eq!(format_grouped(Decimal::new(-1_234_500, 3)), "-1,234.5");
    }

    #[test]
    fn test_format_grouped_int() {
        assert_eq!(format_grouped_int(0), "0");
        assert_eq!(format_grouped_int(999), "999");
        assert_eq!(format_grouped_int(1000), "1,000");
        assert_eq!(format_grouped_int(-2_450_000), "-2,450,000");
    }

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Amount(#[serde(with = "amount_serde")] Decimal);

    #[test]
    fn test_amount_serde_whole_number_is_integer() {
        let json = serde_json::to_string(&Amount(Decimal::new(12000, 2))).unwrap_or_default();
        assert_eq!(json, "120");
    }

    #[test]
    fn test_amount_serde_fraction_is_float() {
        let json = serde_json::to_string(&Amount(Decimal::new(45050, 2))).unwrap_or_default();
        assert_eq!(json, "450.5");
    }

    #[test]
    fn test_amount_serde_reads_numbers() {
        let parsed: Result<Amount, _> = serde_json::from_str("1.2");
        assert!(matches!(parsed, Ok(Amount(value)) if value == Decimal::new(12, 1)));
    }

    #[test]
    fn test_amount_serde_reads_strings() {
        let parsed: Result<Amount, _> = serde_json::from_str("\"1200.50\"");
        assert!(matches!(parsed, Ok(Amount(value)) if value == Decimal::new(120_050, 2)));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::new(35020, 2)), "$350.2");
    }
}
