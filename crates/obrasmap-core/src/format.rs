//! Locale-aware number formatting for amounts and percentages.

use serde::{Deserialize, Serialize};

const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;

/// Separators and unit labels of the display locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberLocale {
    /// Inserted between groups of three integer digits.
    pub thousands_separator: String,
    /// Separates integer and fractional digits.
    pub decimal_separator: String,
    /// Unit label for amounts scaled by 1e6.
    pub millions_label: String,
    /// Unit label for amounts scaled by 1e9.
    pub billions_label: String,
    /// Prefix of monetary values.
    pub currency_symbol: String,
}

impl Default for NumberLocale {
    /// Argentine Spanish (`es-AR`).
    fn default() -> Self {
        Self {
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            millions_label: "millones".to_string(),
            billions_label: "mil millones".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl NumberLocale {
    /// US English (`en-US`).
    #[must_use]
    pub fn en_us() -> Self {
        Self {
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            millions_label: "millions".to_string(),
            billions_label: "billions".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

/// An amount scaled to a readable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaledAmount {
    /// Formatted number.
    pub value: String,
    /// Unit label; empty for unscaled amounts.
    pub unit: String,
}

impl std::fmt::Display for ScaledAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.unit.is_empty() {
            f.write_str(&self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

/// Scale an amount for KPI display.
///
/// Amounts from 1e9 are shown in billions and amounts from 1e6 in
/// millions, both with two fractional digits; smaller amounts are shown as
/// a grouped integer with no unit. Negative amounts take the last branch.
#[must_use]
pub fn format_for_display(amount: f64, locale: &NumberLocale) -> ScaledAmount {
    if amount >= BILLION {
        ScaledAmount {
            value: format_fixed(amount / BILLION, 2, locale),
            unit: locale.billions_label.clone(),
        }
    } else if amount >= MILLION {
        ScaledAmount {
            value: format_fixed(amount / MILLION, 2, locale),
            unit: locale.millions_label.clone(),
        }
    } else {
        ScaledAmount {
            value: format_integer(amount, locale),
            unit: String::new(),
        }
    }
}

/// Round to `decimals` fractional digits, halves away from zero.
///
/// Shared by amounts and percentages: `1.125` and `0.125` both round up.
#[must_use]
pub fn round_half_away(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}

/// Format with a fixed number of fractional digits and grouped integer part.
#[must_use]
pub fn format_fixed(value: f64, decimals: u8, locale: &NumberLocale) -> String {
    let precision = usize::from(decimals);
    let formatted = format!("{:.precision$}", round_half_away(value, decimals));
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    // "-0" after rounding reads as zero
    let is_zero = unsigned.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if is_zero { "" } else { sign };

    let grouped = group_thousands(integer, &locale.thousands_separator);
    match fraction {
        Some(f) => format!("{sign}{grouped}{}{f}", locale.decimal_separator),
        None => format!("{sign}{grouped}"),
    }
}

/// Format as a rounded integer with grouped digits.
#[must_use]
pub fn format_integer(value: f64, locale: &NumberLocale) -> String {
    format_fixed(value, 0, locale)
}

/// Format a count with grouped digits.
#[must_use]
pub fn format_count(count: usize, locale: &NumberLocale) -> String {
    group_thousands(&count.to_string(), &locale.thousands_separator)
}

/// Format a monetary value with currency symbol and two decimals.
#[must_use]
pub fn format_currency(amount: f64, locale: &NumberLocale) -> String {
    format!(
        "{} {}",
        locale.currency_symbol,
        format_fixed(amount, 2, locale)
    )
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_a_million_is_grouped_integer() {
        let scaled = format_for_display(500_000.0, &NumberLocale::en_us());
        assert_eq!(scaled.value, "500,000");
        assert_eq!(scaled.unit, "");

        let scaled = format_for_display(500_000.0, &NumberLocale::default());
        assert_eq!(scaled.value, "500.000");
        assert_eq!(scaled.to_string(), "500.000");
    }

    #[test]
    fn test_millions() {
        let scaled = format_for_display(5_500_000.0, &NumberLocale::en_us());
        assert_eq!(scaled.value, "5.50");
        assert_eq!(scaled.unit, "millions");

        let scaled = format_for_display(5_500_000.0, &NumberLocale::default());
        assert_eq!(scaled.to_string(), "5,50 millones");
    }

    #[test]
    fn test_billions() {
        let scaled = format_for_display(10_290_000_000.0, &NumberLocale::en_us());
        assert_eq!(scaled.value, "10.29");
        assert_eq!(scaled.unit, "billions");

        let scaled = format_for_display(10_290_000_000.0, &NumberLocale::default());
        assert_eq!(scaled.to_string(), "10,29 mil millones");
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let locale = NumberLocale::en_us();
        assert_eq!(format_for_display(1_000_000.0, &locale).unit, "millions");
        assert_eq!(format_for_display(999_999.0, &locale).unit, "");
        let billion = format_for_display(1_000_000_000.0, &locale);
        assert_eq!(billion.unit, "billions");
    }

    #[test]
    fn test_large_billions_are_grouped() {
        let scaled = format_for_display(1_234_000_000_000.0, &NumberLocale::en_us());
        assert_eq!(scaled.value, "1,234.00");
    }

    #[test]
    fn test_negative_amount_falls_through_to_integer() {
        let scaled = format_for_display(-2_500_000.0, &NumberLocale::en_us());
        assert_eq!(scaled.value, "-2,500,000");
        assert_eq!(scaled.unit, "");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_for_display(0.0, &NumberLocale::default()).value, "0");
        assert_eq!(format_integer(-0.2, &NumberLocale::default()), "0");
    }

    #[test]
    fn test_format_fixed() {
        let es = NumberLocale::default();
        assert_eq!(format_fixed(1234.567, 2, &es), "1.234,57");
        assert_eq!(format_fixed(1234.567, 0, &es), "1.235");
        assert_eq!(format_fixed(-1234.5, 1, &es), "-1.234,5");
        assert_eq!(format_fixed(12.0, 2, &NumberLocale::en_us()), "12.00");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        let en = NumberLocale::en_us();
        assert_eq!(format_for_display(1_125_000.0, &en).value, "1.13");
        assert_eq!(format_for_display(10_125_000_000.0, &en).value, "10.13");
        assert_eq!(format_for_display(2_500.5, &en).value, "2,501");
        assert_eq!(format_for_display(-2_500.5, &en).value, "-2,501");
        assert_eq!(format_fixed(0.125, 2, &en), "0.13");
    }

    #[test]
    fn test_round_half_away() {
        assert!((round_half_away(45.678, 2) - 45.68).abs() < f64::EPSILON);
        assert!((round_half_away(0.125, 2) - 0.13).abs() < f64::EPSILON);
        assert!((round_half_away(-0.5, 0) + 1.0).abs() < f64::EPSILON);
        assert!((round_half_away(2.0, 0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_count() {
        let locale = NumberLocale::default();
        assert_eq!(format_count(0, &locale), "0");
        assert_eq!(format_count(1_234_567, &locale), "1.234.567");
        assert_eq!(format_count(999, &NumberLocale::en_us()), "999");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(
            format_currency(1_500_000.5, &NumberLocale::default()),
            "$ 1.500.000,50"
        );
    }
}
