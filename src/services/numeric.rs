// src/services/numeric.rs
//
// The upstream sheet stores every number as free text. These helpers read
// the leading numeric part of a field and fall back to zero, so a bad cell
// can never poison a sum.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Longest leading slice of `raw` that reads as a plain decimal number
/// (`-12.5` in `"-12.5 hrs"`). Empty when there is no digit to read.
pub fn number_prefix(raw: &str) -> &str {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut digits = 0;
    let mut seen_dot = false;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if digits == 0 {
        return "";
    }
    s[..end].trim_end_matches('.')
}

pub fn parse_f64(raw: &str) -> f64 {
    number_prefix(raw)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_decimal(raw: &str) -> Decimal {
    let prefix = number_prefix(raw);
    Decimal::from_str(prefix.trim_start_matches('+')).unwrap_or(Decimal::ZERO)
}

/// Empty, blank and the spreadsheet's `"0"` placeholder all mean "no department".
pub fn normalize_department(raw: &str) -> String {
    if raw.trim().is_empty() || raw == "0" {
        "N/A".to_string()
    } else {
        raw.to_string()
    }
}

/// Round half up to one decimal place, the way the dashboard cards display deltas.
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn reads_leading_number_like_the_sheet_does() {
        assert_eq!(parse_f64("12.5"), 12.5);
        assert_eq!(parse_f64(" 7 hrs"), 7.0);
        assert_eq!(parse_f64("-3"), -3.0);
        assert_eq!(parse_f64("20,000"), 20.0);
        assert_eq!(parse_f64("4."), 4.0);
    }

    #[test]
    fn garbage_degrades_to_zero() {
        for raw in ["", "   ", "abc", "-", ".", "NaN", "inf", "Infinity"] {
            assert_eq!(parse_f64(raw), 0.0, "input {raw:?}");
            assert_eq!(parse_decimal(raw), Decimal::ZERO, "input {raw:?}");
        }
    }

    #[test]
    fn decimal_parsing_keeps_precision() {
        assert_eq!(parse_decimal("45000.50"), dec!(45000.50));
        assert_eq!(parse_decimal("+100"), dec!(100));
        assert_eq!(parse_decimal("-250.25 due"), dec!(-250.25));
    }

    #[test]
    fn department_normalization() {
        assert_eq!(normalize_department(""), "N/A");
        assert_eq!(normalize_department("   "), "N/A");
        assert_eq!(normalize_department("0"), "N/A");
        assert_eq!(normalize_department("Sales"), "Sales");
    }

    #[test]
    fn rounding_matches_dashboard_display() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(12.36), 12.4);
        assert_eq!(round1(-0.04), 0.0);
        assert_eq!(round2(83.333), 83.33);
    }
}
