//! Lenient numeric input.
//!
//! Form fields arrive as free text or floats. Anything that is not a finite
//! number becomes zero instead of an error, so the totals pipeline always
//! has something to compute with.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Parse a user-entered amount, returning zero when it is not a number.
///
/// Accepts surrounding whitespace, a leading `+`, either `.` or `,` as the
/// decimal separator, and exponent form ("1e5", "2.5E-3"). Thousands
/// separators are not supported: "1.234,5" is rejected and yields zero.
pub fn parse_decimal(input: &str) -> Decimal {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let normalized = if normalized.contains(',') && !normalized.contains('.') {
        normalized.replacen(',', ".", 1)
    } else {
        normalized.to_string()
    };

    match Decimal::from_str(&normalized).or_else(|_| Decimal::from_scientific(&normalized)) {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(input = trimmed, "unparsable amount, using 0");
            Decimal::ZERO
        }
    }
}

/// Convert a float to a decimal, mapping NaN and infinities to zero.
///
/// Goes through the shortest round-trip text form so `0.1` stays `0.1`.
pub fn decimal_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        tracing::warn!(value, "non-finite amount, using 0");
        return Decimal::ZERO;
    }
    Decimal::from_str(&value.to_string()).unwrap_or_else(|_| {
        tracing::warn!(value, "amount out of decimal range, using 0");
        Decimal::ZERO
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Serde `deserialize_with` helper accepting numbers, numeric strings,
/// `null` and anything else, coercing the non-numeric cases to zero.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawAmount::deserialize(deserializer)?;
    Ok(match raw {
        RawAmount::Int(i) => Decimal::from(i),
        RawAmount::Float(f) => decimal_from_f64(f),
        RawAmount::Text(s) => parse_decimal(&s),
        RawAmount::Other(_) => Decimal::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_decimal("100"), dec!(100));
        assert_eq!(parse_decimal(" 12.50 "), dec!(12.50));
        assert_eq!(parse_decimal("+3"), dec!(3));
        assert_eq!(parse_decimal("-4.2"), dec!(-4.2));
    }

    #[test]
    fn comma_decimal_separator() {
        assert_eq!(parse_decimal("12,5"), dec!(12.5));
        assert_eq!(parse_decimal("0,18"), dec!(0.18));
    }

    #[test]
    fn exponent_form() {
        assert_eq!(parse_decimal("1e5"), dec!(100000));
        assert_eq!(parse_decimal("2.5E-3"), dec!(0.0025));
        assert_eq!(parse_decimal(" 1,5e2 "), dec!(150));
        assert_eq!(parse_decimal("1e"), Decimal::ZERO);
    }

    #[test]
    fn text_and_number_agree() {
        #[derive(serde::Deserialize)]
        struct Field {
            #[serde(deserialize_with = "lenient_decimal")]
            amount: Decimal,
        }
        let text: Field = serde_json::from_str(r#"{"amount":"1e5"}"#).unwrap();
        let number: Field = serde_json::from_str(r#"{"amount":1e5}"#).unwrap();
        assert_eq!(text.amount, number.amount);
        assert_eq!(text.amount, dec!(100000));
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_decimal(""), Decimal::ZERO);
        assert_eq!(parse_decimal("   "), Decimal::ZERO);
        assert_eq!(parse_decimal("abc"), Decimal::ZERO);
        assert_eq!(parse_decimal("NaN"), Decimal::ZERO);
        assert_eq!(parse_decimal("1.234,5"), Decimal::ZERO);
        assert_eq!(parse_decimal("12..3"), Decimal::ZERO);
    }

    #[test]
    fn floats() {
        assert_eq!(decimal_from_f64(0.1), dec!(0.1));
        assert_eq!(decimal_from_f64(18.0), dec!(18));
        assert_eq!(decimal_from_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(decimal_from_f64(f64::INFINITY), Decimal::ZERO);
        assert_eq!(decimal_from_f64(f64::NEG_INFINITY), Decimal::ZERO);
        assert_eq!(decimal_from_f64(1e300), Decimal::ZERO);
    }
}
