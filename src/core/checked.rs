//! Overflow-safe `Decimal` arithmetic for the totals pipeline.
//!
//! `Decimal` operators panic once a result no longer fits in 96 bits. The
//! pipeline never fails, so an overflowed figure becomes zero and a warning
//! is logged, the same way unparsable input is coerced.

use rust_decimal::Decimal;

pub(crate) fn add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| overflowed("add", a, b))
}

pub(crate) fn sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or_else(|| overflowed("sub", a, b))
}

pub(crate) fn mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| overflowed("mul", a, b))
}

/// `a / b`; zero for a zero divisor.
pub(crate) fn div(a: Decimal, b: Decimal) -> Decimal {
    a.checked_div(b).unwrap_or_else(|| overflowed("div", a, b))
}

/// `base × rate / 100`.
pub(crate) fn percent_of(base: Decimal, rate: Decimal) -> Decimal {
    div(mul(base, rate), Decimal::ONE_HUNDRED)
}

pub(crate) fn sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, add)
}

fn overflowed(op: &'static str, a: Decimal, b: Decimal) -> Decimal {
    tracing::warn!(op, %a, %b, "decimal overflow, using 0");
    Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn in_range_matches_operators() {
        assert_eq!(add(dec!(1.5), dec!(2.25)), dec!(3.75));
        assert_eq!(sub(dec!(1.5), dec!(2.25)), dec!(-0.75));
        assert_eq!(mul(dec!(1.5), dec!(2)), dec!(3));
        assert_eq!(percent_of(dec!(200), dec!(18)), dec!(36));
        assert_eq!(sum([dec!(1), dec!(2), dec!(3)]), dec!(6));
        assert_eq!(sum([]), Decimal::ZERO);
    }

    #[test]
    fn overflow_is_zero() {
        assert_eq!(mul(Decimal::MAX, dec!(2)), Decimal::ZERO);
        assert_eq!(add(Decimal::MAX, Decimal::MAX), Decimal::ZERO);
        assert_eq!(sub(Decimal::MIN, Decimal::MAX), Decimal::ZERO);
        assert_eq!(percent_of(Decimal::MAX, dec!(20)), Decimal::ZERO);
    }

    #[test]
    fn division_by_zero_is_zero() {
        assert_eq!(div(dec!(5), Decimal::ZERO), Decimal::ZERO);
    }
}
