//! Display rounding of computed totals.
//!
//! The pipeline never rounds; these helpers produce a copy fit for display.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use super::currencies::minor_units;
use super::types::*;

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl DocumentTotals {
    /// Copy with every amount rounded half-up to `dp` places.
    ///
    /// Rates (VAT rates, exchange rate) are left as entered.
    pub fn rounded(&self, dp: u32) -> DocumentTotals {
        let r = |v: Decimal| round_half_up(v, dp);
        DocumentTotals {
            sub_total: r(self.sub_total),
            line_discount_total: r(self.line_discount_total),
            document_discount: r(self.document_discount),
            discounted_sub_total: r(self.discounted_sub_total),
            special_tax_totals: self
                .special_tax_totals
                .iter()
                .map(|t| SpecialTaxTotal {
                    kind: t.kind,
                    amount: r(t.amount),
                })
                .collect(),
            vat_breakdown: self
                .vat_breakdown
                .iter()
                .map(|b| VatBreakdown {
                    rate: b.rate,
                    taxable_amount: r(b.taxable_amount),
                    vat_amount: r(b.vat_amount),
                })
                .collect(),
            vat_total: r(self.vat_total),
            withholding_tax: r(self.withholding_tax),
            vat_withholding: r(self.vat_withholding),
            grand_total: r(self.grand_total),
            currency_code: self.currency_code.clone(),
            reporting_currency_code: self.reporting_currency_code.clone(),
            exchange_rate: self.exchange_rate,
            exchange_rate_date: self.exchange_rate_date,
            reporting_currency_total: r(self.reporting_currency_total),
        }
    }

    /// Copy rounded to the document currency's minor units.
    ///
    /// The reporting total is rounded to the reporting currency's minor
    /// units instead.
    pub fn rounded_to_currency(&self) -> DocumentTotals {
        let mut out = self.rounded(minor_units(&self.currency_code));
        out.reporting_currency_total = round_half_up(
            self.reporting_currency_total,
            minor_units(&self.reporting_currency_code),
        );
        out
    }
}

impl fmt::Display for DocumentTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cur = &self.currency_code;
        writeln!(f, "sub total: {:.2} {cur}", self.sub_total)?;
        if !self.line_discount_total.is_zero() {
            writeln!(f, "line discounts: -{:.2} {cur}", self.line_discount_total)?;
        }
        if !self.document_discount.is_zero() {
            writeln!(f, "document discount: -{:.2} {cur}", self.document_discount)?;
        }
        for t in &self.special_tax_totals {
            writeln!(f, "{}: {:.2} {cur}", t.kind.code(), t.amount)?;
        }
        for b in &self.vat_breakdown {
            writeln!(f, "VAT {}%: {:.2} {cur}", b.rate.normalize(), b.vat_amount)?;
        }
        if !self.withholding_tax.is_zero() {
            writeln!(f, "withholding: -{:.2} {cur}", self.withholding_tax)?;
        }
        if !self.vat_withholding.is_zero() {
            writeln!(f, "VAT withholding: -{:.2} {cur}", self.vat_withholding)?;
        }
        write!(f, "grand total: {:.2} {cur}", self.grand_total)?;
        if !self.currency_code.eq_ignore_ascii_case(&self.reporting_currency_code) {
            write!(
                f,
                "\nreporting total: {:.2} {} (rate {})",
                self.reporting_currency_total,
                self.reporting_currency_code,
                self.exchange_rate.normalize()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::finalize::compute;
    use rust_decimal_macros::dec;

    #[test]
    fn half_up() {
        assert_eq!(round_half_up(dec!(1.005), 2), dec!(1.01));
        assert_eq!(round_half_up(dec!(1.004), 2), dec!(1.00));
        assert_eq!(round_half_up(dec!(-1.005), 2), dec!(-1.01));
        assert_eq!(round_half_up(dec!(2.5), 0), dec!(3));
    }

    #[test]
    fn rounded_copy_keeps_rates() {
        let items = vec![LineItem {
            quantity: dec!(3),
            unit_price: dec!(33.333),
            vat_rate: dec!(18),
            ..LineItem::default()
        }];
        let totals = compute(&items, &DocumentSettings::default()).rounded(2);
        assert_eq!(totals.sub_total, dec!(100.00));
        // 99.999 * 0.18 = 17.99982
        assert_eq!(totals.vat_total, dec!(18.00));
        assert_eq!(totals.vat_breakdown[0].rate, dec!(18));
        assert_eq!(totals.grand_total, dec!(118.00));
    }

    #[test]
    fn currency_minor_units() {
        let items = vec![LineItem {
            quantity: dec!(1),
            unit_price: dec!(1234.567),
            ..LineItem::default()
        }];
        let settings = DocumentSettings {
            currency_code: "JPY".into(),
            reporting_currency_code: "KWD".into(),
            exchange_rate: dec!(0.0020501),
            ..DocumentSettings::default()
        };
        let totals = compute(&items, &settings).rounded_to_currency();
        assert_eq!(totals.grand_total, dec!(1235));
        // 1234.567 * 0.0020501 = 2.5309858067
        assert_eq!(totals.reporting_currency_total, dec!(2.531));
    }
}
