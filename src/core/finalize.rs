use rust_decimal::Decimal;

use super::aggregate::aggregate;
use super::checked;
use super::error::FaturaError;
use super::types::*;
use super::validation::{validate_arithmetic, validate_line, validate_settings};

/// Apply document discount, withholding and currency conversion to
/// aggregated line figures.
///
/// ```text
/// grand_total = sub_total − line discounts − document discount
///             + special taxes + VAT − withholding tax − VAT withholding
/// ```
pub fn finalize(aggregated: &AggregatedTotals, settings: &DocumentSettings) -> DocumentTotals {
    let after_line_discounts = checked::sub(aggregated.sub_total, aggregated.line_discount_total);
    let document_discount = settings
        .document_discount
        .map(|d| d.amount_of(after_line_discounts))
        .unwrap_or(Decimal::ZERO);
    let discounted_sub_total = checked::sub(after_line_discounts, document_discount);

    let special_tax_total = aggregated.special_tax_total();
    let vat_total = aggregated.vat_total();

    let (withholding_tax, vat_withholding) = match settings.withholding {
        WithholdingConfig::None => (Decimal::ZERO, Decimal::ZERO),
        WithholdingConfig::Purchase { percentage } => {
            (checked::percent_of(vat_total, percentage), Decimal::ZERO)
        }
        WithholdingConfig::Sales {
            stopaj_percentage,
            vat_withholding,
        } => (
            checked::percent_of(discounted_sub_total, stopaj_percentage),
            vat_withholding
                .map(|w| w.amount_of(vat_total))
                .unwrap_or(Decimal::ZERO),
        ),
    };

    let grand_total = grand_total(
        discounted_sub_total,
        special_tax_total,
        vat_total,
        withholding_tax,
        vat_withholding,
    );

    let exchange_rate = settings.effective_exchange_rate();
    let reporting_currency_total = checked::mul(grand_total, exchange_rate);

    tracing::debug!(
        %discounted_sub_total,
        %vat_total,
        %withholding_tax,
        %vat_withholding,
        %grand_total,
        %exchange_rate,
        "finalized document totals"
    );

    DocumentTotals {
        sub_total: aggregated.sub_total,
        line_discount_total: aggregated.line_discount_total,
        document_discount,
        discounted_sub_total,
        special_tax_totals: aggregated.special_tax_totals.clone(),
        vat_breakdown: aggregated.vat_breakdown.clone(),
        vat_total,
        withholding_tax,
        vat_withholding,
        grand_total,
        currency_code: settings.currency_code.clone(),
        reporting_currency_code: settings.reporting_currency_code.clone(),
        exchange_rate,
        exchange_rate_date: settings.exchange_rate_date,
        reporting_currency_total,
    }
}

/// `discounted + special taxes + VAT − withholding − VAT withholding`.
pub(crate) fn grand_total(
    discounted_sub_total: Decimal,
    special_tax_total: Decimal,
    vat_total: Decimal,
    withholding_tax: Decimal,
    vat_withholding: Decimal,
) -> Decimal {
    let gross = checked::sum([discounted_sub_total, special_tax_total, vat_total]);
    checked::sub(checked::sub(gross, withholding_tax), vat_withholding)
}

/// Run the full pipeline: line totals, aggregation, document adjustments.
pub fn compute(items: &[LineItem], settings: &DocumentSettings) -> DocumentTotals {
    finalize(&aggregate(items), settings)
}

/// Like [`compute`], but rejects invalid settings or lines first and checks
/// the result with [`validate_arithmetic`].
///
/// Returns every validation error found, joined into one
/// [`FaturaError::Validation`].
pub fn compute_checked(
    items: &[LineItem],
    settings: &DocumentSettings,
) -> Result<DocumentTotals, FaturaError> {
    let mut errors = validate_settings(settings);
    for (i, item) in items.iter().enumerate() {
        validate_line(item, i, &mut errors);
    }
    if !errors.is_empty() {
        return Err(FaturaError::from_validation(&errors));
    }

    let totals = compute(items, settings);
    let inconsistencies = validate_arithmetic(&totals);
    if !inconsistencies.is_empty() {
        let msg = inconsistencies
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(FaturaError::Arithmetic(msg));
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn agg(sub_total: Decimal, vat_rate: Decimal, vat: Decimal) -> AggregatedTotals {
        AggregatedTotals {
            sub_total,
            vat_breakdown: vec![VatBreakdown {
                rate: vat_rate,
                taxable_amount: sub_total,
                vat_amount: vat,
            }],
            line_count: 1,
            ..AggregatedTotals::default()
        }
    }

    #[test]
    fn empty_document_is_zero() {
        let t = finalize(&AggregatedTotals::default(), &DocumentSettings::default());
        assert_eq!(t.grand_total, Decimal::ZERO);
        assert_eq!(t.reporting_currency_total, Decimal::ZERO);
        assert_eq!(t.vat_total, Decimal::ZERO);
    }

    #[test]
    fn purchase_withholding_is_share_of_vat() {
        let t = finalize(
            &agg(dec!(1000), dec!(20), dec!(200)),
            &DocumentSettings::purchase(dec!(50)),
        );
        assert_eq!(t.withholding_tax, dec!(100));
        assert_eq!(t.vat_withholding, Decimal::ZERO);
        assert_eq!(t.grand_total, dec!(1100));
    }

    #[test]
    fn sales_vat_withholding_fraction() {
        let t = finalize(
            &agg(dec!(500), dec!(20), dec!(100)),
            &DocumentSettings::sales(dec!(0), Some(VatWithholding::new(9, 10))),
        );
        assert_eq!(t.vat_withholding, dec!(90));
        assert_eq!(t.grand_total, dec!(510));
    }

    #[test]
    fn sales_stopaj_uses_discounted_subtotal_before_special_taxes() {
        let mut a = agg(dec!(1000), dec!(20), dec!(200));
        a.line_discount_total = dec!(100);
        a.special_tax_totals = vec![SpecialTaxTotal {
            kind: SpecialTaxKind::Excise,
            amount: dec!(90),
        }];
        let mut settings = DocumentSettings::sales(dec!(20), None);
        settings.document_discount = Some(Discount::fixed(dec!(100)));

        let t = finalize(&a, &settings);
        assert_eq!(t.discounted_sub_total, dec!(800));
        assert_eq!(t.withholding_tax, dec!(160));
        // 1000 - 100 - 100 + 90 + 200 - 160
        assert_eq!(t.grand_total, dec!(930));
    }

    #[test]
    fn zero_denominator_withholds_nothing() {
        let t = finalize(
            &agg(dec!(500), dec!(20), dec!(100)),
            &DocumentSettings::sales(dec!(0), Some(VatWithholding::new(9, 0))),
        );
        assert_eq!(t.vat_withholding, Decimal::ZERO);
        assert_eq!(t.grand_total, dec!(600));
    }

    #[test]
    fn percentage_document_discount() {
        let mut a = agg(dec!(1000), dec!(20), dec!(200));
        a.line_discount_total = dec!(200);
        let settings = DocumentSettings {
            document_discount: Some(Discount::percentage(dec!(10))),
            ..DocumentSettings::default()
        };
        let t = finalize(&a, &settings);
        assert_eq!(t.document_discount, dec!(80));
        assert_eq!(t.grand_total, dec!(920));
    }

    #[test]
    fn exchange_rate_only_when_currencies_differ() {
        let a = agg(dec!(100), dec!(0), dec!(0));
        let mut settings = DocumentSettings {
            exchange_rate: dec!(35.5),
            ..DocumentSettings::default()
        };
        let t = finalize(&a, &settings);
        assert_eq!(t.exchange_rate, Decimal::ONE);
        assert_eq!(t.reporting_currency_total, dec!(100));

        settings.currency_code = "USD".into();
        let t = finalize(&a, &settings);
        assert_eq!(t.exchange_rate, dec!(35.5));
        assert_eq!(t.reporting_currency_total, dec!(3550));
    }

    #[test]
    fn checked_rejects_bad_settings() {
        let settings = DocumentSettings {
            currency_code: "XX".into(),
            ..DocumentSettings::default()
        };
        let err = compute_checked(&[], &settings).unwrap_err();
        assert!(matches!(err, FaturaError::Validation(_)));
    }
}
