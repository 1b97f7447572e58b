use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::checked;
use super::line::calculate_line;
use super::types::*;

/// Sum line figures into subtotal, line discounts, special taxes per kind and
/// VAT per rate.
///
/// An empty slice yields [`AggregatedTotals::default()`].
pub fn aggregate(items: &[LineItem]) -> AggregatedTotals {
    let mut sub_total = Decimal::ZERO;
    let mut line_discount_total = Decimal::ZERO;
    let mut special: BTreeMap<SpecialTaxKind, Decimal> = BTreeMap::new();
    // rate -> (taxable, vat)
    let mut vat_groups: BTreeMap<Decimal, (Decimal, Decimal)> = BTreeMap::new();

    for item in items {
        let line = calculate_line(item);
        sub_total = checked::add(sub_total, line.base);
        line_discount_total = checked::add(line_discount_total, line.discount);

        for tax in &line.special_taxes {
            let total = special.entry(tax.kind).or_insert(Decimal::ZERO);
            *total = checked::add(*total, tax.amount);
        }

        if !item.vat_exempt {
            let group = vat_groups
                .entry(line.vat_rate)
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            group.0 = checked::add(group.0, line.vat_base);
            group.1 = checked::add(group.1, line.vat);
        }
    }

    let special_tax_totals = special
        .into_iter()
        .map(|(kind, amount)| SpecialTaxTotal { kind, amount })
        .collect();

    let vat_breakdown = vat_groups
        .into_iter()
        .map(|(rate, (taxable_amount, vat_amount))| VatBreakdown {
            rate,
            taxable_amount,
            vat_amount,
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        lines = items.len(),
        %sub_total,
        %line_discount_total,
        vat_rates = vat_breakdown.len(),
        "aggregated invoice lines"
    );

    AggregatedTotals {
        sub_total,
        line_discount_total,
        special_tax_totals,
        vat_breakdown,
        line_count: items.len(),
    }
}
