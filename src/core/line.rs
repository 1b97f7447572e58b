use rust_decimal::Decimal;

use super::checked;
use super::types::*;

/// Compute every figure of a single line.
///
/// Special taxes are applied in kind order (excise, communication,
/// accommodation), each on the running amount including the taxes before
/// it. VAT is applied last on that running amount.
pub fn calculate_line(item: &LineItem) -> LineBreakdown {
    let base = checked::mul(item.quantity, item.unit_price);
    let discount = item
        .discount
        .map(|d| d.amount_of(base))
        .unwrap_or(Decimal::ZERO);
    let after_discount = checked::sub(base, discount);

    let mut running = after_discount;
    let mut special_taxes = Vec::with_capacity(item.special_taxes.len());
    for tax in item.sorted_special_taxes() {
        let amount = checked::percent_of(running, tax.rate);
        special_taxes.push(SpecialTaxAmount {
            kind: tax.kind,
            rate: tax.rate,
            base: running,
            amount,
        });
        running = checked::add(running, amount);
    }

    let vat_rate = if item.vat_exempt {
        Decimal::ZERO
    } else {
        item.vat_rate
    };
    let vat = checked::percent_of(running, vat_rate);

    LineBreakdown {
        base,
        discount,
        after_discount,
        special_taxes,
        vat_base: running,
        vat_rate,
        vat,
        total: checked::add(running, vat),
    }
}

/// Line total including discount, special taxes and VAT.
pub fn calculate_item_total(item: &LineItem) -> Decimal {
    calculate_line(item).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(qty: Decimal, price: Decimal, vat: Decimal) -> LineItem {
        LineItem {
            quantity: qty,
            unit_price: price,
            vat_rate: vat,
            ..LineItem::default()
        }
    }

    #[test]
    fn plain_line_is_quantity_times_price() {
        assert_eq!(calculate_item_total(&item(dec!(3), dec!(12.5), dec!(0))), dec!(37.5));
    }

    #[test]
    fn percentage_discount_then_vat() {
        let mut it = item(dec!(2), dec!(100), dec!(18));
        it.discount = Some(Discount::percentage(dec!(10)));
        let b = calculate_line(&it);
        assert_eq!(b.base, dec!(200));
        assert_eq!(b.discount, dec!(20));
        assert_eq!(b.after_discount, dec!(180));
        assert_eq!(b.vat, dec!(32.4));
        assert_eq!(b.total, dec!(212.4));
    }

    #[test]
    fn fixed_discount_is_absolute() {
        let mut it = item(dec!(4), dec!(25), dec!(20));
        it.discount = Some(Discount::fixed(dec!(10)));
        let b = calculate_line(&it);
        assert_eq!(b.discount, dec!(10));
        assert_eq!(b.after_discount, dec!(90));
        assert_eq!(b.vat, dec!(18));
        assert_eq!(b.total, dec!(108));
    }

    #[test]
    fn special_taxes_cascade_before_vat() {
        let mut it = item(dec!(1), dec!(1000), dec!(20));
        it.special_taxes = vec![
            SpecialTax::new(SpecialTaxKind::Excise, dec!(10)),
            SpecialTax::new(SpecialTaxKind::Communication, dec!(10)),
        ];
        let b = calculate_line(&it);
        assert_eq!(b.special_taxes[0].base, dec!(1000));
        assert_eq!(b.special_taxes[0].amount, dec!(100));
        assert_eq!(b.special_taxes[1].base, dec!(1100));
        assert_eq!(b.special_taxes[1].amount, dec!(110));
        assert_eq!(b.vat_base, dec!(1210));
        assert_eq!(b.vat, dec!(242));
        assert_eq!(b.total, dec!(1452));
    }

    #[test]
    fn special_taxes_applied_in_kind_order() {
        let mut it = item(dec!(1), dec!(100), dec!(0));
        it.special_taxes = vec![
            SpecialTax::new(SpecialTaxKind::Accommodation, dec!(2)),
            SpecialTax::new(SpecialTaxKind::Excise, dec!(50)),
        ];
        let b = calculate_line(&it);
        assert_eq!(b.special_taxes[0].kind, SpecialTaxKind::Excise);
        assert_eq!(b.special_taxes[0].amount, dec!(50));
        // accommodation on 150, not on 100
        assert_eq!(b.special_taxes[1].amount, dec!(3));
        assert_eq!(b.total, dec!(153));
    }

    #[test]
    fn exempt_line_has_no_vat() {
        let mut it = item(dec!(1), dec!(100), dec!(18));
        it.vat_exempt = true;
        let b = calculate_line(&it);
        assert_eq!(b.vat_rate, Decimal::ZERO);
        assert_eq!(b.vat, Decimal::ZERO);
        assert_eq!(b.total, dec!(100));
    }

    #[test]
    fn full_discount_zeroes_line() {
        let mut it = item(dec!(5), dec!(40), dec!(20));
        it.discount = Some(Discount::percentage(dec!(100)));
        it.special_taxes = vec![SpecialTax::new(SpecialTaxKind::Excise, dec!(25))];
        let b = calculate_line(&it);
        assert_eq!(b.after_discount, Decimal::ZERO);
        assert_eq!(b.vat, Decimal::ZERO);
        assert_eq!(b.total, Decimal::ZERO);
    }

    #[test]
    fn negative_quantity_is_computed_not_rejected() {
        let b = calculate_line(&item(dec!(-1), dec!(50), dec!(20)));
        assert_eq!(b.total, dec!(-60));
    }
}
