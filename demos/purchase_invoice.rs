use fatura::core::*;
use rust_decimal_macros::dec;

fn main() {
    // Fuel purchase with ÖTV, plus a service line
    let items = vec![
        LineItemBuilder::new(dec!(400), dec!(28.75))
            .excise(dec!(12))
            .vat(dec!(20))
            .build(),
        LineItemBuilder::new(dec!(1), dec!(1500))
            .discount_percentage(dec!(10))
            .vat(dec!(20))
            .build(),
    ];

    let settings = DocumentSettingsBuilder::new("TRY")
        .purchase_withholding(dec!(20))
        .build()
        .expect("valid settings");

    for (i, item) in items.iter().enumerate() {
        let line = calculate_line(item);
        println!(
            "line {}: base {:.2}, discount {:.2}, VAT {:.2}, total {:.2}",
            i + 1,
            line.base,
            line.discount,
            line.vat,
            line.total
        );
    }

    let totals = compute(&items, &settings);
    println!("\n{}", totals.rounded_to_currency());

    let errors = validate_arithmetic(&totals);
    assert!(errors.is_empty());
}
