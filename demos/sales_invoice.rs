use fatura::config::{invoice_from_json, totals_to_json};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("fatura=debug"))
        .init();

    // Hotel stay billed in EUR, reported in TRY
    let json = r#"{
        "settings": {
            "currency_code": "EUR",
            "reporting_currency_code": "TRY",
            "exchange_rate": "35,4210",
            "exchange_rate_date": "2024-06-14",
            "withholding": {
                "type": "sales",
                "stopaj_percentage": 0,
                "vat_withholding": { "numerator": 5, "denominator": 10 }
            }
        },
        "items": [
            { "quantity": 3, "unit_price": "120.00", "vat_rate": 10,
              "special_taxes": [ { "kind": "Accommodation", "rate": 2 } ] },
            { "quantity": 1, "unit_price": 45, "vat_rate": 20,
              "discount": { "value": 5, "is_percentage": false } }
        ]
    }"#;

    let input = match invoice_from_json(json) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let totals = input.compute().rounded_to_currency();
    println!("{totals}\n");
    match totals_to_json(&totals) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("{e}"),
    }
}
