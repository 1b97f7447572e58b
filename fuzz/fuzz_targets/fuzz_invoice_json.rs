#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Loading may fail; computing totals for anything that loaded must not panic.
        if let Ok(input) = fatura::config::invoice_from_json(s) {
            let _ = fatura::validate_settings(&input.settings);
            let totals = input.compute();
            assert!(fatura::validate_arithmetic(&totals).is_empty());
            let _ = fatura::compute_checked(&input.items, &input.settings);
            let _ = totals.rounded_to_currency().to_string();
        }
    }
});
