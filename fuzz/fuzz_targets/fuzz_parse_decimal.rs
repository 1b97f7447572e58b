#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Any text must parse to some value without panicking.
        let _ = fatura::parse_decimal(s);
    }
});
