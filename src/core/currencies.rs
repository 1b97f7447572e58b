//! ISO 4217 currency lookup.
//!
//! Covers the currencies an invoice is commonly issued or reported in,
//! together with the number of minor-unit digits used when rounding
//! totals for display.

/// Check whether `code` is a known ISO 4217 currency code. Case is ignored.
pub fn is_known_currency_code(code: &str) -> bool {
    lookup(code).is_some()
}

/// Minor-unit digits for `code` (2 for TRY, 0 for JPY, 3 for KWD).
/// Unknown codes fall back to 2.
pub fn minor_units(code: &str) -> u32 {
    lookup(code).unwrap_or(2)
}

fn lookup(code: &str) -> Option<u32> {
    let code = code.trim().to_ascii_uppercase();
    CURRENCIES
        .binary_search_by(|(c, _)| (*c).cmp(code.as_str()))
        .ok()
        .map(|i| CURRENCIES[i].1)
}

/// (code, minor units), sorted by code for binary search.
static CURRENCIES: &[(&str, u32)] = &[
    ("AED", 2), // UAE Dirham
    ("AUD", 2), // Australian Dollar
    ("AZN", 2), // Azerbaijani Manat
    ("BGN", 2), // Bulgarian Lev
    ("BHD", 3), // Bahraini Dinar
    ("CAD", 2), // Canadian Dollar
    ("CHF", 2), // Swiss Franc
    ("CNY", 2), // Chinese Yuan
    ("CZK", 2), // Czech Koruna
    ("DKK", 2), // Danish Krone
    ("EGP", 2), // Egyptian Pound
    ("EUR", 2), // Euro
    ("GBP", 2), // Pound Sterling
    ("GEL", 2), // Georgian Lari
    ("HUF", 2), // Hungarian Forint
    ("IQD", 3), // Iraqi Dinar
    ("JOD", 3), // Jordanian Dinar
    ("JPY", 0), // Japanese Yen
    ("KRW", 0), // South Korean Won
    ("KWD", 3), // Kuwaiti Dinar
    ("KZT", 2), // Kazakhstani Tenge
    ("LYD", 3), // Libyan Dinar
    ("NOK", 2), // Norwegian Krone
    ("OMR", 3), // Omani Rial
    ("PLN", 2), // Polish Zloty
    ("QAR", 2), // Qatari Riyal
    ("RON", 2), // Romanian Leu
    ("RUB", 2), // Russian Ruble
    ("SAR", 2), // Saudi Riyal
    ("SEK", 2), // Swedish Krona
    ("TND", 3), // Tunisian Dinar
    ("TRY", 2), // Turkish Lira
    ("UAH", 2), // Ukrainian Hryvnia
    ("USD", 2), // US Dollar
    ("VND", 0), // Vietnamese Dong
];
