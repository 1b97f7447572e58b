//! JSON loading of document settings and line items.
//!
//! Numeric fields are read leniently: numbers, numeric strings (with `.` or
//! `,` decimals), `null` and garbage are all accepted, the latter two as 0.
//! Structural problems (wrong JSON shape, unknown withholding type) are
//! reported as [`FaturaError::Config`].
//!
//! # Example
//!
//! ```
//! use fatura::config::invoice_from_json;
//! use fatura::core::*;
//! use rust_decimal_macros::dec;
//!
//! let input = invoice_from_json(r#"{
//!     "settings": { "withholding": { "type": "purchase", "percentage": 50 } },
//!     "items": [ { "quantity": "2", "unit_price": 100, "vat_rate": 20 } ]
//! }"#).unwrap();
//!
//! let totals = input.compute();
//! assert_eq!(totals.withholding_tax, dec!(20));
//! assert_eq!(totals.grand_total, dec!(220));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{DocumentSettings, DocumentTotals, FaturaError, LineItem, compute};

/// Settings and lines of one invoice form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceInput {
    pub settings: DocumentSettings,
    pub items: Vec<LineItem>,
}

impl InvoiceInput {
    /// Run the totals pipeline over this input.
    pub fn compute(&self) -> DocumentTotals {
        compute(&self.items, &self.settings)
    }
}

/// Parse document settings; missing fields take their defaults.
pub fn settings_from_json(json: &str) -> Result<DocumentSettings, FaturaError> {
    serde_json::from_str(json).map_err(|e| config_error("settings", e))
}

/// Parse a JSON array of line items.
pub fn items_from_json(json: &str) -> Result<Vec<LineItem>, FaturaError> {
    serde_json::from_str(json).map_err(|e| config_error("items", e))
}

/// Parse `{ "settings": ..., "items": [...] }`.
pub fn invoice_from_json(json: &str) -> Result<InvoiceInput, FaturaError> {
    let input: InvoiceInput =
        serde_json::from_str(json).map_err(|e| config_error("invoice", e))?;
    tracing::debug!(
        lines = input.items.len(),
        currency = %input.settings.currency_code,
        "loaded invoice input"
    );
    Ok(input)
}

/// Serialize totals as pretty JSON. Amounts are written as strings so no
/// precision is lost.
pub fn totals_to_json(totals: &DocumentTotals) -> Result<String, FaturaError> {
    serde_json::to_string_pretty(totals).map_err(|e| config_error("totals", e))
}

fn config_error(what: &str, err: serde_json::Error) -> FaturaError {
    tracing::warn!(what, error = %err, "failed to process JSON");
    FaturaError::Config(format!("{what}: {err}"))
}
