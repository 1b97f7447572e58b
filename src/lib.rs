//! # fatura
//!
//! Invoice totals for purchase and sales invoices: line discounts, cascaded
//! special taxes (ÖTV, ÖİV, accommodation tax), VAT per rate, document
//! discount, withholding (stopaj) and VAT withholding (tevkifat), and a
//! reporting-currency total.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! The pipeline is three pure stages: [`calculate_line`] per line,
//! [`aggregate`] over lines, [`finalize`] with document settings.
//! [`compute`] runs all three.
//!
//! ## Quick Start
//!
//! ```rust
//! use fatura::core::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItemBuilder::new(dec!(2), dec!(100))
//!         .discount_percentage(dec!(10))
//!         .vat(dec!(18))
//!         .build(),
//! ];
//! let settings = DocumentSettings::sales(dec!(0), Some(VatWithholding::new(5, 10)));
//!
//! let totals = compute(&items, &settings);
//! assert_eq!(totals.vat_total, dec!(32.4));
//! assert_eq!(totals.vat_withholding, dec!(16.2));
//! assert_eq!(totals.grand_total, dec!(196.2));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, totals pipeline, validation, withholding codes |
//! | `json` | Lenient JSON loading of settings and line items |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "json")]
pub mod config;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
