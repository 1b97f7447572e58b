//! Invoice totals pipeline: line totals, aggregation, document adjustments.
//!
//! Every stage is a pure function over plain values. Nothing is cached and
//! nothing fails: malformed numbers are coerced to zero on the way in, and a
//! figure that overflows `Decimal` is zero as well.

mod aggregate;
mod builder;
mod checked;
pub mod currencies;
mod error;
mod finalize;
pub mod input;
mod line;
mod rounding;
mod types;
mod validation;
pub mod withholding;

pub use aggregate::*;
pub use builder::*;
pub use error::*;
pub use finalize::*;
pub use input::{decimal_from_f64, parse_decimal};
pub use line::*;
pub use rounding::round_half_up;
pub use types::*;
pub use validation::*;
pub use withholding::{WithholdingCode, withholding_code};
