//! Conversions between fractions and decimals.

mod dec2frac;
mod frac2dec;

pub use dec2frac::*;
pub use frac2dec::*;
