//! Exact integer arithmetic shared by the converters.
//!
//! Everything here works on [BigInt](num_bigint::BigInt)s; no conversion goes through floating
//! point, so results are exact for operands of any size.

mod gcd;
pub use gcd::*;

mod fraction;
pub use fraction::*;

use num_bigint::BigInt;

/// Returns `10^exp`.
pub(crate) fn pow10(exp: usize) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exp)
}

/// Parses a string of ASCII digits as an integer. The empty string is 0.
pub(crate) fn digits_value(digits: &str) -> BigInt {
    digits.bytes().fold(BigInt::from(0u32), |acc, b| {
        acc * 10u32 + u32::from(b - b'0')
    })
}
