use crate::errors::{ConversionError, Result};

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Calculates the GCD for (u, v) ∈ (Z, Z), on the absolute values of `u` and `v`.
///
/// `gcd(u, 0) = |u|`; `gcd(0, 0)` is returned as 0, and callers that need a divisor must reject
/// it (see [simplify]).
pub fn gcd(u: &BigInt, v: &BigInt) -> BigInt {
    euclidean_gcd(u.abs(), v.abs())
}

/// The [Euclidean GCD] algorithm.
///
/// [Euclidean GCD]: https://en.wikipedia.org/wiki/Euclidean_algorithm
fn euclidean_gcd(mut u: BigInt, mut v: BigInt) -> BigInt {
    while !v.is_zero() {
        let t = &u % &v;
        u = v;
        v = t;
    }
    u
}

#[cfg(feature = "benchmark-internals")]
pub fn _euclidean_gcd(u: &BigInt, v: &BigInt) -> BigInt {
    euclidean_gcd(u.clone(), v.clone())
}

/// Reduces `n / d` to lowest terms.
///
/// The returned denominator is always positive; the sign of the fraction is folded into the
/// numerator. A zero numerator reduces to `0 / 1`.
///
/// ## Failure
///
/// - `simplify(0, 0)` is undefined and fails with [InvalidArgument](ConversionError::InvalidArgument).
/// - Any other zero denominator fails with [DivisionByZero](ConversionError::DivisionByZero).
pub fn simplify(n: &BigInt, d: &BigInt) -> Result<(BigInt, BigInt)> {
    if n.is_zero() && d.is_zero() {
        return Err(ConversionError::InvalidArgument(
            "gcd(0, 0) is undefined".to_owned(),
        ));
    }
    if d.is_zero() {
        return Err(ConversionError::DivisionByZero);
    }
    if n.is_zero() {
        return Ok((BigInt::zero(), BigInt::one()));
    }

    let g = gcd(n, d);
    let (mut n, mut d) = (n / &g, d / &g);
    if d.is_negative() {
        n = -n;
        d = -d;
    }
    Ok((n, d))
}
