use super::simplify;
use crate::errors::{ConversionError, Result};

use core::fmt;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

#[cfg(feature = "serde")]
use serde::Serialize;

/// An exact fraction `numerator / denominator`.
///
/// The denominator is always positive; the sign of the fraction lives on the numerator. Fractions
/// are not reduced on construction. Intermediate fractions of a derivation (like `50/100` for
/// `0.50`) are meaningful to show, so reducing is left to [Fraction::simplify].
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub struct Fraction {
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
    numerator: BigInt,
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
    denominator: BigInt,
}

impl Fraction {
    /// Creates the fraction `n / d`, moving the sign of `d` onto `n`.
    pub fn new<N, D>(n: N, d: D) -> Result<Self>
    where
        N: Into<BigInt>,
        D: Into<BigInt>,
    {
        let (mut numerator, mut denominator) = (n.into(), d.into());
        if denominator.is_zero() {
            return Err(ConversionError::DivisionByZero);
        }
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Creates the whole number `n / 1`.
    pub fn whole<N: Into<BigInt>>(n: N) -> Self {
        Self {
            numerator: n.into(),
            denominator: BigInt::one(),
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Reduces the fraction to lowest terms.
    pub fn simplify(&self) -> Self {
        // The denominator is nonzero, so simplification cannot fail.
        match simplify(&self.numerator, &self.denominator) {
            Ok((numerator, denominator)) => Self {
                numerator,
                denominator,
            },
            Err(_) => self.clone(),
        }
    }

    /// Whether the fraction is in lowest terms.
    pub fn is_simplified(&self) -> bool {
        super::gcd(&self.numerator, &self.denominator).is_one()
            || (self.numerator.is_zero() && self.denominator.is_one())
    }

    /// Whether `self` and `other` denote the same rational number.
    pub fn same_value(&self, other: &Fraction) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
