use crate::common::Span;
use crate::errors::Result;
use crate::math::{digits_value, pow10, Fraction};

use core::fmt;
use num_bigint::BigInt;
use num_traits::Signed;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A written decimal operand of a long division, like `1.5`.
///
/// Unlike a [DecimalNotation](crate::DecimalNotation), an operand has no repeating block, and its
/// fractional digits are kept exactly as written; `1.50` has two fractional digits, which matters
/// for where the quotient point falls.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Operand {
    pub is_negative: bool,
    /// Digits before the point, without redundant leading zeros. Never empty.
    pub integer_digits: String,
    /// Digits after the point, as written.
    pub fraction_digits: String,
    /// Where the operand was written in its input.
    pub span: Span,
}

impl Operand {
    /// Creates an operand from its written parts. An empty integer part is read as `0`, so `.5`
    /// is `0.5`.
    pub fn new<I, F, S>(is_negative: bool, integer_digits: I, fraction_digits: F, span: S) -> Self
    where
        I: Into<String>,
        F: Into<String>,
        S: Into<Span>,
    {
        let integer_digits = integer_digits.into();
        let trimmed = integer_digits.trim_start_matches('0');
        Self {
            is_negative,
            integer_digits: if trimmed.is_empty() {
                "0".to_owned()
            } else {
                trimmed.to_owned()
            },
            fraction_digits: fraction_digits.into(),
            span: span.into(),
        }
    }

    /// Parses an operand like `1.5`, `.5` or `12.`.
    pub fn parse(input: &str) -> Result<Self> {
        crate::parser::parse_operand(input)
    }

    /// Creates an integer operand.
    pub fn integer<N: Into<BigInt>>(n: N) -> Self {
        let n = n.into();
        let is_negative = n.is_negative();
        let digits = n.magnitude().to_string();
        let len = digits.len() + usize::from(is_negative);
        Self::new(is_negative, digits, "", 0..len)
    }

    pub fn is_zero(&self) -> bool {
        self.integer_digits
            .bytes()
            .chain(self.fraction_digits.bytes())
            .all(|b| b == b'0')
    }

    /// Number of digits after the point.
    pub fn fraction_len(&self) -> usize {
        self.fraction_digits.len()
    }

    /// The magnitude of the operand times `10^places`, as an integer.
    ///
    /// `places` must be at least [fraction_len](Self::fraction_len).
    pub(crate) fn scaled_magnitude(&self, places: usize) -> BigInt {
        let digits = format!("{}{}", self.integer_digits, self.fraction_digits);
        digits_value(&digits) * pow10(places.saturating_sub(self.fraction_len()))
    }

    /// The exact value of the operand, like `150/100` for `1.50`.
    pub fn to_fraction(&self) -> Fraction {
        let places = self.fraction_len();
        let magnitude = self.scaled_magnitude(places);
        let numerator = if self.is_negative {
            -magnitude
        } else {
            magnitude
        };
        // 10^places is never zero.
        Fraction::new(numerator, pow10(places)).unwrap_or_else(|_| Fraction::whole(0))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.integer_digits)?;
        if !self.fraction_digits.is_empty() {
            write!(f, ".{}", self.fraction_digits)?;
        }
        Ok(())
    }
}
