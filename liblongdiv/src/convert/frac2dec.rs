use crate::errors::{ConversionError, Result};
use crate::math::Fraction;
use crate::notation::DecimalNotation;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The decimal expansion of a fraction.
///
/// ```text
/// -12.3(45)
/// ^ ^^ ^ ^^- repeating
/// |  | `- non_repeating
/// |  `- integer_part
/// `- is_negative
/// ```
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DecimalExpansion {
    pub is_negative: bool,
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
    pub integer_part: BigInt,
    /// Fractional digits before the repeating block. For a truncated expansion, all digits that
    /// were generated.
    pub non_repeating: String,
    pub repeating: String,
    /// Whether the digit budget ran out before the expansion terminated or repeated. The digits
    /// generated are correct, but more follow.
    pub truncated: bool,
}

/// Computes the decimal expansion of `n / d` by long division, generating at most `max_digits`
/// fractional digits.
///
/// ## Algorithm
///
/// The integer part is `|n| / |d|`. Each fractional digit comes from the remainder `r` of the
/// previous step: `r *= 10; digit = r / |d|; r %= |d|`. Since the next digit depends only on the
/// remainder, a remainder seen before means the digits generated since then repeat forever:
///
/// ```text
/// 1/6:  r = 1 -> 10 / 6 = 1 r 4
///       r = 4 -> 40 / 6 = 6 r 4   <- 4 was seen at digit 1, so digit 1.. repeats
///       0.1(6)
/// ```
///
/// The expansion ends when the remainder is 0 (terminating), recurs (repeating), or `max_digits`
/// digits were generated without either (truncated).
///
/// A repeating block of 9s is kept as generated; it is an artifact of base-10 division, not
/// something to round away.
///
/// ## Failure
///
/// Fails with [DivisionByZero](ConversionError::DivisionByZero) if `d` is 0.
pub fn to_decimal<N, D>(n: N, d: D, max_digits: usize) -> Result<DecimalExpansion>
where
    N: Into<BigInt>,
    D: Into<BigInt>,
{
    let (n, d) = (n.into(), d.into());
    if d.is_zero() {
        return Err(ConversionError::DivisionByZero);
    }
    let is_negative = !n.is_zero() && (n.is_negative() ^ d.is_negative());
    let (n, d) = (n.abs(), d.abs());

    let (integer_part, mut remainder) = n.div_rem(&d);

    let mut seen = HashMap::<BigInt, usize>::new();
    let mut digits = String::new();
    let mut cycle_start = None;
    while !remainder.is_zero() {
        if let Some(&idx) = seen.get(&remainder) {
            cycle_start = Some(idx);
            break;
        }
        if digits.len() == max_digits {
            break;
        }
        seen.insert(remainder.clone(), digits.len());

        let (digit, rem) = (remainder * 10u32).div_rem(&d);
        digits.push(to_digit(&digit));
        remainder = rem;
    }

    let (non_repeating, repeating, truncated) = match cycle_start {
        Some(idx) => {
            let repeating = digits.split_off(idx);
            (digits, repeating, false)
        }
        None => {
            let truncated = !remainder.is_zero();
            (digits, String::new(), truncated)
        }
    };

    Ok(DecimalExpansion {
        is_negative,
        integer_part,
        non_repeating,
        repeating,
        truncated,
    })
}

fn to_digit(n: &BigInt) -> char {
    // A quotient digit of `10 * r / d` with `r < d` is always below 10.
    n.to_u32()
        .and_then(|n| std::char::from_digit(n, 10))
        .unwrap_or('?')
}

impl DecimalExpansion {
    /// Expands a [Fraction].
    pub fn of(fraction: &Fraction, max_digits: usize) -> Result<Self> {
        to_decimal(
            fraction.numerator().clone(),
            fraction.denominator().clone(),
            max_digits,
        )
    }

    /// The expansion as a [DecimalNotation]. A truncated expansion becomes the terminating
    /// decimal of its generated digits.
    pub fn to_notation(&self) -> DecimalNotation {
        DecimalNotation::new(
            self.is_negative,
            self.integer_part.to_string(),
            self.non_repeating.clone(),
            self.repeating.clone(),
        )
    }

    /// Whether the expansion has a repeating block.
    pub fn is_repeating(&self) -> bool {
        !self.repeating.is_empty()
    }

    /// Whether the expansion has no fractional digits at all.
    pub fn is_integer(&self) -> bool {
        self.non_repeating.is_empty() && self.repeating.is_empty()
    }

    /// The fractional digits in the order they were generated, with the repeating block written
    /// out once.
    pub fn plain_digits(&self) -> String {
        format!("{}{}", self.non_repeating, self.repeating)
    }

    /// The first `len` fractional digits of the infinite expansion. Terminating expansions are
    /// padded with zeros; truncated expansions stop at the digits generated.
    pub fn leading_digits(&self, len: usize) -> String {
        let mut digits = self.non_repeating.clone();
        if self.is_repeating() {
            while digits.len() < len {
                digits.push_str(&self.repeating);
            }
        } else if !self.truncated {
            digits = crate::utils::pad_zeros(&digits, len);
        }
        digits.truncate(len);
        digits
    }

    fn sign_and_integer(&self) -> String {
        format!(
            "{}{}",
            if self.is_negative { "-" } else { "" },
            self.integer_part
        )
    }

    /// Renders the expansion with the repeating block in parentheses, like `0.1(6)`.
    pub fn pretty(&self) -> String {
        let mut out = self.sign_and_integer();
        if self.is_integer() {
            return out;
        }
        out.push('.');
        out.push_str(&self.non_repeating);
        if self.is_repeating() {
            out.push('(');
            out.push_str(&self.repeating);
            out.push(')');
        }
        out
    }

    /// Renders the expansion with the repeating block tiled over exactly `width` digits, followed
    /// by `...`, like `0.1666666666666...` for a width of 12.
    ///
    /// Terminating expansions render like [pretty](Self::pretty); truncated expansions render
    /// their digits followed by `...`. At least one repeating digit is always shown, so a width of
    /// 0 renders like a width of 1.
    pub fn ellipsis(&self, width: usize) -> String {
        if self.truncated {
            return format!("{}...", self.pretty());
        }
        if !self.is_repeating() {
            return self.pretty();
        }

        let width = width.max(1);
        let tiles = (width + self.repeating.len() - 1) / self.repeating.len();
        let mut cycle = self.repeating.repeat(tiles);
        cycle.truncate(width);
        format!(
            "{}.{}{}...",
            self.sign_and_integer(),
            self.non_repeating,
            cycle
        )
    }
}

/// Renders `n / d` as a percentage with two decimal places, like `33.33%`.
///
/// The value is computed exactly and rounded half away from zero.
pub fn percentage<N, D>(n: N, d: D) -> Result<String>
where
    N: Into<BigInt>,
    D: Into<BigInt>,
{
    let (n, d) = (n.into(), d.into());
    if d.is_zero() {
        return Err(ConversionError::DivisionByZero);
    }
    let is_negative = n.is_negative() ^ d.is_negative();
    let (n, d) = (n.abs(), d.abs());

    // Hundredths of a percent.
    let (mut hundredths, rem) = (n * 10_000u32).div_rem(&d);
    if rem * 2u32 >= d {
        hundredths += 1u32;
    }

    let (whole, frac) = hundredths.div_rem(&BigInt::from(100u32));
    let sign = if is_negative && !hundredths.is_zero() {
        "-"
    } else {
        ""
    };
    Ok(format!("{}{}.{:0>2}%", sign, whole, frac))
}
