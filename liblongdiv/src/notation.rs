//! The canonical structure of a written decimal.

mod infer;
pub(crate) use infer::infer_cycle;

use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A decimal split into its sign, integer part, non-repeating fractional digits and repeating
/// fractional digits.
///
/// ```text
/// -12.3(45)
/// ^ ^^ ^ ^^- repeating
/// |  | `- non_repeating
/// |  `- integer_part
/// `- is_negative
/// ```
///
/// An empty `repeating` block means the decimal terminates.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DecimalNotation {
    pub is_negative: bool,
    /// Digits of the integer part, without redundant leading zeros.
    pub integer_part: String,
    pub non_repeating: String,
    pub repeating: String,
}

impl DecimalNotation {
    /// Creates a notation from its parts. Leading zeros of the integer part are dropped.
    ///
    /// All parts must consist of ASCII digits.
    pub fn new<I, N, R>(is_negative: bool, integer_part: I, non_repeating: N, repeating: R) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        R: Into<String>,
    {
        let integer_part = integer_part.into();
        let trimmed = integer_part.trim_start_matches('0');
        Self {
            is_negative,
            integer_part: if trimmed.is_empty() {
                "0".to_owned()
            } else {
                trimmed.to_owned()
            },
            non_repeating: non_repeating.into(),
            repeating: repeating.into(),
        }
    }

    /// Whether the decimal terminates.
    pub fn is_terminating(&self) -> bool {
        self.repeating.is_empty()
    }

    /// Drops a repeating block made only of zeros. `0.5(0)` is `0.5`.
    pub fn normalize(mut self) -> Self {
        if self.repeating.bytes().all(|b| b == b'0') {
            self.repeating.clear();
        }
        self
    }

    /// Rewrites the repeating block in its canonical form: the shortest period, started as early
    /// as possible. `0.166(66)` becomes `0.1(6)`, and `0.1(21)` becomes `0.(12)`.
    ///
    /// The value of the decimal is unchanged.
    pub fn canonicalize(self) -> Self {
        let mut notation = self.normalize();
        if notation.repeating.is_empty() {
            return notation;
        }

        let period = minimal_period(&notation.repeating);
        notation.repeating.truncate(period);

        // While the digit before the cycle equals the cycle's last digit, the cycle can start one
        // digit earlier.
        loop {
            match (
                notation.non_repeating.chars().last(),
                notation.repeating.chars().last(),
            ) {
                (Some(before), Some(last)) if before == last => {
                    notation.non_repeating.pop();
                    notation.repeating.pop();
                    notation.repeating.insert(0, last);
                }
                _ => break,
            }
        }
        notation
    }

    /// All fractional digits shown when the repeating block is written out once.
    pub(crate) fn written_digits(&self) -> String {
        format!("{}{}", self.non_repeating, self.repeating)
    }
}

/// Length of the shortest block `p` such that `digits` is `p` repeated.
fn minimal_period(digits: &str) -> usize {
    let bytes = digits.as_bytes();
    let len = bytes.len();
    (1..=len)
        .filter(|p| len % p == 0)
        .find(|&p| bytes.chunks(p).all(|chunk| chunk == &bytes[..p]))
        .unwrap_or(len)
}

/// Emits the parenthesized form, like `-0.1(6)`.
impl fmt::Display for DecimalNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.integer_part)?;
        if !self.non_repeating.is_empty() || !self.repeating.is_empty() {
            write!(f, ".{}", self.non_repeating)?;
        }
        if !self.repeating.is_empty() {
            write!(f, "({})", self.repeating)?;
        }
        Ok(())
    }
}
