//! Common types used by liblongdiv.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Describes the character span of a substring in a conversion input.
///
/// For example, in "0.1(6)", the repeating block "6" has the span (4, 5).
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub struct Span {
    /// Inclusive lower bound index of the span
    pub lo: usize,
    /// Exclusive upper bound index of the span
    pub hi: usize,
}

impl Span {
    /// The smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Self {
        Self {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lo >= self.hi
    }
}

impl From<(usize, usize)> for Span {
    fn from(span: (usize, usize)) -> Self {
        Self {
            lo: span.0,
            hi: span.1,
        }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(span: std::ops::Range<usize>) -> Self {
        Self {
            lo: span.start,
            hi: span.end,
        }
    }
}

impl From<Span> for (usize, usize) {
    fn from(span: Span) -> Self {
        (span.lo, span.hi)
    }
}
