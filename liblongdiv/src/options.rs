//! Options controlling a conversion.

use crate::trace::TraceOptions;

/// Default number of fractional digits generated before a decimal expansion is declared
/// truncated.
pub const DEFAULT_MAX_DIGITS: usize = 150;
/// Default number of characters the repeating block is tiled over in an ellipsis rendering.
pub const DEFAULT_ELLIPSIS_WIDTH: usize = 12;
/// Default number of fractional digits a long division quotient is rounded to.
pub const DEFAULT_DECIMAL_PLACES: usize = 2;
/// Default cap on the steps of a long division.
pub const DEFAULT_MAX_STEPS: usize = 256;

/// Options for [convert](crate::convert()) and [evaluate](crate::evaluate).
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct ConversionOptions {
    pub max_digits: usize,
    pub ellipsis_width: usize,
    pub decimal_places: usize,
    pub max_steps: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            max_digits: DEFAULT_MAX_DIGITS,
            ellipsis_width: DEFAULT_ELLIPSIS_WIDTH,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl ConversionOptions {
    pub fn max_digits(mut self, max_digits: usize) -> Self {
        self.max_digits = max_digits;
        self
    }

    pub fn ellipsis_width(mut self, ellipsis_width: usize) -> Self {
        self.ellipsis_width = ellipsis_width;
        self
    }

    pub fn decimal_places(mut self, decimal_places: usize) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// The options of a long division rounded to `decimal_places` fractional digits.
    pub(crate) fn trace_options(&self, decimal_places: usize) -> TraceOptions {
        TraceOptions {
            decimal_places,
            max_steps: self.max_steps,
        }
    }
}
