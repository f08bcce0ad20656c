//! Digit-by-digit replay of a long division, for step-by-step presentation.
//!
//! A [LongDivisionTrace] is computed once and never changes. Callers that step through it keep
//! their own cursor into [steps](LongDivisionTrace::steps).

mod operand;
pub use operand::*;

use crate::common::Span;
use crate::errors::{ConversionError, Result};
use crate::math::digits_value;
use crate::options::{DEFAULT_DECIMAL_PLACES, DEFAULT_MAX_STEPS};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

#[cfg(feature = "serde")]
use serde::Serialize;

/// One digit-cycle of a long division: bring down a digit, divide, multiply, subtract.
///
/// ```text
///      0 2 5          <- quotient_digit of each step
///    ┌──────
///  5 │ 1 2 5
///      1 0            <- product of step 1, product_columns 0..2
///      ───
///        2 5          <- working_number of step 2: remainder 2, brought down 5
///        2 5
///        ───
///          0          <- remainder of step 2, remainder_columns 2..3
/// ```
///
/// Column positions index the digit [columns](LongDivisionTrace::columns) of the dividend; a
/// product or remainder spanning `lo..hi` is written right-aligned under column `hi - 1`.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ConversionStep {
    /// Index of the step in the trace, and of its digit in the quotient.
    pub step_index: usize,
    /// The dividend column the step brings down. Appended zero columns continue past the written
    /// digits.
    pub column: usize,
    pub brought_down_digit: u8,
    /// Whether the brought-down digit is a zero appended after the dividend's written digits ran
    /// out.
    pub is_appended_zero: bool,
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
    pub previous_remainder: BigInt,
    /// `previous_remainder * 10 + brought_down_digit`.
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
    pub working_number: BigInt,
    pub quotient_digit: u8,
    /// `quotient_digit * scaled_divisor`.
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
    pub product: BigInt,
    /// `working_number - product`.
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
    pub remainder: BigInt,
    /// Whether the quotient digit falls after the quotient's decimal point.
    pub is_fractional_position: bool,
    /// Whether the quotient's decimal point is written immediately before this step's digit.
    pub point_before: bool,
    pub working_columns: Span,
    pub product_columns: Span,
    pub remainder_columns: Span,
}

/// Limits of a long-division trace.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct TraceOptions {
    /// Fractional digits the quotient is rounded to. One more digit is produced to decide the
    /// rounding, unless the division comes out even first.
    pub decimal_places: usize,
    /// Hard cap on the number of steps.
    pub max_steps: usize,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// A complete long division of `dividend / divisor`.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct LongDivisionTrace {
    pub is_negative: bool,
    pub dividend: Operand,
    pub divisor: Operand,
    /// The divisor scaled to an integer.
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::serde_bigint"))]
    pub scaled_divisor: BigInt,
    /// The digits of the scaled dividend, one per column.
    pub columns: String,
    /// The number of columns before the quotient's decimal point.
    pub point_column: usize,
    pub steps: Vec<ConversionStep>,
    /// Whether the step cap stopped the division before it was complete.
    pub truncated: bool,
    /// The number of fractional digits the quotient is rounded to.
    pub decimal_places: usize,
    /// The fractional digit right after `decimal_places`, which decides the rounding. Absent if
    /// the quotient has no digit there.
    pub rounding_digit: Option<u8>,
    /// The quotient rounded half up to `decimal_places` fractional digits, like `0.67` for `2/3`
    /// to two places. A quotient with fewer digits is kept as it is.
    pub rounded_quotient: String,
}

impl LongDivisionTrace {
    /// The quotient digits before the decimal point, without redundant leading zeros.
    pub fn integer_digits(&self) -> String {
        let digits: String = self
            .steps
            .iter()
            .filter(|step| !step.is_fractional_position)
            .map(|step| char::from(b'0' + step.quotient_digit))
            .collect();
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_owned()
        } else {
            trimmed.to_owned()
        }
    }

    /// The quotient digits after the decimal point.
    pub fn fractional_digits(&self) -> String {
        self.steps
            .iter()
            .filter(|step| step.is_fractional_position)
            .map(|step| char::from(b'0' + step.quotient_digit))
            .collect()
    }

    /// The quotient as written on top of the division, like `-2.5`.
    pub fn quotient(&self) -> String {
        let fractional = self.fractional_digits();
        format!(
            "{}{}{}{}",
            if self.is_negative { "-" } else { "" },
            self.integer_digits(),
            if fractional.is_empty() { "" } else { "." },
            fractional
        )
    }

    /// Whether the rounding digit rounds the last kept digit up.
    pub fn rounds_up(&self) -> bool {
        self.rounding_digit.map_or(false, |d| d >= 5)
    }

    /// The final remainder of the division.
    pub fn remainder(&self) -> BigInt {
        self.steps
            .last()
            .map(|step| step.remainder.clone())
            .unwrap_or_else(BigInt::zero)
    }
}

/// Traces the long division of two written operands, like `build_trace("1.5", "0.25", 2)`.
///
/// See [build_trace_with].
pub fn build_trace(dividend: &str, divisor: &str, decimal_places: usize) -> Result<LongDivisionTrace> {
    let dividend = Operand::parse(dividend)?;
    let divisor = Operand::parse(divisor)?;
    build_trace_with(
        &dividend,
        &divisor,
        &TraceOptions {
            decimal_places,
            ..TraceOptions::default()
        },
    )
}

/// Traces the long division `dividend / divisor`.
///
/// ## Algorithm
///
/// The operands are first scaled the way long division is done by hand. With `fa` and `fb` the
/// number of fractional digits of the dividend and divisor,
///
/// - the divisor becomes the integer `|divisor| * 10^fb`;
/// - the dividend's digit columns are those of `|dividend| * 10^max(fa, fb)`;
/// - the quotient's decimal point falls after the integer digits of `|dividend| * 10^fb`. Columns
///   after it are written fractional digits of the dividend.
///
/// ```text
/// 1.25 / 0.5   ->   12.5 / 5   ->   columns "125", point after column 2
/// ```
///
/// Leading zero columns are dropped as long as more than one column stays before the point.
///
/// Each step then brings down the next column (or an appended zero once the columns run out),
/// divides the working number by the divisor, and carries the remainder to the next step. Once
/// the written columns are exhausted the division stops as soon as the remainder is 0 or
/// `decimal_places + 1` fractional quotient digits exist. If `max_steps` steps are reached
/// first, the trace is marked [truncated](LongDivisionTrace::truncated).
///
/// The extra digit decides the [rounded quotient](LongDivisionTrace::rounded_quotient): a digit of
/// 5 or more rounds the last kept digit up, carrying as far as needed.
///
/// ```text
/// 2 / 3 to 2 places   ->   0.666, rounding digit 6   ->   0.67
/// 1 / 8 to 1 place    ->   0.12,  rounding digit 2   ->   0.1
/// ```
///
/// For integer operands the quotient digits agree with [to_decimal](crate::to_decimal): the
/// integer digits are its integer part, and the fractional digits are a prefix of its expansion.
///
/// ## Failure
///
/// Fails with [DivisionByZero](ConversionError::DivisionByZero) if the divisor is 0.
pub fn build_trace_with(
    dividend: &Operand,
    divisor: &Operand,
    options: &TraceOptions,
) -> Result<LongDivisionTrace> {
    if divisor.is_zero() {
        return Err(ConversionError::DivisionByZero);
    }

    let (fa, fb) = (dividend.fraction_len(), divisor.fraction_len());
    let scale = fa.max(fb);

    let mut columns = format!(
        "{}{}{}",
        dividend.integer_digits,
        dividend.fraction_digits,
        "0".repeat(scale - fa)
    );
    let mut point_column = dividend.integer_digits.len() + fb;
    while point_column > 1 && columns.starts_with('0') {
        columns.remove(0);
        point_column -= 1;
    }

    let scaled_divisor = divisor.scaled_magnitude(fb);
    let column_digits = columns.as_bytes();

    let mut steps = Vec::new();
    let mut remainder = BigInt::zero();
    let mut fractional_count = 0;
    let mut truncated = false;
    for column in 0.. {
        let is_appended_zero = column >= column_digits.len();
        if is_appended_zero && (remainder.is_zero() || fractional_count > options.decimal_places) {
            break;
        }
        if steps.len() == options.max_steps {
            truncated = true;
            break;
        }

        let brought_down_digit = if is_appended_zero {
            0
        } else {
            column_digits[column] - b'0'
        };
        let working_number = &remainder * 10u32 + u32::from(brought_down_digit);
        let (quotient, next_remainder) = working_number.div_rem(&scaled_divisor);
        // The working number is below ten times the divisor.
        let quotient_digit = quotient.to_u8().unwrap_or(0);
        let product = quotient * &scaled_divisor;

        let is_fractional_position = column >= point_column;
        if is_fractional_position {
            fractional_count += 1;
        }

        steps.push(ConversionStep {
            step_index: steps.len(),
            column,
            brought_down_digit,
            is_appended_zero,
            previous_remainder: remainder,
            working_columns: right_aligned(&working_number, column),
            product_columns: right_aligned(&product, column),
            remainder_columns: right_aligned(&next_remainder, column),
            working_number,
            quotient_digit,
            product,
            remainder: next_remainder.clone(),
            is_fractional_position,
            point_before: column == point_column,
        });
        remainder = next_remainder;
    }

    let mut trace = LongDivisionTrace {
        is_negative: !dividend.is_zero() && (dividend.is_negative ^ divisor.is_negative),
        dividend: dividend.clone(),
        divisor: divisor.clone(),
        scaled_divisor,
        columns,
        point_column,
        steps,
        truncated,
        decimal_places: options.decimal_places,
        rounding_digit: None,
        rounded_quotient: String::new(),
    };
    let (rounded_quotient, rounding_digit) = round_half_up(&trace);
    trace.rounded_quotient = rounded_quotient;
    trace.rounding_digit = rounding_digit;
    Ok(trace)
}

/// Rounds the quotient of `trace` half up to its decimal places. Returns the rounded quotient and
/// the digit that decided it.
fn round_half_up(trace: &LongDivisionTrace) -> (String, Option<u8>) {
    let fractional = trace.fractional_digits();
    let places = trace.decimal_places;
    let rounding_digit = fractional.as_bytes().get(places).map(|b| b - b'0');
    let kept = &fractional[..places.min(fractional.len())];

    let mut magnitude = digits_value(&format!("{}{}", trace.integer_digits(), kept));
    if rounding_digit.map_or(false, |d| d >= 5) {
        magnitude += 1u32;
    }
    let digits = format!("{:0>width$}", magnitude.to_string(), width = kept.len() + 1);
    let (integer, fraction) = digits.split_at(digits.len() - kept.len());

    let sign = if trace.is_negative && !magnitude.is_zero() {
        "-"
    } else {
        ""
    };
    let point = if fraction.is_empty() { "" } else { "." };
    (
        format!("{}{}{}{}", sign, integer, point, fraction),
        rounding_digit,
    )
}

/// The columns `n` occupies when its last digit is written under `column`.
fn right_aligned(n: &BigInt, column: usize) -> Span {
    let width = n.magnitude().to_string().len();
    let hi = column + 1;
    Span::from(hi.saturating_sub(width)..hi)
}
