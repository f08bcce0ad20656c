//! Runs a conversion request through the converters and collects the results in one place.

use crate::common::Span;
use crate::convert::{percentage, to_fraction, DecimalExpansion, FractionDerivation};
use crate::diagnostics::{Diagnostic, DiagnosticRecord};
use crate::errors::{ConversionError, Result, TruncatedExpansion, TruncatedTrace};
use crate::math::Fraction;
use crate::options::ConversionOptions;
use crate::parser::{parse_request, Request};
use crate::trace::{build_trace_with, LongDivisionTrace, Operand};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Everything known about a converted value.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ConversionResult {
    /// The value as a fraction, before simplification. For `1.5/0.25` this is `150/25`.
    pub fraction: Fraction,
    pub simplified_fraction: Fraction,
    pub expansion: DecimalExpansion,
    /// Like `0.1(6)`.
    pub decimal_pretty: String,
    /// Like `0.1666666666666...`.
    pub decimal_ellipsis: String,
    /// Like `16.67%`.
    pub percentage: String,
    pub is_repeating: bool,
    /// Whether the decimal expansion ran out of its digit budget.
    pub truncated: bool,
    /// How a decimal request was turned into a fraction. Absent for fraction requests.
    pub derivation: Option<FractionDerivation>,
    /// The long division producing the decimal.
    pub trace: LongDivisionTrace,
}

/// The outcome of [evaluate]: a result if the conversion succeeded, and any diagnostics
/// produced along the way.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Debug)]
pub struct EvaluationResult {
    pub result: Option<ConversionResult>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Converts a parsed request.
///
/// A fraction request `a/b` is converted as the fraction of integers it scales to: with `k` the
/// larger number of fractional digits of `a` and `b`, it is `a*10^k / b*10^k`. Its long division
/// is traced on the operands as written.
///
/// A decimal request is first converted to a fraction; the long division of the simplified
/// fraction is then carried to at least as many places as the decimal has written digits, so it
/// reproduces them.
pub fn convert(request: &Request, options: &ConversionOptions) -> Result<ConversionResult> {
    match request {
        Request::Fraction { dividend, divisor } => {
            if divisor.is_zero() {
                return Err(ConversionError::DivisionByZero);
            }
            let places = dividend.fraction_len().max(divisor.fraction_len());
            let fraction = Fraction::new(
                signed(dividend.is_negative, dividend.scaled_magnitude(places)),
                signed(divisor.is_negative, divisor.scaled_magnitude(places)),
            )?;
            let trace = build_trace_with(
                dividend,
                divisor,
                &options.trace_options(options.decimal_places),
            )?;
            build_result(fraction, None, trace, options)
        }
        Request::Decimal { notation, .. } => {
            let derivation = to_fraction(notation)?;
            let written = derivation.notation.non_repeating.len() + derivation.notation.repeating.len();
            let simplified = &derivation.simplified;
            let trace = build_trace_with(
                &Operand::integer(simplified.numerator().clone()),
                &Operand::integer(simplified.denominator().clone()),
                &options.trace_options(options.decimal_places.max(written)),
            )?;
            build_result(derivation.fraction.clone(), Some(derivation), trace, options)
        }
    }
}

fn signed(is_negative: bool, magnitude: num_bigint::BigInt) -> num_bigint::BigInt {
    if is_negative {
        -magnitude
    } else {
        magnitude
    }
}

fn build_result(
    fraction: Fraction,
    derivation: Option<FractionDerivation>,
    trace: LongDivisionTrace,
    options: &ConversionOptions,
) -> Result<ConversionResult> {
    let simplified_fraction = fraction.simplify();
    let expansion = DecimalExpansion::of(&simplified_fraction, options.max_digits)?;
    let percentage = percentage(fraction.numerator().clone(), fraction.denominator().clone())?;

    Ok(ConversionResult {
        decimal_pretty: expansion.pretty(),
        decimal_ellipsis: expansion.ellipsis(options.ellipsis_width),
        percentage,
        is_repeating: expansion.is_repeating(),
        truncated: expansion.truncated,
        fraction,
        simplified_fraction,
        expansion,
        derivation,
        trace,
    })
}

/// Parses and converts `input`, reporting failures and truncation as [Diagnostic]s.
///
/// The result is present exactly when no diagnostic is [fatal](Diagnostic::is_fatal).
pub fn evaluate(input: &str, options: &ConversionOptions) -> EvaluationResult {
    let whole_input = Span::from(0..input.chars().count());
    let request = match parse_request(input) {
        Ok(request) => request,
        Err(err) => {
            return EvaluationResult {
                result: None,
                diagnostics: vec![err.to_diagnostic(whole_input)],
            }
        }
    };

    match convert(&request, options) {
        Ok(result) => {
            let mut diagnostics = Vec::new();
            if result.truncated {
                diagnostics.push(TruncatedExpansion!(request.span(), options.max_digits));
            }
            if result.trace.truncated {
                diagnostics.push(TruncatedTrace!(request.span(), options.max_steps));
            }
            EvaluationResult {
                result: Some(result),
                diagnostics,
            }
        }
        Err(err) => {
            let span = match (&err, &request) {
                (ConversionError::DivisionByZero, Request::Fraction { divisor, .. }) => {
                    divisor.span
                }
                _ => request.span(),
            };
            EvaluationResult {
                result: None,
                diagnostics: vec![err.to_diagnostic(span)],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    fn eval(input: &str) -> ConversionResult {
        let evaluated = evaluate(input, &ConversionOptions::default());
        assert!(evaluated.diagnostics.is_empty(), "{:?}", evaluated.diagnostics);
        evaluated.result.unwrap()
    }

    fn codes(evaluated: &EvaluationResult) -> Vec<(&'static str, Span)> {
        evaluated
            .diagnostics
            .iter()
            .map(|d| (d.code.unwrap(), d.span))
            .collect()
    }

    #[test]
    fn one_third() {
        let result = eval("1/3");
        assert_eq!(result.fraction.to_string(), "1/3");
        assert_eq!(result.simplified_fraction.to_string(), "1/3");
        assert_eq!(result.decimal_pretty, "0.(3)");
        assert_eq!(result.decimal_ellipsis, "0.333333333333...");
        assert_eq!(result.percentage, "33.33%");
        assert!(result.is_repeating);
        assert!(!result.truncated);
        assert!(result.derivation.is_none());
        assert_eq!(result.trace.quotient(), "0.333");
        assert_eq!(result.trace.rounded_quotient, "0.33");
    }

    #[test]
    fn decimal_operands() {
        let result = eval("1.5 / 0.25");
        assert_eq!(result.fraction.to_string(), "150/25");
        assert_eq!(result.simplified_fraction.to_string(), "6/1");
        assert_eq!(result.decimal_pretty, "6");
        assert_eq!(result.percentage, "600.00%");
        assert_eq!(result.trace.quotient(), "6");
    }

    #[test]
    fn unequal_fractional_lengths() {
        let result = eval("0.5/2.25");
        assert_eq!(result.fraction.to_string(), "50/225");
        assert_eq!(result.simplified_fraction.to_string(), "2/9");
        assert_eq!(result.decimal_pretty, "0.(2)");
    }

    #[test]
    fn negative_fraction() {
        let result = eval("7/-2");
        assert_eq!(result.fraction.to_string(), "-7/2");
        assert_eq!(result.decimal_pretty, "-3.5");
        assert_eq!(result.percentage, "-350.00%");
        assert_eq!(result.trace.quotient(), "-3.5");
    }

    #[test]
    fn repeating_decimal() {
        let result = eval("0.1(6)");
        assert_eq!(result.fraction.to_string(), "15/90");
        assert_eq!(result.simplified_fraction.to_string(), "1/6");
        assert_eq!(result.decimal_pretty, "0.1(6)");
        assert_eq!(result.percentage, "16.67%");
        assert!(result.derivation.is_some());
        assert_eq!(result.trace.quotient(), "0.166");
        assert_eq!(result.trace.rounded_quotient, "0.17");
    }

    #[test]
    fn trace_covers_written_digits() {
        let result = eval("0.142857142857...");
        assert_eq!(result.simplified_fraction.to_string(), "1/7");
        assert_eq!(result.trace.quotient(), "0.1428571");
        assert_eq!(result.trace.rounded_quotient, "0.142857");
    }

    #[test]
    fn terminating_decimal() {
        let result = eval("-1.25");
        assert_eq!(result.simplified_fraction.to_string(), "-5/4");
        assert_eq!(result.decimal_pretty, "-1.25");
        assert!(!result.is_repeating);
        assert_eq!(result.trace.quotient(), "-1.25");
    }

    #[test]
    fn division_by_zero_points_at_divisor() {
        let evaluated = evaluate("1 / 0.0", &ConversionOptions::default());
        assert!(evaluated.result.is_none());
        assert_eq!(codes(&evaluated), vec![("D0003", Span::from(4..7))]);
    }

    #[test]
    fn unbalanced_parentheses() {
        let evaluated = evaluate("0.1(2", &ConversionOptions::default());
        assert!(evaluated.result.is_none());
        assert_eq!(codes(&evaluated), vec![("D0002", Span::from(3..4))]);
    }

    #[test]
    fn malformed() {
        let evaluated = evaluate("1.2e5", &ConversionOptions::default());
        assert_eq!(codes(&evaluated), vec![("D0001", Span::from(3..4))]);
    }

    #[test]
    fn truncation_warns() {
        let options = ConversionOptions::default().max_digits(10);
        let evaluated = evaluate("1/97", &options);
        assert_eq!(codes(&evaluated), vec![("D0004", Span::from(0..4))]);
        assert_eq!(evaluated.diagnostics[0].kind, DiagnosticKind::Warning);

        let result = evaluated.result.unwrap();
        assert!(result.truncated);
        assert!(!result.is_repeating);
        assert_eq!(result.decimal_pretty, "0.0103092783");
        assert_eq!(result.decimal_ellipsis, "0.0103092783...");
    }

    #[test]
    fn trace_cap_warns() {
        let options = ConversionOptions::default().max_steps(5);
        let evaluated = evaluate("1/7", &options.decimal_places(10));
        assert_eq!(codes(&evaluated), vec![("D0007", Span::from(0..3))]);
        assert_eq!(evaluated.diagnostics[0].kind, DiagnosticKind::Warning);

        let result = evaluated.result.unwrap();
        assert!(result.trace.truncated);
        assert!(!result.truncated);
        assert_eq!(result.decimal_pretty, "0.(142857)");
        assert_eq!(result.trace.quotient(), "0.1428");
    }

    #[test]
    fn trace_cap_on_decimal_request() {
        let options = ConversionOptions::default().max_steps(3);
        let evaluated = evaluate("0.(142857)", &options);
        assert_eq!(codes(&evaluated), vec![("D0007", Span::from(0..10))]);
        assert_eq!(evaluated.result.unwrap().simplified_fraction.to_string(), "1/7");
    }

    #[test]
    fn both_truncations_warn() {
        let options = ConversionOptions::default().max_digits(10).max_steps(3);
        let evaluated = evaluate("1/97", &options);
        assert_eq!(
            codes(&evaluated),
            vec![("D0004", Span::from(0..4)), ("D0007", Span::from(0..4))]
        );
    }

    #[test]
    fn ellipsis_width() {
        let options = ConversionOptions::default().ellipsis_width(4);
        let result = evaluate("22/7", &options).result.unwrap();
        assert_eq!(result.decimal_ellipsis, "3.1428...");
    }

    #[test]
    fn zero_ellipsis_width() {
        let options = ConversionOptions::default().ellipsis_width(0);
        let result = evaluate("2/3", &options).result.unwrap();
        assert_eq!(result.decimal_ellipsis, "0.6...");
    }

    #[test]
    fn decimal_places() {
        let options = ConversionOptions::default().decimal_places(5);
        let result = evaluate("2/3", &options).result.unwrap();
        assert_eq!(result.trace.quotient(), "0.666666");
        assert_eq!(result.trace.rounded_quotient, "0.66667");
    }
}
