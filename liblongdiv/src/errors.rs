//! Conversion failures and the diagnostic codes they are reported under.

use crate::common::Span;
use crate::diagnostics::{Diagnostic, DiagnosticRecord, DiagnosticRegistry};

use thiserror::Error;

/// Why an input string was rejected by the decimal grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("input is empty")]
    Empty,
    #[error("parentheses are unbalanced")]
    UnbalancedParentheses,
    #[error("unexpected {0}")]
    Unexpected(String),
    #[error("expected digits, found {0}")]
    ExpectedDigits(String),
}

/// A failed conversion.
///
/// All failures are recoverable by the caller. A decimal expansion that exhausts its digit budget
/// is not a failure; see [DecimalExpansion::truncated](crate::DecimalExpansion::truncated).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The divisor (or denominator) is zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An argument has no meaningful result, like `gcd(0, 0)`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The input matches none of the accepted grammars.
    #[error("malformed input {input:?}: {reason}")]
    MalformedInput {
        input: String,
        span: Span,
        reason: MalformedReason,
    },

    /// Two derivations of the same quantity disagree. This is a defect in liblongdiv, not in the
    /// input.
    #[error("internal consistency violated: {0}")]
    InternalConsistency(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;

impl ConversionError {
    pub(crate) fn malformed<S: Into<Span>>(input: &str, span: S, reason: MalformedReason) -> Self {
        ConversionError::MalformedInput {
            input: input.to_owned(),
            span: span.into(),
            reason,
        }
    }
}

macro_rules! define_errors {
    ($($(#[doc = $doc:expr])+ $code:ident: $error:ident $gen_macro:tt)*) => {$(
        $(#[doc = $doc])+
        pub(crate) struct $error;

        impl DiagnosticRecord for $error {
            const CODE: &'static str = stringify!($code);
            const EXPLANATION: &'static str = concat!($($doc, "\n"),+);
        })*

        /// Diagnostics produced by conversions.
        pub(crate) struct ConversionDiagnostics;

        impl DiagnosticRegistry for ConversionDiagnostics {
            fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
                let mut vec = Vec::new();
                $(vec.push(($error::CODE, $error::EXPLANATION));)*
                vec
            }
        }

        $(
            macro_rules! $error $gen_macro
        )*
    };
}

define_errors! {
    ///A conversion input must be a fraction `a/b` or a decimal in one of these forms:
    ///
    ///```text
    ///1.25        terminating decimal
    ///0.1(6)      repeating block in parentheses
    ///0.333...    repeating block inferred from the digits before "..."
    ///7           integer
    ///```
    ///
    ///Any of the forms may start with a `-`. Only ASCII digits are accepted, and the decimal point
    ///must be followed by at least one digit unless a repeating block follows.
    ///
    ///Prefer the parenthesized form whenever the exact value matters; the repeating block of an
    ///ellipsis decimal is a best guess.
    D0001: MalformedDecimal {
        ($span:expr, $reason:expr) => {
            Diagnostic::span_err(
                $span,
                "Malformed decimal",
                MalformedDecimal::CODE,
                $reason,
            )
            .with_help(r#"write decimals like "1.25", "0.1(6)", "0.333..." or "7""#)
        }
    }

    ///Every opening parenthesis in a repeating decimal must be closed, and every closing
    ///parenthesis must be opened. For example, both of
    ///
    ///```text
    ///0.1(2
    ///0.12)
    ///```
    ///
    ///are rejected. The repeating block is written between one pair of parentheses at the end of
    ///the decimal, as in `0.1(2)`.
    D0002: UnbalancedParentheses {
        ($span:expr) => {
            Diagnostic::span_err(
                $span,
                "Unbalanced parentheses",
                UnbalancedParentheses::CODE,
                "this parenthesis has no partner".to_string(),
            )
            .with_help("close the repeating block, as in \"0.1(2)\"")
        }
    }

    ///A fraction or long division whose denominator is zero has no value.
    ///
    ///```text
    ///1/0
    ///  ^- zero divisor
    ///```
    D0003: DivisionByZero {
        ($span:expr) => {
            Diagnostic::span_err(
                $span,
                "Division by zero",
                DivisionByZero::CODE,
                "divisor is zero".to_string(),
            )
        }
    }

    ///The decimal expansion of a fraction either terminates or repeats, but the repeating block
    ///can be very long; the expansion of 1/97 repeats after 96 digits.
    ///
    ///This warning fires when neither happened within the digit budget. The digits shown are
    ///correct, but the expansion continues past them. Raise the budget with `--max-digits` to see
    ///more of it.
    D0004: TruncatedExpansion {
        ($span:expr, $max_digits:expr) => {
            Diagnostic::span_warn(
                $span,
                "Decimal expansion truncated",
                TruncatedExpansion::CODE,
                format!("no repeating block found within {} digits", $max_digits),
            )
            .with_note("the expansion continues past the digits shown")
        }
    }

    ///Two independent derivations of the same fraction disagreed. This is a bug in longdiv, not a
    ///problem with the input; we would appreciate a report with the input that triggered it.
    D0005: InternalConsistency {
        ($span:expr, $msg:expr) => {
            Diagnostic::span_err(
                $span,
                "Internal consistency violated",
                InternalConsistency::CODE,
                $msg.to_string(),
            )
        }
    }

    ///An argument has no meaningful result. For example, the greatest common divisor of 0 and 0 is
    ///undefined, so simplifying 0/0 is rejected.
    D0006: InvalidArgument {
        ($span:expr, $msg:expr) => {
            Diagnostic::span_err(
                $span,
                "Invalid argument",
                InvalidArgument::CODE,
                $msg.to_string(),
            )
        }
    }

    ///A long division is written out one step per digit, up to a step cap. A division with many
    ///dividend digits, or carried to many decimal places, can reach the cap before it is done:
    ///
    ///```text
    ///longdiv --places 500 1/7
    ///```
    ///
    ///This warning fires when that happens. The conversion results are exact, but the laid-out
    ///division and its rounded quotient stop at the cap. Raise it with `--max-steps`.
    D0007: TruncatedTrace {
        ($span:expr, $max_steps:expr) => {
            Diagnostic::span_warn(
                $span,
                "Long division truncated",
                TruncatedTrace::CODE,
                format!("division stopped after {} steps", $max_steps),
            )
            .with_note("the quotient continues past the digits shown")
        }
    }
}

impl ConversionError {
    /// Converts the error to a [Diagnostic]. Errors without a source location of their own are
    /// reported at `span`.
    pub fn to_diagnostic<S: Into<Span>>(&self, span: S) -> Diagnostic {
        let span = span.into();
        match self {
            ConversionError::DivisionByZero => DivisionByZero!(span),
            ConversionError::InvalidArgument(msg) => InvalidArgument!(span, msg),
            ConversionError::MalformedInput {
                span,
                reason: MalformedReason::UnbalancedParentheses,
                ..
            } => UnbalancedParentheses!(*span),
            ConversionError::MalformedInput { span, reason, .. } => {
                MalformedDecimal!(*span, reason.to_string())
            }
            ConversionError::InternalConsistency(msg) => InternalConsistency!(span, msg),
        }
    }
}
