//! Exact conversion between fractions and decimals, with long division traced digit by digit.
//!
//! ```
//! use liblongdiv::{evaluate, ConversionOptions};
//!
//! let result = evaluate("1/6", &ConversionOptions::default()).result.unwrap();
//! assert_eq!(result.decimal_pretty, "0.1(6)");
//!
//! let result = evaluate("0.1(6)", &ConversionOptions::default()).result.unwrap();
//! assert_eq!(result.simplified_fraction.to_string(), "1/6");
//! ```

#[macro_use]
mod errors;
pub use errors::{ConversionError, MalformedReason, Result};

pub mod common;
pub mod diagnostics;

pub mod scanner;
pub use scanner::scan;

mod notation;
pub use notation::DecimalNotation;

mod parser;
pub use parser::{parse_decimal, parse_operand, parse_request, Request};

mod convert;
pub use convert::{
    percentage, to_decimal, to_fraction, DecimalExpansion, DerivationFact, FractionDerivation,
};

mod trace;
pub use trace::{
    build_trace, build_trace_with, ConversionStep, LongDivisionTrace, Operand, TraceOptions,
};

mod options;
pub use options::*;

mod request;
pub use request::{convert, evaluate, ConversionResult, EvaluationResult};

mod emit;
pub use emit::{Emit, EmitConfig, EmitFormat};

mod math;
pub use math::{gcd, simplify, Fraction};

#[cfg(feature = "benchmark-internals")]
pub use math::*;

mod utils;
