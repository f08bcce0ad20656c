//! Emit strategies for conversion results.

use crate::convert::{DerivationFact, FractionDerivation};
use crate::request::ConversionResult;
use crate::trace::LongDivisionTrace;

use core::fmt;

/// The format in which a conversion result should be emitted.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum EmitFormat {
    /// Human-readable text.
    /// For example, the decimal of `1/6` is output as `0.1(6)`.
    Pretty,
    /// liblongdiv internal debug form.
    /// NB: this form is not stable, and no assumptions should be made about it.
    Debug,
}

impl From<&str> for EmitFormat {
    fn from(form: &str) -> Self {
        match form {
            "debug" => EmitFormat::Debug,
            _ => EmitFormat::Pretty,
        }
    }
}

impl From<String> for EmitFormat {
    fn from(form: String) -> Self {
        form.as_str().into()
    }
}

/// Which optional sections are emitted with a conversion result.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub struct EmitConfig {
    /// Emit the long division, laid out as it is written by hand.
    pub trace: bool,
    /// Emit the derivation of a decimal's fraction.
    pub derivation: bool,
}

impl From<Vec<String>> for EmitConfig {
    fn from(opts: Vec<String>) -> Self {
        let mut config = EmitConfig::default();
        for opt in opts {
            match opt.as_ref() {
                "trace" => config.trace = true,
                "derivation" => config.derivation = true,
                _ => {}
            }
        }
        config
    }
}

/// Implements the emission of a type in an [EmitFormat].
pub trait Emit
where
    Self: fmt::Display + fmt::Debug,
{
    /// Emit `self` with the given [EmitFormat] and [EmitConfig].
    fn emit(&self, form: EmitFormat, config: EmitConfig) -> String {
        match form {
            EmitFormat::Pretty => self.emit_pretty(config),
            EmitFormat::Debug => self.emit_debug(config),
        }
    }

    /// Emit `self` with the [pretty emit format][EmitFormat::Pretty]
    fn emit_pretty(&self, config: EmitConfig) -> String;

    /// Emit `self` with the [debug emit format][EmitFormat::Debug]
    fn emit_debug(&self, _config: EmitConfig) -> String {
        format!("{:#?}", self)
    }
}

/// Implements `core::fmt::Display` for a type implementing `Emit`.
#[doc(hidden)]
macro_rules! fmt_emit_impl {
    ($S:path) => {
        impl core::fmt::Display for $S {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.emit_pretty(EmitConfig::default()))
            }
        }
    };
}

fmt_emit_impl!(ConversionResult);
impl Emit for ConversionResult {
    fn emit_pretty(&self, config: EmitConfig) -> String {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        let mut out = vec![
            format!("fraction:   {}", self.fraction),
            format!("simplified: {}", self.simplified_fraction),
            format!("decimal:    {}", self.decimal_pretty),
            format!("ellipsis:   {}", self.decimal_ellipsis),
            format!("percentage: {}", self.percentage),
            format!("repeating:  {}", yes_no(self.is_repeating)),
        ];
        if self.truncated {
            out.push(format!("truncated:  {}", yes_no(self.truncated)));
        }

        if config.derivation {
            if let Some(derivation) = &self.derivation {
                out.push(String::new());
                out.push(derivation.emit_pretty(config));
            }
        }
        if config.trace {
            out.push(String::new());
            out.push(self.trace.emit_pretty(config));
        }
        out.join("\n")
    }
}

fmt_emit_impl!(FractionDerivation);
impl Emit for FractionDerivation {
    /// Emits the derivation as a list of equations, like
    ///
    /// ```text
    /// x = 0.1(6)
    /// 100x = 16.(6)
    /// 10x = 1.(6)
    /// 90x = 15
    /// x = 15/90
    ///   = 3/18 (divide by 5)
    ///   = 1/6 (divide by 3)
    /// ```
    fn emit_pretty(&self, _config: EmitConfig) -> String {
        let sign = if self.fraction.is_negative() { "-" } else { "" };
        let tail = if self.notation.is_terminating() {
            String::new()
        } else {
            format!(".({})", self.notation.repeating)
        };

        let mut out = vec![format!("x = {}", self.notation)];
        for fact in &self.facts {
            match fact {
                DerivationFact::Structure { .. } => {}
                DerivationFact::Scale {
                    numerator,
                    denominator,
                    ..
                } => out.push(format!("x = {}{}/{}", sign, numerator, denominator)),
                DerivationFact::Multiply { multiplier, value } => {
                    out.push(format!("{}x = {}{}{}", multiplier, sign, value, tail))
                }
                DerivationFact::Subtract {
                    numerator,
                    denominator,
                } => {
                    out.push(format!("{}x = {}{}", denominator, sign, numerator));
                    out.push(format!("x = {}{}/{}", sign, numerator, denominator));
                }
                DerivationFact::DivideBy {
                    divisor,
                    numerator,
                    denominator,
                } => out.push(format!(
                    "  = {}{}/{} (divide by {})",
                    sign, numerator, denominator, divisor
                )),
                DerivationFact::Gcd {
                    gcd,
                    numerator,
                    denominator,
                } => out.push(format!(
                    "  = {}{}/{} (divide by gcd {})",
                    sign, numerator, denominator, gcd
                )),
            }
        }
        out.join("\n")
    }
}

fmt_emit_impl!(LongDivisionTrace);
impl Emit for LongDivisionTrace {
    /// Emits the division as it is written by hand, like
    ///
    /// ```text
    /// 1.25 / 0.5 = 2.5
    ///
    ///       2.5
    ///     ------
    /// 5 ) 1 2.5
    ///     1 0
    ///     ---
    ///       2 5
    ///       2 5
    ///       ---
    ///         0
    /// ```
    ///
    /// Every dividend column takes two characters; the decimal point sits between columns.
    ///
    /// A quotient carried past its decimal places ends with the rounding, like
    /// `rounded to 2 places: 0.67 (next digit 6 >= 5)`.
    fn emit_pretty(&self, _config: EmitConfig) -> String {
        let header = format!(
            "{} / {} = {}{}",
            self.dividend,
            self.divisor,
            self.quotient(),
            if self.truncated { "..." } else { "" }
        );
        if self.steps.is_empty() {
            return header;
        }

        let mut layout = Layout::new(self);
        layout.draw();
        let mut out = format!("{}\n\n{}", header, layout.finish());
        if let Some(digit) = self.rounding_digit {
            out.push_str(&format!(
                "\n\nrounded to {} place{}: {} (next digit {} {} 5)",
                self.decimal_places,
                if self.decimal_places == 1 { "" } else { "s" },
                self.rounded_quotient,
                digit,
                if self.rounds_up() { ">=" } else { "<" }
            ));
        }
        out
    }
}

/// A character grid for the long-division layout of a [LongDivisionTrace].
struct Layout<'a> {
    trace: &'a LongDivisionTrace,
    /// Width of the `divisor ) ` prefix.
    indent: usize,
    /// Last column any row reaches.
    last_column: usize,
    rows: Vec<Vec<char>>,
}

impl<'a> Layout<'a> {
    fn new(trace: &'a LongDivisionTrace) -> Self {
        let last_step = trace.steps.last().map(|s| s.column).unwrap_or(0);
        Self {
            trace,
            indent: trace.scaled_divisor.to_string().len() + 3,
            last_column: last_step.max(trace.columns.len().saturating_sub(1)),
            rows: Vec::new(),
        }
    }

    /// Character position of a column.
    fn x(&self, column: usize) -> usize {
        self.indent + 2 * column
    }

    fn put(&mut self, row: usize, x: usize, c: char) {
        while self.rows.len() <= row {
            self.rows.push(Vec::new());
        }
        let line = &mut self.rows[row];
        while line.len() <= x {
            line.push(' ');
        }
        line[x] = c;
    }

    /// Writes the digits of `n` into consecutive columns ending at `column`.
    fn put_number(&mut self, row: usize, n: &num_bigint::BigInt, column: usize) {
        let digits = n.magnitude().to_string();
        let lo = (column + 1).saturating_sub(digits.len());
        for (i, d) in digits.chars().enumerate() {
            let x = self.x(lo + i);
            self.put(row, x, d);
        }
    }

    /// Draws a rule under columns `lo..=hi`.
    fn put_rule(&mut self, row: usize, lo: usize, hi: usize) {
        for x in self.x(lo)..=self.x(hi) {
            self.put(row, x, '-');
        }
    }

    fn draw(&mut self) {
        let trace = self.trace;
        let has_point = trace.steps.iter().any(|s| s.is_fractional_position);

        // Quotient, without leading zeros before the last integer column.
        let last_integer_column = trace.point_column.saturating_sub(1);
        let mut leading = true;
        for step in &trace.steps {
            leading &= step.quotient_digit == 0 && step.column < last_integer_column;
            if !leading {
                let x = self.x(step.column);
                self.put(0, x, char::from(b'0' + step.quotient_digit));
            }
        }
        if has_point {
            let x = self.x(trace.point_column) - 1;
            self.put(0, x, '.');
        }

        let (lo, hi) = (self.x(0), self.x(self.last_column) + 1);
        for x in lo..=hi {
            self.put(1, x, '-');
        }

        // Divisor and dividend, with any appended zeros.
        let divisor = format!("{} )", trace.scaled_divisor);
        for (x, c) in divisor.chars().enumerate() {
            self.put(2, x, c);
        }
        let columns = trace.columns.as_bytes();
        for column in 0..=self.last_column {
            let digit = columns.get(column).map(|&b| char::from(b)).unwrap_or('0');
            let x = self.x(column);
            self.put(2, x, digit);
        }
        if has_point || trace.point_column < columns.len() {
            let x = self.x(trace.point_column) - 1;
            self.put(2, x, '.');
        }

        // Subtractions, from the first nonzero quotient digit on.
        let first = trace
            .steps
            .iter()
            .position(|s| s.quotient_digit != 0)
            .unwrap_or(trace.steps.len() - 1);
        let mut row = 3;
        for (i, step) in trace.steps.iter().enumerate().skip(first) {
            if i != first {
                self.put_number(row, &step.working_number, step.column);
                row += 1;
            }
            self.put_number(row, &step.product, step.column);
            row += 1;
            let rule_lo = step.working_columns.lo.min(step.product_columns.lo);
            self.put_rule(row, rule_lo, step.column);
            row += 1;
        }
        if let Some(step) = trace.steps.last() {
            self.put_number(row, &step.remainder, step.column);
        }
    }

    fn finish(self) -> String {
        self.rows
            .into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
