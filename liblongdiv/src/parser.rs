//! Parsers for decimal notations, long-division operands and conversion requests.
//!
//! Three grammars are accepted, all over the tokens of the [scanner](crate::scanner):
//!
//! - **decimal notation** ([parse_decimal]), one of
//!   ```text
//!   -?\d+\.\d+            terminating
//!   -?\d+\.\d*\(\d+\)     explicit repeating block
//!   -?\d+\.\d*\.\.\.      ellipsis, repeating block inferred
//!   -?\d+                 integer
//!   ```
//! - **operand** ([parse_operand]), a looser `-?\d*(\.\d*)?` with at least one digit, so that
//!   `.5` and `12.` can be divided;
//! - **request** ([parse_request]), either `operand / operand` or a decimal notation.
//!
//! Parentheses are checked for balance before anything else is parsed, and no arithmetic happens
//! here.

use crate::common::Span;
use crate::errors::{ConversionError, MalformedReason, Result};
use crate::notation::{infer_cycle, DecimalNotation};
use crate::scanner::scan;
use crate::scanner::types::{Token, TokenType};
use crate::trace::Operand;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A parsed conversion request.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Request {
    /// `dividend / divisor`, converted to a decimal.
    Fraction { dividend: Operand, divisor: Operand },
    /// A decimal notation, converted to a fraction.
    Decimal { notation: DecimalNotation, span: Span },
}

impl Request {
    /// Where the request was written in its input.
    pub fn span(&self) -> Span {
        match self {
            Request::Fraction { dividend, divisor } => dividend.span.to(divisor.span),
            Request::Decimal { span, .. } => *span,
        }
    }
}

/// Parses a decimal notation like `0.1(6)`.
pub fn parse_decimal(input: &str) -> Result<DecimalNotation> {
    let mut parser = Parser::new(input)?;
    let (notation, _) = parser.decimal()?;
    parser.expect_eof()?;
    Ok(notation)
}

/// Parses a long-division operand like `1.5`, `.5` or `12.`.
pub fn parse_operand(input: &str) -> Result<Operand> {
    let mut parser = Parser::new(input)?;
    let operand = parser.operand()?;
    parser.expect_eof()?;
    Ok(operand)
}

/// Parses a conversion request: a fraction `a/b` (whitespace around `/` is allowed) or a decimal
/// notation.
pub fn parse_request(input: &str) -> Result<Request> {
    let mut parser = Parser::new(input)?;
    let request = if parser.tokens.iter().any(|t| t.ty == TokenType::Slash) {
        let dividend = parser.operand()?;
        parser.trivia_ok = true;
        parser.expect(TokenType::Slash)?;
        parser.trivia_ok = true;
        let divisor = parser.operand()?;
        Request::Fraction { dividend, divisor }
    } else {
        let (notation, span) = parser.decimal()?;
        Request::Decimal { notation, span }
    };
    parser.expect_eof()?;
    Ok(request)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    /// Whether the next token may be preceded by whitespace.
    trivia_ok: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self> {
        let tokens = scan(input);
        check_parentheses(input, &tokens)?;
        if tokens.len() == 1 {
            return Err(ConversionError::malformed(
                input,
                tokens[0].full_span,
                MalformedReason::Empty,
            ));
        }
        Ok(Self {
            input,
            tokens,
            pos: 0,
            trivia_ok: true,
        })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn next(&mut self) -> Result<Token> {
        let tok = self.peek().clone();
        if tok.has_leading_trivia() && !self.trivia_ok && tok.ty != TokenType::EOF {
            return Err(self.err(
                tok.full_span.lo..tok.span.lo,
                MalformedReason::Unexpected("whitespace".to_owned()),
            ));
        }
        self.trivia_ok = false;
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        Ok(tok)
    }

    /// Consumes the next token if it has type `ty`.
    fn eat(&mut self, ty: TokenType) -> Result<Option<Token>> {
        if self.peek().ty == ty {
            self.next().map(Some)
        } else {
            Ok(None)
        }
    }

    fn eat_digits(&mut self) -> Result<Option<(String, Span)>> {
        if !matches!(self.peek().ty, TokenType::Digits(_)) {
            return Ok(None);
        }
        match self.next()? {
            Token {
                ty: TokenType::Digits(digits),
                span,
                ..
            } => Ok(Some((digits, span))),
            _ => unreachable!(),
        }
    }

    fn expect(&mut self, ty: TokenType) -> Result<Token> {
        match self.eat(ty)? {
            Some(tok) => Ok(tok),
            None => Err(self.unexpected()),
        }
    }

    fn expect_digits(&mut self) -> Result<(String, Span)> {
        match self.eat_digits()? {
            Some(digits) => Ok(digits),
            None => {
                let tok = self.peek();
                Err(self.err(tok.span, MalformedReason::ExpectedDigits(tok.describe())))
            }
        }
    }

    fn expect_eof(&mut self) -> Result<()> {
        self.trivia_ok = true;
        match self.peek().ty {
            TokenType::EOF => Ok(()),
            _ => Err(self.unexpected()),
        }
    }

    fn unexpected(&self) -> ConversionError {
        let tok = self.peek();
        self.err(tok.span, MalformedReason::Unexpected(tok.describe()))
    }

    fn err<S: Into<Span>>(&self, span: S, reason: MalformedReason) -> ConversionError {
        ConversionError::malformed(self.input, span, reason)
    }

    /// Parses a decimal notation, returning it with its span.
    fn decimal(&mut self) -> Result<(DecimalNotation, Span)> {
        let lo = self.peek().span.lo;
        let is_negative = self.eat(TokenType::Minus)?.is_some();
        let (integer_part, int_span) = self.expect_digits()?;
        let mut hi = int_span.hi;

        if self.eat(TokenType::Dot)?.is_none() {
            let notation = DecimalNotation::new(is_negative, integer_part, "", "");
            return Ok((notation, Span::from(lo..hi)));
        }

        let fraction_digits = match self.eat_digits()? {
            Some((digits, span)) => {
                hi = span.hi;
                digits
            }
            None => String::new(),
        };

        let next_ty = self.peek().ty.clone();
        let notation = match next_ty {
            TokenType::OpenParen => {
                self.next()?;
                let (repeating, _) = self.expect_digits()?;
                hi = self.expect(TokenType::CloseParen)?.span.hi;
                DecimalNotation::new(is_negative, integer_part, fraction_digits, repeating)
                    .normalize()
            }
            TokenType::Dot => {
                for _ in 0..3 {
                    hi = self.expect(TokenType::Dot)?.span.hi;
                }
                let (non_repeating, repeating) = infer_cycle(&fraction_digits);
                DecimalNotation::new(is_negative, integer_part, non_repeating, repeating)
                    .normalize()
            }
            _ if fraction_digits.is_empty() => {
                let tok = self.peek();
                return Err(self.err(tok.span, MalformedReason::ExpectedDigits(tok.describe())));
            }
            _ => DecimalNotation::new(is_negative, integer_part, fraction_digits, ""),
        };
        Ok((notation, Span::from(lo..hi)))
    }

    /// Parses a long-division operand.
    fn operand(&mut self) -> Result<Operand> {
        let lo = self.peek().span.lo;
        let is_negative = self.eat(TokenType::Minus)?.is_some();
        let integer = self.eat_digits()?;
        let mut hi = integer.as_ref().map(|(_, span)| span.hi).unwrap_or(lo);

        let mut fraction = None;
        if let Some(dot) = self.eat(TokenType::Dot)? {
            hi = dot.span.hi;
            fraction = self.eat_digits()?;
            if let Some((_, span)) = &fraction {
                hi = span.hi;
            }
        }

        if integer.is_none() && fraction.is_none() {
            let tok = self.peek();
            return Err(self.err(tok.span, MalformedReason::ExpectedDigits(tok.describe())));
        }

        Ok(Operand::new(
            is_negative,
            integer.map(|(digits, _)| digits).unwrap_or_default(),
            fraction.map(|(digits, _)| digits).unwrap_or_default(),
            lo..hi,
        ))
    }
}

/// Fails on the first parenthesis without a partner.
fn check_parentheses(input: &str, tokens: &[Token]) -> Result<()> {
    let mut open = Vec::new();
    for tok in tokens {
        match tok.ty {
            TokenType::OpenParen => open.push(tok.span),
            TokenType::CloseParen => {
                if open.pop().is_none() {
                    return Err(ConversionError::malformed(
                        input,
                        tok.span,
                        MalformedReason::UnbalancedParentheses,
                    ));
                }
            }
            _ => {}
        }
    }
    match open.first() {
        Some(span) => Err(ConversionError::malformed(
            input,
            *span,
            MalformedReason::UnbalancedParentheses,
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! parse_decimal_tests {
        ($($name:ident: $input:expr => $neg:expr, $int:expr, $non_repeating:expr, $repeating:expr)*) => {
        $(
            #[test]
            fn $name() {
                assert_eq!(
                    parse_decimal($input),
                    Ok(DecimalNotation::new($neg, $int, $non_repeating, $repeating))
                );
            }
        )*
        }
    }

    macro_rules! malformed_tests {
        ($($name:ident: $input:expr => $span:expr, $reason:pat)*) => {
        $(
            #[test]
            fn $name() {
                match parse_decimal($input) {
                    Err(ConversionError::MalformedInput { span, reason: $reason, .. }) => {
                        assert_eq!(span, Span::from($span));
                    }
                    other => panic!("expected malformed input, got {:?}", other),
                }
            }
        )*
        }
    }

    mod parse_decimal {
        use super::*;

        parse_decimal_tests! {
            terminating: "1.25" => false, "1", "25", ""
            integer: "7" => false, "7", "", ""
            negative_terminating: "-3.5" => true, "3", "5", ""
            parenthesized: "0.1(6)" => false, "0", "1", "6"
            parenthesized_no_prefix: "0.(3)" => false, "0", "", "3"
            parenthesized_negative: "-2.(142857)" => true, "2", "", "142857"
            parenthesized_zero_cycle: "0.5(0)" => false, "0", "5", ""
            ellipsis_minimal_cycle: "0.333..." => false, "0", "", "3"
            ellipsis_two_digit_cycle: "0.1212..." => false, "0", "", "12"
            ellipsis_fallback_keeps_written_digits: "0.1666..." => false, "0", "166", "6"
            ellipsis_fallback_after_repeat: "0.12344..." => false, "0", "1234", "4"
            ellipsis_partial_tile_mismatch: "0.14141..." => false, "0", "1414", "1"
            ellipsis_partial_tile_prefix: "0.11212..." => false, "0", "1", "12"
            ellipsis_no_digits: "5...." => false, "5", "", ""
            leading_zeros: "007.5" => false, "7", "5", ""
            surrounding_whitespace: "  0.5 " => false, "0", "5", ""
        }
    }

    mod malformed {
        use super::*;

        malformed_tests! {
            empty: "" => 0..0, MalformedReason::Empty
            blank: "   " => 0..3, MalformedReason::Empty
            unclosed_paren: "0.1(2" => 3..4, MalformedReason::UnbalancedParentheses
            unopened_paren: "0.12)" => 4..5, MalformedReason::UnbalancedParentheses
            unbalanced_before_grammar: "x(" => 1..2, MalformedReason::UnbalancedParentheses
            trailing_point: "12." => 3..3, MalformedReason::ExpectedDigits(_)
            leading_point: ".5" => 0..1, MalformedReason::ExpectedDigits(_)
            two_points: "1.2.3" => 4..5, MalformedReason::Unexpected(_)
            two_dots_only: "0.3.." => 5..5, MalformedReason::Unexpected(_)
            four_dots: "0.3...." => 6..7, MalformedReason::Unexpected(_)
            digits_after_cycle: "0.1(6)7" => 6..7, MalformedReason::Unexpected(_)
            empty_cycle: "0.1()" => 4..5, MalformedReason::ExpectedDigits(_)
            letter: "1.2e5" => 3..4, MalformedReason::Unexpected(_)
            interior_whitespace: "0. 5" => 2..3, MalformedReason::Unexpected(_)
            fraction: "1/3" => 1..2, MalformedReason::Unexpected(_)
            non_ascii_digits: "١.٥" => 0..1, MalformedReason::ExpectedDigits(_)
        }
    }

    mod parse_operand {
        use super::*;

        macro_rules! operand_tests {
            ($($name:ident: $input:expr => $display:expr)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(parse_operand($input).unwrap().to_string(), $display);
                }
            )*
            }
        }

        operand_tests! {
            integer: "12" => "12"
            decimal: "1.5" => "1.5"
            leading_point: ".5" => "0.5"
            negative_leading_point: "-.5" => "-0.5"
            trailing_point: "12." => "12"
            trailing_zeros_kept: "1.50" => "1.50"
        }

        #[test]
        fn lone_point() {
            assert!(matches!(
                parse_operand("."),
                Err(ConversionError::MalformedInput {
                    reason: MalformedReason::ExpectedDigits(_),
                    ..
                })
            ));
        }

        #[test]
        fn span() {
            assert_eq!(parse_operand(" -1.5").unwrap().span, Span::from(1..5));
        }
    }

    mod parse_request {
        use super::*;

        #[test]
        fn fraction() {
            match parse_request("1.5 / 0.25").unwrap() {
                Request::Fraction { dividend, divisor } => {
                    assert_eq!(dividend.to_string(), "1.5");
                    assert_eq!(divisor.to_string(), "0.25");
                    assert_eq!(divisor.span, Span::from(6..10));
                }
                other => panic!("expected a fraction, got {:?}", other),
            }
        }

        #[test]
        fn decimal() {
            match parse_request("0.1(6)").unwrap() {
                Request::Decimal { notation, span } => {
                    assert_eq!(notation.to_string(), "0.1(6)");
                    assert_eq!(span, Span::from(0..6));
                }
                other => panic!("expected a decimal, got {:?}", other),
            }
        }

        #[test]
        fn span() {
            assert_eq!(parse_request(" 1 / 20 ").unwrap().span(), Span::from(1..7));
            assert_eq!(parse_request(" -0.5").unwrap().span(), Span::from(1..5));
        }

        #[test]
        fn missing_divisor() {
            assert!(matches!(
                parse_request("1/"),
                Err(ConversionError::MalformedInput {
                    reason: MalformedReason::ExpectedDigits(_),
                    ..
                })
            ));
        }

        #[test]
        fn two_slashes() {
            assert!(matches!(
                parse_request("1/2/3"),
                Err(ConversionError::MalformedInput {
                    reason: MalformedReason::Unexpected(_),
                    ..
                })
            ));
        }

        #[test]
        fn repeating_operand_rejected() {
            assert!(parse_request("0.(3)/2").is_err());
        }
    }
}
