//! Definitions of types used in the liblongdiv scanner.

use crate::common::Span;
use core::fmt;

/// The type of a [Token][Token].
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum TokenType {
    /// A run of ASCII digits, kept as written (leading zeros included).
    Digits(String),

    /// . symbol
    Dot,

    /// - symbol
    Minus,

    /// / symbol
    Slash,

    /// ( symbol
    OpenParen,

    /// ) symbol
    CloseParen,

    /// An invalid token.
    Invalid(String),

    /// End of input.
    EOF,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenType::*;
        match self {
            Digits(s) => write!(f, "{}", s),
            Dot => write!(f, "."),
            Minus => write!(f, "-"),
            Slash => write!(f, "/"),
            OpenParen => write!(f, "("),
            CloseParen => write!(f, ")"),
            Invalid(s) => write!(f, "{}", s),
            EOF => write!(f, "end of input"),
        }
    }
}

/// Describes a token in a conversion input.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Token {
    /// The type of the token.
    pub ty: TokenType,
    /// The source span of the token.
    pub span: Span,
    /// The full span of the token including its leading whitespace.
    pub full_span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new<Sp1, Sp2>(ty: TokenType, span: Sp1, full_span: Sp2) -> Self
    where
        Sp1: Into<Span>,
        Sp2: Into<Span>,
    {
        Self {
            ty,
            span: span.into(),
            full_span: full_span.into(),
        }
    }

    /// Whether whitespace precedes the token.
    pub fn has_leading_trivia(&self) -> bool {
        self.full_span.lo != self.span.lo
    }

    /// Describes the token for diagnostics, like `"x"` or `end of input`.
    pub fn describe(&self) -> String {
        match self.ty {
            TokenType::EOF => self.ty.to_string(),
            _ => format!("\"{}\"", self.ty),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)
    }
}
