//! Turns conversion inputs into spanned tokens.

pub mod types;

use crate::utils::PeekIter;
use types::*;

/// Scans `input` into tokens. The last token is always [EOF](TokenType::EOF).
///
/// Scanning never fails; characters outside the decimal alphabet become
/// [Invalid](TokenType::Invalid) tokens for the parser to report.
pub fn scan<T: Into<String>>(input: T) -> Vec<Token> {
    let mut scanner = Scanner::new(input);
    scanner.scan();
    scanner.output
}

struct Scanner {
    input: PeekIter<char>,
    output: Vec<Token>,
}

impl Scanner {
    fn new<T: Into<String>>(input: T) -> Scanner {
        let chars: Vec<char> = input.into().chars().collect();

        Scanner {
            input: PeekIter::new(chars.into_iter()),
            output: Vec::new(),
        }
    }

    fn scan(&mut self) {
        loop {
            let full_lo = self.input.pos();
            self.input.collect_while::<_, String>(|c| c.is_whitespace());
            let lo = self.input.pos();

            let ty = match self.input.peek().copied() {
                None => {
                    self.output.push(Token::new(TokenType::EOF, lo..lo, full_lo..lo));
                    return;
                }
                Some(c) if c.is_ascii_digit() => {
                    TokenType::Digits(self.input.collect_while(|c| c.is_ascii_digit()))
                }
                Some(_) => self.scan_symbol(),
            };

            let hi = self.input.pos();
            self.output.push(Token::new(ty, lo..hi, full_lo..hi));
        }
    }

    fn scan_symbol(&mut self) -> TokenType {
        use TokenType::*;
        match self.input.next() {
            Some('.') => Dot,
            Some('-') => Minus,
            Some('/') => Slash,
            Some('(') => OpenParen,
            Some(')') => CloseParen,
            Some(c) => Invalid(c.to_string()),
            None => EOF,
        }
    }
}
