//! Lexer: raw text to a flat token sequence.
//!
//! Recognized patterns, tried at each position after skipping whitespace:
//! - NUMBER: digits, optional `.digits`, optional exponent `e[+-]digits`
//! - NAME: a letter or `_` followed by letters, digits or `_`
//! - OP: one of `+ - * / ^`
//! - `(`, `)` and `,`
//!
//! Anything else is a syntax error naming the character and its position.

use crate::error::{IntegralError, Span};
use crate::parser::tokens::{Operator, Token, TokenKind};

/// Single-pass token iterator over an input string
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    failed: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
            failed: false,
        }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek_at(0).is_some_and(&pred) {
            self.pos += 1;
        }
    }

    fn text(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn lex_number(&mut self) -> Token {
        let start = self.pos;
        self.take_while(|c| c.is_ascii_digit());

        // Fractional part only when a digit follows the dot
        if self.peek_at(0) == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            self.take_while(|c| c.is_ascii_digit());
        }

        // Exponent only when digits follow, so `2e` stays `2` then `e`
        if matches!(self.peek_at(0), Some('e' | 'E')) {
            let digits_at = if matches!(self.peek_at(1), Some('+' | '-')) { 2 } else { 1 };
            if self.peek_at(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += digits_at;
                self.take_while(|c| c.is_ascii_digit());
            }
        }

        Token::new(TokenKind::Number, self.text(start), Span::new(start, self.pos))
    }

    fn lex_name(&mut self) -> Token {
        let start = self.pos;
        self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        Token::new(TokenKind::Name, self.text(start), Span::new(start, self.pos))
    }

    fn single(&mut self, kind: TokenKind, c: char) -> Token {
        let span = Span::at(self.pos);
        self.pos += 1;
        Token::new(kind, c.to_string(), span)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, IntegralError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.take_while(char::is_whitespace);
        let c = self.peek_at(0)?;

        let token = match c {
            '0'..='9' => self.lex_number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_name(),
            '(' => self.single(TokenKind::LParen, c),
            ')' => self.single(TokenKind::RParen, c),
            ',' => self.single(TokenKind::Comma, c),
            c if Operator::from_char(c).is_some() => self.single(TokenKind::Op, c),
            c => {
                self.failed = true;
                return Some(Err(IntegralError::syntax_at(
                    format!("unrecognized character '{c}'"),
                    Span::at(self.pos),
                )));
            }
        };
        Some(Ok(token))
    }
}

/// Tokenize the whole input or fail on the first unrecognized character
pub fn tokenize(input: &str) -> Result<Vec<Token>, IntegralError> {
    Lexer::new(input).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).unwrap().into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_basic_stream() {
        use TokenKind::*;
        assert_eq!(
            kinds("sin(x) + 2*y_1"),
            vec![Name, LParen, Name, RParen, Op, Number, Op, Name]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(texts("3.25"), vec!["3.25"]);
        assert_eq!(texts("1e-3"), vec!["1e-3"]);
        assert_eq!(texts("2E5"), vec!["2E5"]);
        assert_eq!(texts("2e"), vec!["2", "e"]);
        assert_eq!(texts("2ex"), vec!["2", "ex"]);
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(texts("  root ( 3 ,x )"), vec!["root", "(", "3", ",", "x", ")"]);
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("ab + 12").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[2].span, Span::new(5, 7));
    }

    #[test]
    fn test_unrecognized_character() {
        let err = tokenize("x $ 2").unwrap_err();
        assert_eq!(
            err,
            IntegralError::syntax_at("unrecognized character '$'", Span::at(2))
        );
    }

    #[test]
    fn test_dot_without_digits_fails() {
        assert!(tokenize("2.").is_err());
        assert!(tokenize(".5").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("   ").unwrap().is_empty());
    }
}
