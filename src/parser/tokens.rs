//! Token types shared by the lexer and the shunting-yard parser.

use std::fmt;

use crate::error::Span;

/// Kinds of input tokens. Whitespace is never tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Name,
    Op,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Name => "NAME",
            TokenKind::Op => "OP",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Comma => "COMMA",
        };
        f.write_str(label)
    }
}

/// A (kind, literal text) pair with its position in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.kind, self.text)
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Binding power of unary minus: above `*` and `/`, below `^`, so
/// `-x^2` is `-(x^2)` and `-3*x` is `(-3)*x`
pub(crate) const NEG_PRECEDENCE: u8 = 25;

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    pub fn from_text(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// Get the precedence level of the operator
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 10,
            Operator::Mul | Operator::Div => 20,
            Operator::Pow => 30,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, Operator::Pow)
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One entry of the postfix sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpnToken {
    Number(String),
    Name(String),
    Op(Operator),
    /// Function application, including the `neg` pseudo-function
    Func(String),
}

impl RpnToken {
    pub fn kind_label(&self) -> &'static str {
        match self {
            RpnToken::Number(_) => "NUMBER",
            RpnToken::Name(_) => "NAME",
            RpnToken::Op(_) => "OP",
            RpnToken::Func(_) => "FUNC",
        }
    }
}

impl fmt::Display for RpnToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpnToken::Number(s) | RpnToken::Name(s) | RpnToken::Func(s) => f.write_str(s),
            RpnToken::Op(op) => write!(f, "{op}"),
        }
    }
}

/// Render an RPN sequence as space-separated values
pub fn render_rpn(rpn: &[RpnToken]) -> String {
    rpn.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_table() {
        assert!(Operator::Mul.precedence() > Operator::Add.precedence());
        assert!(Operator::Pow.precedence() > NEG_PRECEDENCE);
        assert!(NEG_PRECEDENCE > Operator::Div.precedence());
        assert!(Operator::Pow.is_right_associative());
        assert!(!Operator::Sub.is_right_associative());
    }

    #[test]
    fn test_render() {
        let rpn = vec![
            RpnToken::Number("2".into()),
            RpnToken::Name("x".into()),
            RpnToken::Op(Operator::Mul),
            RpnToken::Func("sin".into()),
        ];
        assert_eq!(render_rpn(&rpn), "2 x * sin");
        assert_eq!(rpn[3].kind_label(), "FUNC");
    }

    #[test]
    fn test_operator_from_text() {
        assert_eq!(Operator::from_text("^"), Some(Operator::Pow));
        assert_eq!(Operator::from_text("**"), None);
    }
}
