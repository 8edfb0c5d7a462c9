//! Operator-precedence parser: tokens to postfix (RPN).
//!
//! Shunting-yard extended with
//! - implicit multiplication (`2x`, `2(x+1)`, `(a)(b)`)
//! - function detection: a NAME directly followed by `(` is a function
//! - unary minus as the `neg` pseudo-function
//! - comma-separated arguments (`root(3, x)`)

use tracing::trace;

use crate::error::IntegralError;
use crate::parser::tokens::{NEG_PRECEDENCE, Operator, RpnToken, Token, TokenKind};

/// Name of the unary minus pseudo-function
pub const NEG: &str = "neg";

/// Entries of the auxiliary operator stack
#[derive(Debug, Clone, PartialEq, Eq)]
enum StackEntry {
    Op(Operator),
    LParen,
    /// Pending function application
    Func(String),
}

/// What the previous input token was, for unary-minus and implicit-`*` decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Number,
    Name,
    Func,
    Op,
    LParen,
    RParen,
    Comma,
}

struct ShuntingYard {
    output: Vec<RpnToken>,
    stack: Vec<StackEntry>,
}

impl ShuntingYard {
    /// Binding power of a stack entry that may be popped by an incoming operator
    fn entry_precedence(entry: &StackEntry) -> Option<u8> {
        match entry {
            StackEntry::Op(op) => Some(op.precedence()),
            StackEntry::Func(name) if name == NEG => Some(NEG_PRECEDENCE),
            _ => None,
        }
    }

    fn push_operator(&mut self, op: Operator) {
        while let Some(top) = self.stack.last() {
            let Some(top_prec) = Self::entry_precedence(top) else {
                break;
            };
            let pops = top_prec > op.precedence()
                || (top_prec == op.precedence() && !op.is_right_associative());
            if !pops {
                break;
            }
            self.pop_to_output();
        }
        self.stack.push(StackEntry::Op(op));
    }

    fn pop_to_output(&mut self) {
        match self.stack.pop() {
            Some(StackEntry::Op(op)) => self.output.push(RpnToken::Op(op)),
            Some(StackEntry::Func(name)) => self.output.push(RpnToken::Func(name)),
            Some(StackEntry::LParen) | None => {}
        }
    }

    /// Pop until an LPAREN is on top; `false` if the stack ran out
    fn pop_until_lparen(&mut self) -> bool {
        loop {
            match self.stack.last() {
                Some(StackEntry::LParen) => return true,
                Some(_) => self.pop_to_output(),
                None => return false,
            }
        }
    }
}

/// Convert a token sequence to postfix order
pub fn to_rpn(tokens: &[Token]) -> Result<Vec<RpnToken>, IntegralError> {
    if tokens.is_empty() {
        return Err(IntegralError::syntax("empty expression"));
    }

    let mut sy = ShuntingYard {
        output: Vec::with_capacity(tokens.len()),
        stack: Vec::new(),
    };
    let mut prev: Option<Prev> = None;

    for (i, token) in tokens.iter().enumerate() {
        // Implicit multiplication: value followed by a value start
        let starts_value = matches!(
            token.kind,
            TokenKind::Name | TokenKind::LParen | TokenKind::Number
        );
        if starts_value && matches!(prev, Some(Prev::Number | Prev::Name | Prev::RParen)) {
            trace!(at = token.span.start, "implicit multiplication");
            sy.push_operator(Operator::Mul);
        }

        prev = Some(match token.kind {
            TokenKind::Number => {
                sy.output.push(RpnToken::Number(token.text.clone()));
                Prev::Number
            }
            TokenKind::Name => {
                let is_call = tokens
                    .get(i + 1)
                    .is_some_and(|next| next.kind == TokenKind::LParen);
                if is_call {
                    sy.stack.push(StackEntry::Func(token.text.clone()));
                    Prev::Func
                } else {
                    sy.output.push(RpnToken::Name(token.text.clone()));
                    Prev::Name
                }
            }
            TokenKind::Op => {
                let op = Operator::from_text(&token.text).ok_or_else(|| {
                    IntegralError::syntax_at(
                        format!("unknown operator '{}'", token.text),
                        token.span,
                    )
                })?;
                let unary = op == Operator::Sub
                    && matches!(prev, None | Some(Prev::Op | Prev::LParen | Prev::Comma));
                if unary {
                    sy.stack.push(StackEntry::Func(NEG.to_owned()));
                } else {
                    sy.push_operator(op);
                }
                Prev::Op
            }
            TokenKind::LParen => {
                sy.stack.push(StackEntry::LParen);
                Prev::LParen
            }
            TokenKind::RParen => {
                if !sy.pop_until_lparen() {
                    return Err(IntegralError::syntax_at(
                        "mismatched parentheses",
                        token.span,
                    ));
                }
                sy.stack.pop();
                // Complete a pending call. `neg` is a prefix operator, not a call:
                // it stays until precedence pops it, so `-(x)^2` reads as `-(x^2)`
                // like `-x^2`. Popping every function marker here, as a plain
                // shunting-yard does, would give `(-x)^2` instead.
                if let Some(StackEntry::Func(name)) = sy.stack.last()
                    && name != NEG
                {
                    sy.pop_to_output();
                }
                Prev::RParen
            }
            TokenKind::Comma => {
                if !sy.pop_until_lparen() {
                    return Err(IntegralError::syntax_at("misplaced comma", token.span));
                }
                Prev::Comma
            }
        });
    }

    while let Some(entry) = sy.stack.last() {
        if *entry == StackEntry::LParen {
            return Err(IntegralError::syntax("mismatched parentheses"));
        }
        sy.pop_to_output();
    }

    Ok(sy.output)
}
