//! Expression builder: evaluates an RPN sequence into one expression.

use tracing::trace;

use crate::core::expr::Constant;
use crate::error::IntegralError;
use crate::functions::{call, lookup};
use crate::parser::shunting_yard::NEG;
use crate::parser::tokens::{Operator, RpnToken, render_rpn};
use crate::{Expr, Number, Symbol, SymbolTable};

/// Integer literals are exact; anything with a fraction or exponent is a float.
/// Integers too large for `i64` degrade to a float.
fn number_literal(text: &str) -> Result<Expr, IntegralError> {
    if text.bytes().all(|b| b.is_ascii_digit())
        && let Ok(n) = text.parse::<i64>()
    {
        return Ok(Expr::integer(n));
    }
    text.parse::<f64>()
        .map(|f| Expr::number(Number::float(f)))
        .map_err(|_| IntegralError::syntax(format!("invalid number '{text}'")))
}

fn apply_operator(op: Operator, left: Expr, right: Expr) -> Expr {
    match op {
        Operator::Add => left + right,
        Operator::Sub => left - right,
        Operator::Mul => left * right,
        Operator::Div => left / right,
        Operator::Pow => left.pow(right),
    }
}

struct Evaluator<'a> {
    rpn: &'a [RpnToken],
    stack: Vec<Expr>,
}

impl Evaluator<'_> {
    fn pop(&mut self, op: &str, index: usize) -> Result<Expr, IntegralError> {
        self.stack.pop().ok_or_else(|| IntegralError::StackUnderflow {
            op: op.to_owned(),
            index,
            rpn: render_rpn(self.rpn),
        })
    }

    fn apply_function(&mut self, name: &str, index: usize) -> Result<Expr, IntegralError> {
        if name == NEG {
            return Ok(-self.pop(name, index)?);
        }
        Ok(match name.to_ascii_lowercase().as_str() {
            "sqrt" => self.pop(name, index)?.sqrt(),
            "ln" | "log" => self.pop(name, index)?.ln(),
            "root" => {
                // root(n, radicand): the radicand was emitted last
                let radicand = self.pop(name, index)?;
                let degree = self.pop(name, index)?;
                radicand.pow(Expr::one() / degree)
            }
            _ => {
                let arg = self.pop(name, index)?;
                match lookup(name) {
                    Some(canonical) => call(canonical, arg),
                    None => Expr::func(name, arg),
                }
            }
        })
    }
}

/// Evaluate `rpn` with a fresh symbol table seeded with `var`.
///
/// `pi` and `e` (any case) are constants and shadow variables of the same name.
pub fn build_expression(rpn: &[RpnToken], var: &Symbol) -> Result<Expr, IntegralError> {
    let mut symbols = SymbolTable::new(var);
    let mut ev = Evaluator {
        rpn,
        stack: Vec::with_capacity(rpn.len()),
    };

    for (index, token) in rpn.iter().enumerate() {
        let value = match token {
            RpnToken::Number(text) => number_literal(text)?,
            RpnToken::Name(name) => match Constant::from_name(name) {
                Some(c) => Expr::constant(c),
                None => symbols.resolve(name).to_expr(),
            },
            RpnToken::Op(op) => {
                let symbol = op.symbol().to_string();
                let right = ev.pop(&symbol, index)?;
                let left = ev.pop(&symbol, index)?;
                apply_operator(*op, left, right)
            }
            RpnToken::Func(name) => ev.apply_function(name, index)?,
        };
        trace!(index, token = %token, value = %value, "rpn step");
        ev.stack.push(value);
    }

    if ev.stack.len() != 1 {
        return Err(IntegralError::MalformedExpression {
            leftover: ev.stack.iter().map(ToString::to_string).collect(),
            rpn: render_rpn(rpn),
        });
    }
    ev.stack
        .pop()
        .ok_or_else(|| IntegralError::syntax("empty expression"))
}
