//! Parser module - converts strings to expressions
//!
//! Pipeline: lex -> shunting-yard (RPN) -> build. Each stage is public so it
//! can be inspected on its own; `parse` runs all three.
mod build;
mod lexer;
mod shunting_yard;
mod tokens;

pub use build::build_expression;
pub use lexer::{Lexer, tokenize};
pub use shunting_yard::to_rpn;
pub use tokens::{Operator, RpnToken, Token, TokenKind, render_rpn};

use tracing::debug;

use crate::error::IntegralError;
use crate::{Expr, Symbol};

/// Parse a formula string into an expression
///
/// `var` seeds the symbol table; any other names become free variables on
/// first use, except `pi` and `e` which are always constants.
///
/// # Example
/// ```
/// use symb_integral::{parse, sym};
///
/// let expr = parse("2x + 1", &sym("x")).unwrap();
/// assert_eq!(expr.to_string(), "2*x + 1");
/// ```
///
/// # Errors
/// Returns `IntegralError` if:
/// - The input is empty or contains an unrecognized character
/// - Parentheses are unbalanced or a comma is misplaced
/// - An operator lacks operands, or operands are left over
pub fn parse(input: &str, var: &Symbol) -> Result<Expr, IntegralError> {
    let tokens = tokenize(input)?;
    debug!(input, tokens = tokens.len(), "tokenized");
    let rpn = to_rpn(&tokens)?;
    debug!(rpn = %render_rpn(&rpn), "converted to postfix");
    build_expression(&rpn, var)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::sym;

    #[test]
    fn test_parse_pipeline() {
        let x = sym("x");
        let e = parse("x^2 + sin(x)", &x).unwrap();
        let xe = x.to_expr();
        assert_eq!(e, xe.clone().pow(Expr::integer(2)) + xe.sin());
    }

    #[test]
    fn test_errors_propagate_from_each_stage() {
        let x = sym("x");
        assert!(matches!(parse("x # 1", &x), Err(IntegralError::Syntax { .. })));
        assert!(matches!(parse("(x", &x), Err(IntegralError::Syntax { .. })));
        assert!(matches!(parse("x *", &x), Err(IntegralError::StackUnderflow { .. })));
        assert!(matches!(parse("", &x), Err(IntegralError::Syntax { .. })));
    }
}
