//! Step-by-Step Symbolic Integration
//!
//! Parses a formula written in ordinary infix notation, integrates it with
//! respect to one variable and explains how, one rule at a time.
//!
//! # Features
//! - Tokenizer and shunting-yard parser with implicit multiplication, unary
//!   minus and multi-argument functions (`root(3, x)`)
//! - Canonical expression trees with exact rational arithmetic
//! - A prioritized rule table producing human-readable integration steps
//! - A general-purpose fallback integrator for everything else
//! - Differentiation and simplification, used to verify antiderivatives
//!
//! # Usage Examples
//!
//! ## String-based API
//! ```
//! use symb_integral::integrate_with_steps;
//!
//! let (integrand, antiderivative, steps) = integrate_with_steps("-3*x^3 + 5*x - 1", "x").unwrap();
//! assert_eq!(integrand.to_string(), "-3*x^3 + 5*x - 1");
//! assert_eq!(antiderivative.to_string(), "-3*x^4/4 + 5*x^2/2 - x");
//! assert!(steps[0].starts_with("Sum rule"));
//! ```
//!
//! ## Type-safe API
//! ```
//! use symb_integral::{Expr, Integrate, sym};
//!
//! let x = sym("x");
//! let expr = x.to_expr() * x.to_expr().exp();
//! let result = Integrate::new().integrate(expr, &x).unwrap();
//! assert_eq!(result.antiderivative.diff(&x), x.to_expr() * x.to_expr().exp());
//! ```

mod builder;
mod core;
mod differentiation;
mod error;
pub mod functions;
pub mod integration;
mod parser;
mod simplification;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use builder::{Integrate, Integration};
pub use crate::core::{
    Constant, Expr, ExprKind, Number, Polynomial, Symbol, SymbolTable, expr_cmp, pattern, sym,
};
pub use error::{IntegralError, Span};
pub use integration::{Derivation, integrate_steps};
pub use parser::{
    Lexer, Operator, RpnToken, Token, TokenKind, build_expression, parse, render_rpn, to_rpn,
    tokenize,
};
pub use simplification::simplify;

/// Suggested `Integrate::max_depth` for untrusted input
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Suggested `Integrate::max_nodes` for untrusted input
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Main API function for step-by-step integration
///
/// # Arguments
/// * `formula` - Expression to integrate (e.g., "x*e^x")
/// * `var` - Integration variable name (e.g., "x")
///
/// # Returns
/// The parsed integrand, its antiderivative (without `+ C`) and the ordered
/// explanation steps
///
/// # Example
/// ```
/// use symb_integral::integrate_with_steps;
///
/// let (_, antiderivative, _) = integrate_with_steps("ln(x)/x", "x").unwrap();
/// assert_eq!(antiderivative.to_string(), "ln(x)^2/2");
/// ```
///
/// # Errors
/// The first failure of any stage: a syntax error, a stack underflow, a
/// malformed expression, or an integration failure.
///
/// # Note
/// No size limits apply here. To bound input size use the `Integrate` builder:
/// ```
/// use symb_integral::Integrate;
/// let result = Integrate::new().max_nodes(500).integrate_str("x^2", "x");
/// assert!(result.is_ok());
/// ```
pub fn integrate_with_steps(
    formula: &str,
    var: &str,
) -> Result<(Expr, Expr, Vec<String>), IntegralError> {
    Integrate::new()
        .integrate_str(formula, var)
        .map(Integration::into_parts)
}
