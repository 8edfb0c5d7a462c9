//! Display implementation for expressions.
//!
//! Output is plain text the tokenizer reads back:
//! - `x^3/3`
//! - `-3*x^4/4 + 5*x^2/2 - x`
//! - `ln(x)/x`, `exp(2*x)`, `sqrt(x)`
//!
//! # Display Behavior Notes for N-ary AST
//! - Sum displays terms with +/- signs based on leading coefficients
//! - Product splits into numerator and denominator on negative exponents
//! - `e^x` is always displayed as `exp(x)`
//! - `x^(1/2)` is displayed as `sqrt(x)`

use std::fmt;
use std::sync::Arc;

use crate::core::expr::{Expr, ExprKind};
use crate::core::number::Number;

// =============================================================================
// HELPERS
// =============================================================================

/// Term of a sum that reads with a leading minus sign
fn is_negative_term(e: &Expr) -> bool {
    match &e.kind {
        ExprKind::Number(n) => n.is_negative(),
        ExprKind::Product(factors) => factors
            .first()
            .and_then(|f| f.as_number())
            .is_some_and(|n| n.is_negative()),
        _ => false,
    }
}

fn negated(e: &Expr) -> Expr {
    let (c, rest) = e.as_coeff_term();
    Expr::product(vec![Expr::number(c.neg()), rest])
}

/// Negative numeric exponent, as its positive counterpart
fn negative_exponent(exp: &Expr) -> Option<Number> {
    exp.as_number().filter(Number::is_negative).map(Number::neg)
}

/// Render a product factor, wrapping sums
fn factor_str(e: &Expr) -> String {
    if e.is_sum() {
        format!("({e})")
    } else {
        e.to_string()
    }
}

fn needs_base_parens(base: &Expr) -> bool {
    match &base.kind {
        ExprKind::Sum(_) | ExprKind::Product(_) | ExprKind::Pow(..) => true,
        ExprKind::Number(n) => n.is_negative() || (n.is_exact() && n.as_integer().is_none()),
        _ => false,
    }
}

fn needs_exponent_parens(exp: &Expr) -> bool {
    match &exp.kind {
        ExprKind::Number(n) => n.is_negative() || (n.is_exact() && n.as_integer().is_none()),
        ExprKind::Symbol(_) | ExprKind::Constant(_) | ExprKind::FunctionCall { .. } => false,
        _ => true,
    }
}

// =============================================================================
// WRITERS
// =============================================================================

fn write_product(f: &mut fmt::Formatter<'_>, factors: &[Arc<Expr>]) -> fmt::Result {
    let mut coeff = Number::one();
    let mut numer: Vec<String> = Vec::new();
    let mut denom: Vec<String> = Vec::new();

    for factor in factors {
        match &factor.kind {
            ExprKind::Number(n) => coeff = coeff.mul(*n),
            ExprKind::Pow(base, exp) => match negative_exponent(exp) {
                Some(positive) => {
                    denom.push(factor_str(&(**base).clone().pow(Expr::number(positive))));
                }
                None => numer.push(factor_str(factor)),
            },
            _ => numer.push(factor_str(factor)),
        }
    }

    if coeff.is_negative() {
        write!(f, "-")?;
    }
    match coeff.abs() {
        Number::Rational(r) => {
            if *r.numer() != 1 {
                numer.insert(0, r.numer().to_string());
            }
            if *r.denom() != 1 {
                denom.insert(0, r.denom().to_string());
            }
        }
        n @ Number::Float(_) => {
            if !n.is_one() {
                numer.insert(0, n.to_string());
            }
        }
    }

    if numer.is_empty() {
        write!(f, "1")?;
    } else {
        write!(f, "{}", numer.join("*"))?;
    }
    match denom.len() {
        0 => Ok(()),
        1 => write!(f, "/{}", denom[0]),
        _ => write!(f, "/({})", denom.join("*")),
    }
}

fn write_pow(f: &mut fmt::Formatter<'_>, expr: &Expr, base: &Expr, exp: &Expr) -> fmt::Result {
    if exp.as_number() == Some(Number::rational(1, 2)) {
        return write!(f, "sqrt({base})");
    }
    if negative_exponent(exp).is_some() {
        return write_product(f, &[Arc::new(expr.clone())]);
    }
    if needs_base_parens(base) {
        write!(f, "({base})")?;
    } else {
        write!(f, "{base}")?;
    }
    if needs_exponent_parens(exp) {
        write!(f, "^({exp})")
    } else {
        write!(f, "^{exp}")
    }
}

fn write_sum(f: &mut fmt::Formatter<'_>, terms: &[Arc<Expr>]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i == 0 {
            write!(f, "{term}")?;
        } else if is_negative_term(term) {
            let positive = negated(term);
            if positive.is_sum() {
                write!(f, " - ({positive})")?;
            } else {
                write!(f, " - {positive}")?;
            }
        } else {
            write!(f, " + {term}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(n) => write!(f, "{n}"),
            ExprKind::Symbol(s) => write!(f, "{s}"),
            ExprKind::Constant(c) => write!(f, "{}", c.name()),
            ExprKind::Sum(terms) => write_sum(f, terms),
            ExprKind::Product(factors) => write_product(f, factors),
            ExprKind::Pow(base, exp) => write_pow(f, self, base, exp),
            ExprKind::FunctionCall { name, args } => {
                let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
                write!(f, "{name}({})", rendered.join(", "))
            }
            ExprKind::Derivative { inner, var } => write!(f, "diff({inner}, {var})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_power_over_number() {
        let e = x().pow(Expr::integer(3)) / Expr::integer(3);
        assert_eq!(e.to_string(), "x^3/3");
    }

    #[test]
    fn test_polynomial_signs() {
        let e = Expr::rational(-3, 4) * x().pow(Expr::integer(4))
            + Expr::rational(5, 2) * x().pow(Expr::integer(2))
            - x();
        assert_eq!(e.to_string(), "-3*x^4/4 + 5*x^2/2 - x");
    }

    #[test]
    fn test_reciprocals() {
        assert_eq!((Expr::one() / x()).to_string(), "1/x");
        assert_eq!((x().ln() / x()).to_string(), "ln(x)/x");
        assert_eq!((Expr::one() / (Expr::integer(2) * x())).to_string(), "1/(2*x)");
    }

    #[test]
    fn test_roots_and_rational_exponents() {
        assert_eq!(x().sqrt().to_string(), "sqrt(x)");
        assert_eq!(x().pow(Expr::rational(3, 2)).to_string(), "x^(3/2)");
        let radicand = x().pow(Expr::integer(2)) + Expr::one();
        assert_eq!(radicand.pow(Expr::rational(1, 3)).to_string(), "(x^2 + 1)^(1/3)");
    }

    #[test]
    fn test_exp_and_constants() {
        assert_eq!(Expr::e().pow(x()).to_string(), "exp(x)");
        assert_eq!((Expr::integer(2) * Expr::pi()).to_string(), "2*pi");
    }

    #[test]
    fn test_negated_sum_term_keeps_parens() {
        let y = Expr::symbol("y");
        let e = x() * y.clone() - (y.clone() + Expr::one());
        assert_eq!(e.to_string(), "x*y - (y + 1)");
        let leading = x() - (y + Expr::one());
        assert_eq!(leading.to_string(), "-(y + 1) + x");
    }
}
