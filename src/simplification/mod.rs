//! Simplification framework - reduces expressions to canonical form
//!
//! The constructors already fold numbers and merge like terms. A simplify
//! pass adds what they deliberately skip: full expansion of products over
//! sums, small integer powers of sums, and evaluation of catalog functions at
//! exact points. Passes repeat until the tree stops changing.

mod expand;

use tracing::{trace, warn};

use crate::core::expr::Constant;
use crate::functions::{Registry, call};
use crate::{Expr, ExprKind, Number};

pub(crate) use expand::{MAX_EXPANDED_POWER, expand_power, expand_product};

/// Passes before giving up on reaching a fixed point
const MAX_ITERATIONS: usize = 32;

/// Simplify an expression to canonical form
pub fn simplify(expr: Expr) -> Expr {
    let mut current = expr;
    for iteration in 0..MAX_ITERATIONS {
        let next = simplify_pass(&current);
        if next == current {
            trace!(iterations = iteration + 1, "simplify reached fixed point");
            return next;
        }
        current = next;
    }
    warn!(
        max_iterations = MAX_ITERATIONS,
        expr = %current,
        "simplify hit iteration cap"
    );
    current
}

/// One bottom-up rebuild of the tree
fn simplify_pass(expr: &Expr) -> Expr {
    match &expr.kind {
        ExprKind::Number(_) | ExprKind::Symbol(_) | ExprKind::Constant(_) => expr.clone(),

        ExprKind::Sum(terms) => Expr::sum(terms.iter().map(|t| simplify_pass(t)).collect()),

        ExprKind::Product(factors) => {
            expand_product(factors.iter().map(|f| simplify_pass(f)).collect())
        }

        ExprKind::Pow(base, exp) => {
            let base = simplify_pass(base);
            let exp = simplify_pass(exp);
            match exp.as_number().and_then(|n| n.as_integer()) {
                Some(n) if base.is_sum() && (2..=MAX_EXPANDED_POWER).contains(&n) => {
                    expand_power(base, n)
                }
                _ => base.pow(exp),
            }
        }

        ExprKind::FunctionCall { name, args } => {
            let args: Vec<Expr> = args.iter().map(|a| simplify_pass(a)).collect();
            evaluate_function(name, args)
        }

        ExprKind::Derivative { inner, var } => {
            Expr::derivative_of(simplify_pass(inner), var.clone())
        }
    }
}

/// Does the leading coefficient of `e` read negative
fn has_negative_coeff(e: &Expr) -> bool {
    e.as_coeff_term().0.is_negative()
}

fn is_pi(e: &Expr) -> bool {
    matches!(e.kind, ExprKind::Constant(Constant::Pi))
}

/// Rebuild `name(args)`, applying exact-point identities and float evaluation
fn evaluate_function(name: &str, args: Vec<Expr>) -> Expr {
    let arg = match <[Expr; 1]>::try_from(args) {
        Ok([arg]) => arg,
        Err(args) => return Expr::func_multi(name, args),
    };

    // Floating arguments are evaluated numerically
    if let Some(Number::Float(value)) = arg.as_number()
        && let Some(def) = Registry::get(name)
        && let Some(result) = (def.eval)(&[value])
    {
        return Expr::float(result);
    }

    match name {
        "exp" => match arg.as_unary_call("ln") {
            Some(inner) => inner.clone(),
            None => arg.exp(),
        },
        "ln" => {
            if arg.is_one_num() {
                return Expr::zero();
            }
            if matches!(arg.kind, ExprKind::Constant(Constant::E)) {
                return Expr::one();
            }
            match arg.as_unary_call("exp") {
                Some(inner) => inner.clone(),
                None => arg.ln(),
            }
        }
        // Odd functions
        "sin" | "tan" | "asin" | "atan" | "sinh" | "tanh" => {
            if arg.is_zero_num() || (matches!(name, "sin" | "tan") && is_pi(&arg)) {
                return Expr::zero();
            }
            if has_negative_coeff(&arg) {
                return Expr::negate(call(name, Expr::negate(arg)));
            }
            call(name, arg)
        }
        // Even functions
        "cos" | "cosh" => {
            if arg.is_zero_num() {
                return Expr::one();
            }
            if name == "cos" && is_pi(&arg) {
                return Expr::integer(-1);
            }
            if has_negative_coeff(&arg) {
                return call(name, Expr::negate(arg));
            }
            call(name, arg)
        }
        "acos" if arg.is_one_num() => Expr::zero(),
        "abs" => match arg.as_number() {
            Some(n) => Expr::number(n.abs()),
            None => call(name, arg),
        },
        _ => call(name, arg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sym;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_expands_products() {
        let e = Expr::integer(2) * (x() + Expr::one());
        assert_eq!(simplify(e), Expr::integer(2) * x() + Expr::integer(2));
    }

    #[test]
    fn test_expanded_square_cancels() {
        let e = (x() + Expr::one()).pow(Expr::integer(2))
            - x().pow(Expr::integer(2))
            - Expr::integer(2) * x();
        assert_eq!(simplify(e), Expr::one());
    }

    #[test]
    fn test_log_exp_identities() {
        assert_eq!(simplify(x().ln().exp()), x());
        assert_eq!(simplify(x().exp().ln()), x());
        assert_eq!(simplify(Expr::e().ln()), Expr::one());
        assert!(simplify(Expr::one().ln()).is_zero_num());
    }

    #[test]
    fn test_exact_trig_points() {
        assert!(simplify(Expr::zero().sin()).is_zero_num());
        assert_eq!(simplify(Expr::zero().cos()), Expr::one());
        assert!(simplify(Expr::pi().sin()).is_zero_num());
        assert_eq!(simplify(Expr::pi().cos()), Expr::integer(-1));
    }

    #[test]
    fn test_parity() {
        assert_eq!(simplify((-x()).sin()), -(x().sin()));
        assert_eq!(simplify((-x()).cos()), x().cos());
    }

    #[test]
    fn test_float_arguments_evaluate() {
        let e = simplify(Expr::float(0.0).exp());
        assert!(e.is_one_num());
        let s = simplify(Expr::float(1.0).sin());
        assert!(matches!(s.as_number(), Some(Number::Float(v)) if (v - 1f64.sin()).abs() < 1e-12));
    }

    #[test]
    fn test_rational_arguments_stay_symbolic() {
        let e = simplify(Expr::integer(2).ln());
        assert!(e.as_unary_call("ln").is_some());
    }

    #[test]
    fn test_idempotent() {
        let v = sym("x");
        let e = (x().sin() * (x() + Expr::integer(3))).diff(&v);
        assert_eq!(simplify(e.clone()), e);
    }
}
