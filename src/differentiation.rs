// Differentiation engine - applies calculus rules.
//
// `derive` builds the raw derivative through the canonical constructors, which
// already drop zero terms and unit factors. `diff` additionally simplifies and
// is what the integrator uses to check and produce `du` in integration by parts.

use crate::functions::Registry;
use crate::simplification::simplify;
use crate::{Expr, ExprKind, Symbol};

impl Expr {
    /// Differentiate with respect to `var` without a final simplification pass
    pub fn derive(&self, var: &Symbol) -> Expr {
        if self.is_free_of(var) {
            return Expr::zero();
        }

        match &self.kind {
            ExprKind::Number(_) | ExprKind::Constant(_) => Expr::zero(),

            ExprKind::Symbol(s) => {
                if s == var {
                    Expr::one()
                } else {
                    Expr::zero()
                }
            }

            // Sum rule
            ExprKind::Sum(terms) => Expr::sum(terms.iter().map(|t| t.derive(var)).collect()),

            // Product rule: sum over i of (f_i' * prod_{j != i} f_j)
            ExprKind::Product(factors) => {
                let mut terms = Vec::with_capacity(factors.len());
                for (i, factor) in factors.iter().enumerate() {
                    let d = factor.derive(var);
                    if d.is_zero_num() {
                        continue;
                    }
                    let mut parts: Vec<Expr> = Vec::with_capacity(factors.len());
                    parts.push(d);
                    parts.extend(
                        factors
                            .iter()
                            .enumerate()
                            .filter(|&(j, _)| j != i)
                            .map(|(_, f)| (**f).clone()),
                    );
                    terms.push(Expr::product(parts));
                }
                Expr::sum(terms)
            }

            ExprKind::Pow(base, exp) => derive_pow(base, exp, var),

            ExprKind::FunctionCall { name, args } => {
                let arg_primes: Vec<Expr> = args.iter().map(|a| a.derive(var)).collect();
                match Registry::get(name) {
                    Some(def) if def.validate_arity(args.len()) => {
                        let args: Vec<Expr> = args.iter().map(|a| (**a).clone()).collect();
                        (def.derivative)(&args, &arg_primes)
                    }
                    // Uninterpreted function: keep an unevaluated derivative
                    _ => Expr::derivative_of(self.clone(), var.clone()),
                }
            }

            ExprKind::Derivative { .. } => Expr::derivative_of(self.clone(), var.clone()),
        }
    }

    /// Differentiate with respect to `var` and simplify the result
    pub fn diff(&self, var: &Symbol) -> Expr {
        simplify(self.derive(var))
    }
}

/// d/dx u^v, specialised for constant exponents and constant bases
fn derive_pow(base: &Expr, exp: &Expr, var: &Symbol) -> Expr {
    let u = base.clone();
    let v = exp.clone();

    if exp.is_free_of(var) {
        // d/dx u^n = n * u^(n-1) * u'
        let reduced = u.clone().pow(v.clone() - Expr::one());
        return Expr::product(vec![v, reduced, base.derive(var)]);
    }

    let power = u.clone().pow(v.clone());
    if base.is_free_of(var) {
        // d/dx a^v = a^v * ln(a) * v'
        return Expr::product(vec![power, u.ln(), exp.derive(var)]);
    }

    // d/dx u^v = u^v * (v' * ln(u) + v * u' / u)
    let inner = Expr::sum(vec![
        Expr::product(vec![exp.derive(var), u.clone().ln()]),
        Expr::product(vec![v, base.derive(var), u.pow(Expr::integer(-1))]),
    ]);
    Expr::product(vec![power, inner])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::sym;

    #[test]
    fn test_power_rule() {
        let x = sym("x");
        let e = x.to_expr().pow(Expr::integer(3));
        assert_eq!(e.diff(&x), Expr::integer(3) * x.to_expr().pow(Expr::integer(2)));
    }

    #[test]
    fn test_chain_rule_through_exp() {
        let x = sym("x");
        let e = (Expr::integer(2) * x.to_expr()).exp();
        assert_eq!(e.diff(&x), Expr::integer(2) * e.clone());
    }

    #[test]
    fn test_product_rule() {
        let x = sym("x");
        let xe = x.to_expr();
        let e = xe.clone() * xe.clone().sin();
        let expected = xe.clone().sin() + xe.clone() * xe.cos();
        assert_eq!(e.diff(&x), expected);
    }

    #[test]
    fn test_log_derivative() {
        let x = sym("x");
        let e = x.to_expr().ln();
        assert_eq!(e.diff(&x), Expr::one() / x.to_expr());
    }

    #[test]
    fn test_exponential_base() {
        let x = sym("x");
        let e = Expr::integer(2).pow(x.to_expr());
        let expected = Expr::integer(2).pow(x.to_expr()) * Expr::integer(2).ln();
        assert_eq!(e.diff(&x), expected);
    }

    #[test]
    fn test_uninterpreted_function() {
        let x = sym("x");
        let f = Expr::func("f", x.to_expr());
        assert!(matches!(f.diff(&x).kind(), ExprKind::Derivative { .. }));
        assert!(Expr::func("f", Expr::symbol("y")).diff(&x).is_zero_num());
    }

    #[test]
    fn test_constants_vanish() {
        let x = sym("x");
        assert!(Expr::pi().diff(&x).is_zero_num());
        assert!(Expr::symbol("a").diff(&x).is_zero_num());
    }
}
