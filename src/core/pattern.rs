//! Coefficient extraction against linear templates.
//!
//! `match_linear(e, x)` plays the role of matching `e` against `A*x` with a
//! wildcard `A` that may not contain `x`. A failed match is `None`, never an
//! error.

use crate::core::expr::Expr;
use crate::core::poly::Polynomial;
use crate::core::symbol::Symbol;

/// Recover `A` from `expr = A*var`, with `A` free of `var` and nonzero
pub fn match_linear(expr: &Expr, var: &Symbol) -> Option<Expr> {
    let (a, b) = match_affine(expr, var)?;
    b.is_zero_num().then_some(a)
}

/// Recover `(A, B)` from `expr = A*var + B`, with `A` nonzero
pub fn match_affine(expr: &Expr, var: &Symbol) -> Option<(Expr, Expr)> {
    let p = Polynomial::from_expr(expr, var)?;
    (p.degree() == 1).then(|| (p.coeff(1), p.coeff(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::sym;

    #[test]
    fn test_linear_matches() {
        let x = sym("x");
        let xe = x.to_expr();
        assert_eq!(match_linear(&xe, &x), Some(Expr::one()));
        assert_eq!(match_linear(&(Expr::integer(3) * xe.clone()), &x), Some(Expr::integer(3)));
        let a = Expr::symbol("a");
        assert_eq!(match_linear(&(a.clone() * xe), &x), Some(a));
    }

    #[test]
    fn test_linear_rejects() {
        let x = sym("x");
        let xe = x.to_expr();
        assert_eq!(match_linear(&(xe.clone() + Expr::one()), &x), None);
        assert_eq!(match_linear(&xe.clone().pow(Expr::integer(2)), &x), None);
        assert_eq!(match_linear(&Expr::integer(5), &x), None);
        assert_eq!(match_linear(&xe.sin(), &x), None);
    }

    #[test]
    fn test_affine() {
        let x = sym("x");
        let e = Expr::integer(2) * x.to_expr() - Expr::integer(3);
        assert_eq!(match_affine(&e, &x), Some((Expr::integer(2), Expr::integer(-3))));
    }
}
