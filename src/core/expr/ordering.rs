//! Canonical ordering for expressions.
//!
//! `expr_cmp` is a total order: sorting never sees two distinct trees that
//! compare inconsistently, which `slice::sort_by` requires.

use std::cmp::Ordering as CmpOrdering;
use std::sync::LazyLock;

use super::{Expr, ExprKind};
use crate::core::number::Number;

/// Implied exponent of a factor that is not a power
static EXPR_ONE: LazyLock<Expr> = LazyLock::new(Expr::one);

/// Sort key of a term: `-3*x^2` is (base `x`, exponent `2`, coefficient `-3`)
fn extract_key(e: &Expr) -> (&Expr, Option<&Expr>, Number) {
    fn split_pow(e: &Expr) -> (&Expr, Option<&Expr>) {
        match &e.kind {
            ExprKind::Pow(b, exp) => (b, Some(exp)),
            _ => (e, None),
        }
    }

    match &e.kind {
        ExprKind::Product(factors) if factors.len() == 2 => match factors[0].as_number() {
            Some(c) => {
                let (base, exp) = split_pow(&factors[1]);
                (base, exp, c)
            }
            None => (e, None, Number::one()),
        },
        _ => {
            let (base, exp) = split_pow(e);
            (base, exp, Number::one())
        }
    }
}

/// Compare expressions for canonical ordering.
///
/// Numbers come first. Other terms are ordered by base, then exponent, then
/// coefficient, so `x < 2*x < x^2 < sin(x)`.
pub fn expr_cmp(a: &Expr, b: &Expr) -> CmpOrdering {
    match (&a.kind, &b.kind) {
        (ExprKind::Number(x), ExprKind::Number(y)) => return x.total_cmp(y),
        (ExprKind::Number(_), _) => return CmpOrdering::Less,
        (_, ExprKind::Number(_)) => return CmpOrdering::Greater,
        _ => {}
    }

    let (base_a, exp_a, coeff_a) = extract_key(a);
    let (base_b, exp_b, coeff_b) = extract_key(b);

    expr_cmp_type_strict(base_a, base_b)
        .then_with(|| {
            expr_cmp(
                exp_a.unwrap_or(&EXPR_ONE),
                exp_b.unwrap_or(&EXPR_ONE),
            )
        })
        .then_with(|| coeff_a.total_cmp(&coeff_b))
        .then_with(|| expr_cmp_type_strict(a, b))
}

fn rank(kind: &ExprKind) -> u8 {
    match kind {
        ExprKind::Number(_) => 0,
        ExprKind::Constant(_) => 1,
        ExprKind::Symbol(_) => 2,
        ExprKind::Derivative { .. } => 3,
        ExprKind::FunctionCall { .. } => 4,
        ExprKind::Sum(_) => 5,
        ExprKind::Product(_) => 6,
        ExprKind::Pow(..) => 7,
    }
}

fn cmp_children(a: &[std::sync::Arc<Expr>], b: &[std::sync::Arc<Expr>]) -> CmpOrdering {
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b)
            .map(|(x, y)| expr_cmp(x, y))
            .find(|o| o.is_ne())
            .unwrap_or(CmpOrdering::Equal)
    })
}

/// Strict structural comparison: variant rank first, then contents.
/// Order: Number < Constant < Symbol < Derivative < `FunctionCall` < Sum < Product < Pow
pub fn expr_cmp_type_strict(a: &Expr, b: &Expr) -> CmpOrdering {
    use ExprKind::{Constant, Derivative, FunctionCall, Number, Pow, Product, Sum, Symbol};
    match (&a.kind, &b.kind) {
        (Number(x), Number(y)) => x.total_cmp(y),
        (Constant(x), Constant(y)) => x.cmp(y),
        (Symbol(x), Symbol(y)) => x.cmp(y),
        (Derivative { inner: i1, var: v1 }, Derivative { inner: i2, var: v2 }) => {
            v1.cmp(v2).then_with(|| expr_cmp(i1, i2))
        }
        (FunctionCall { name: n1, args: a1 }, FunctionCall { name: n2, args: a2 }) => {
            n1.cmp(n2).then_with(|| cmp_children(a1, a2))
        }
        (Sum(t1), Sum(t2)) | (Product(t1), Product(t2)) => cmp_children(t1, t2),
        (Pow(b1, e1), Pow(b2, e2)) => expr_cmp(b1, b2).then_with(|| expr_cmp(e1, e2)),
        (ka, kb) => rank(ka).cmp(&rank(kb)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_numbers_first() {
        assert_eq!(expr_cmp(&Expr::integer(5), &x()), CmpOrdering::Less);
        assert_eq!(expr_cmp(&Expr::integer(1), &Expr::integer(2)), CmpOrdering::Less);
    }

    #[test]
    fn test_power_ordering() {
        let x2 = x().pow(Expr::integer(2));
        let x3 = Expr::integer(-3) * x().pow(Expr::integer(3));
        assert_eq!(expr_cmp(&x(), &x2), CmpOrdering::Less);
        assert_eq!(expr_cmp(&x2, &x3), CmpOrdering::Less);
    }

    #[test]
    fn test_coefficient_breaks_ties() {
        let two_x = Expr::integer(2) * x();
        assert_eq!(expr_cmp(&x(), &two_x), CmpOrdering::Less);
    }

    #[test]
    fn test_equal_for_identical() {
        let e = x().sin() + x();
        assert_eq!(expr_cmp(&e, &e.clone()), CmpOrdering::Equal);
    }

    #[test]
    fn test_polynomial_sum_is_descending() {
        let e = Expr::integer(5) * x() - Expr::integer(1)
            + Expr::integer(-3) * x().pow(Expr::integer(3));
        let terms = e.terms().map(<[_]>::to_vec).unwrap_or_default();
        assert_eq!(terms.len(), 3);
        assert_eq!(*terms[0], Expr::integer(-3) * x().pow(Expr::integer(3)));
        assert_eq!(*terms[2], Expr::integer(-1));
    }
}
