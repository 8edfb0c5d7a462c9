//! Dense univariate polynomials over coefficients free of the variable.
//!
//! `Polynomial::from_expr` answers "is this a polynomial in
//! `x`?" and, if so, exposes its coefficients.

use crate::core::expr::{Expr, ExprKind};
use crate::core::symbol::Symbol;

/// Degrees above this are not treated as polynomials; keeps `x^1000000`
/// from allocating a million coefficients
pub(crate) const MAX_DEGREE: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    var: Symbol,
    /// `coeffs[i]` multiplies `var^i`; no trailing zeros
    coeffs: Vec<Expr>,
}

impl Polynomial {
    pub fn constant(var: &Symbol, c: Expr) -> Self {
        let mut p = Polynomial {
            var: var.clone(),
            coeffs: vec![c],
        };
        p.trim();
        p
    }

    /// The polynomial `var`
    pub fn var(var: &Symbol) -> Self {
        Polynomial {
            var: var.clone(),
            coeffs: vec![Expr::zero(), Expr::one()],
        }
    }

    /// Decompose `expr` as a polynomial in `var`, or `None` if it is not one
    pub fn from_expr(expr: &Expr, var: &Symbol) -> Option<Self> {
        if expr.is_free_of(var) {
            return Some(Self::constant(var, expr.clone()));
        }
        match &expr.kind {
            ExprKind::Symbol(s) if s == var => Some(Self::var(var)),
            ExprKind::Sum(terms) => terms.iter().try_fold(
                Self::constant(var, Expr::zero()),
                |acc, t| Some(acc.add(&Self::from_expr(t, var)?)),
            ),
            ExprKind::Product(factors) => factors.iter().try_fold(
                Self::constant(var, Expr::one()),
                |acc, f| acc.mul(&Self::from_expr(f, var)?),
            ),
            ExprKind::Pow(base, exp) => {
                let n = usize::try_from(exp.as_number()?.as_integer()?).ok()?;
                let b = Self::from_expr(base, var)?;
                if n.checked_mul(b.degree())? > MAX_DEGREE {
                    return None;
                }
                if let Some(c) = b.monomial_coeff() {
                    let mut coeffs = vec![Expr::zero(); n * b.degree() + 1];
                    coeffs[n * b.degree()] = c.pow(Expr::integer(i64::try_from(n).ok()?));
                    let mut p = Polynomial {
                        var: var.clone(),
                        coeffs,
                    };
                    p.trim();
                    return Some(p);
                }
                (0..n).try_fold(Self::constant(var, Expr::one()), |acc, _| acc.mul(&b))
            }
            _ => None,
        }
    }

    fn trim(&mut self) {
        while self.coeffs.len() > 1 && self.coeffs.last().is_some_and(Expr::is_zero_num) {
            self.coeffs.pop();
        }
        if self.coeffs.is_empty() {
            self.coeffs.push(Expr::zero());
        }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn coeffs(&self) -> &[Expr] {
        &self.coeffs
    }

    /// Coefficient of `var^i`
    pub fn coeff(&self, i: usize) -> Expr {
        self.coeffs.get(i).cloned().unwrap_or_else(Expr::zero)
    }

    /// Leading coefficient when every lower coefficient is zero
    fn monomial_coeff(&self) -> Option<Expr> {
        let (lead, lower) = self.coeffs.split_last()?;
        lower.iter().all(Expr::is_zero_num).then(|| lead.clone())
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    pub fn is_zero(&self) -> bool {
        self.is_constant() && self.coeffs[0].is_zero_num()
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut p = Polynomial {
            var: self.var.clone(),
            coeffs: (0..len)
                .map(|i| Expr::sum(vec![self.coeff(i), other.coeff(i)]))
                .collect(),
        };
        p.trim();
        p
    }

    /// Product, or `None` when the degree would exceed `MAX_DEGREE`
    pub fn mul(&self, other: &Polynomial) -> Option<Polynomial> {
        let degree = self.degree() + other.degree();
        if degree > MAX_DEGREE {
            return None;
        }
        let mut buckets: Vec<Vec<Expr>> = vec![Vec::new(); degree + 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                buckets[i + j].push(Expr::product(vec![a.clone(), b.clone()]));
            }
        }
        let mut p = Polynomial {
            var: self.var.clone(),
            coeffs: buckets.into_iter().map(Expr::sum).collect(),
        };
        p.trim();
        Some(p)
    }

    /// Derivative with respect to the polynomial variable
    pub fn derivative(&self) -> Polynomial {
        let coeffs: Vec<Expr> = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| {
                let i = i64::try_from(i).unwrap_or(i64::MAX);
                Expr::product(vec![Expr::integer(i), c.clone()])
            })
            .collect();
        if coeffs.is_empty() {
            return Self::constant(&self.var, Expr::zero());
        }
        let mut p = Polynomial {
            var: self.var.clone(),
            coeffs,
        };
        p.trim();
        p
    }

    /// Rebuild as an expression in canonical form
    pub fn to_expr(&self) -> Expr {
        let x = self.var.to_expr();
        Expr::sum(
            self.coeffs
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let i = i64::try_from(i).unwrap_or(i64::MAX);
                    Expr::product(vec![c.clone(), x.clone().pow(Expr::integer(i))])
                })
                .collect(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::core::symbol::sym;

    #[test]
    fn test_accepts_polynomials() {
        let x = sym("x");
        let xe = x.to_expr();
        let e = Expr::integer(3) * xe.clone().pow(Expr::integer(2)) - xe + Expr::integer(7);
        let p = Polynomial::from_expr(&e, &x).unwrap();
        assert_eq!(p.degree(), 2);
        assert_eq!(p.coeff(0), Expr::integer(7));
        assert_eq!(p.coeff(1), Expr::integer(-1));
        assert_eq!(p.coeff(2), Expr::integer(3));
        assert_eq!(p.to_expr(), e);
    }

    #[test]
    fn test_rejects_non_polynomials() {
        let x = sym("x");
        let xe = x.to_expr();
        assert!(Polynomial::from_expr(&xe.clone().sin(), &x).is_none());
        assert!(Polynomial::from_expr(&(Expr::one() / xe.clone()), &x).is_none());
        assert!(Polynomial::from_expr(&xe.sqrt(), &x).is_none());
    }

    #[test]
    fn test_symbolic_coefficients() {
        let x = sym("x");
        let a = Expr::symbol("a");
        let e = a.clone() * x.to_expr() + a.clone().sin();
        let p = Polynomial::from_expr(&e, &x).unwrap();
        assert_eq!(p.coeff(1), a.clone());
        assert_eq!(p.coeff(0), a.sin());
    }

    #[test]
    fn test_expanded_power() {
        let x = sym("x");
        let e = (x.to_expr() + Expr::one()).pow(Expr::integer(2));
        let p = Polynomial::from_expr(&e, &x).unwrap();
        assert_eq!(p.coeff(1), Expr::integer(2));
        assert_eq!(p.derivative().coeff(0), Expr::integer(2));
    }

    #[test]
    fn test_high_degree_accepted() {
        let x = sym("x");
        let p = Polynomial::from_expr(&x.to_expr().pow(Expr::integer(65)), &x).unwrap();
        assert_eq!(p.degree(), 65);
        assert_eq!(p.coeff(65), Expr::one());
        assert_eq!(p.coeff(64), Expr::zero());

        let shifted = (x.to_expr() + Expr::one()).pow(Expr::integer(70));
        assert_eq!(Polynomial::from_expr(&shifted, &x).unwrap().degree(), 70);
    }

    #[test]
    fn test_degree_cap() {
        let x = sym("x");
        let too_big = i64::try_from(MAX_DEGREE + 1).unwrap();
        assert!(Polynomial::from_expr(&x.to_expr().pow(Expr::integer(too_big)), &x).is_none());
        let scaled = Expr::integer(3) * x.to_expr();
        let p = Polynomial::from_expr(&scaled.pow(Expr::integer(4)), &x).unwrap();
        assert_eq!(p.coeff(4), Expr::integer(81));
    }
}
