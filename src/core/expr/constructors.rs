//! Expression constructors.
//!
//! Every node is built here. Sums and products come out flat, folded, merged
//! and sorted, so structurally equal inputs always give equal trees.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::{Constant, Expr, ExprKind, compute_expr_hash, expr_cmp, unwrap_arc};
use crate::core::number::Number;
use crate::core::symbol::Symbol;

impl Expr {
    pub(crate) fn new(kind: ExprKind) -> Self {
        let hash = compute_expr_hash(&kind);
        Expr { hash, kind }
    }

    // -------------------------------------------------------------------------
    // Basic constructors
    // -------------------------------------------------------------------------

    pub fn number(n: Number) -> Self {
        Self::new(ExprKind::Number(n))
    }

    pub fn integer(n: i64) -> Self {
        Self::number(Number::integer(n))
    }

    pub fn rational(numer: i64, denom: i64) -> Self {
        Self::number(Number::rational(numer, denom))
    }

    pub fn float(value: f64) -> Self {
        Self::number(Number::float(value))
    }

    pub fn zero() -> Self {
        Self::integer(0)
    }

    pub fn one() -> Self {
        Self::integer(1)
    }

    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::from_symbol(Symbol::new(name))
    }

    pub fn from_symbol(symbol: Symbol) -> Self {
        Self::new(ExprKind::Symbol(symbol))
    }

    pub fn constant(c: Constant) -> Self {
        Self::new(ExprKind::Constant(c))
    }

    pub fn pi() -> Self {
        Self::constant(Constant::Pi)
    }

    pub fn e() -> Self {
        Self::constant(Constant::E)
    }

    /// Unary function call. `exp` is routed through [`Expr::exp`].
    pub fn func(name: impl AsRef<str>, arg: Expr) -> Self {
        let name = name.as_ref();
        if name == "exp" {
            return arg.exp();
        }
        Self::new(ExprKind::FunctionCall {
            name: Arc::from(name),
            args: vec![Arc::new(arg)],
        })
    }

    /// Function call with any number of arguments
    pub fn func_multi(name: impl AsRef<str>, args: Vec<Expr>) -> Self {
        match <[Expr; 1]>::try_from(args) {
            Ok([arg]) => Self::func(name, arg),
            Err(args) => Self::new(ExprKind::FunctionCall {
                name: Arc::from(name.as_ref()),
                args: args.into_iter().map(Arc::new).collect(),
            }),
        }
    }

    pub(crate) fn derivative_of(inner: Expr, var: Symbol) -> Self {
        Self::new(ExprKind::Derivative {
            inner: Arc::new(inner),
            var,
        })
    }

    // -------------------------------------------------------------------------
    // Elementary functions
    // -------------------------------------------------------------------------

    /// `exp(self)`; `exp(0) = 1` and `exp(1) = e`
    pub fn exp(self) -> Expr {
        if self.is_zero_num() {
            return Expr::one();
        }
        if self.is_one_num() {
            return Expr::e();
        }
        Self::new(ExprKind::FunctionCall {
            name: Arc::from("exp"),
            args: vec![Arc::new(self)],
        })
    }

    /// Natural logarithm
    pub fn ln(self) -> Expr {
        Self::func("ln", self)
    }

    /// `self^(1/2)`
    pub fn sqrt(self) -> Expr {
        self.pow(Expr::rational(1, 2))
    }

    pub fn sin(self) -> Expr {
        Self::func("sin", self)
    }

    pub fn cos(self) -> Expr {
        Self::func("cos", self)
    }

    pub fn tan(self) -> Expr {
        Self::func("tan", self)
    }

    // -------------------------------------------------------------------------
    // N-ary Sum constructor
    // -------------------------------------------------------------------------

    /// Create a sum expression from terms.
    ///
    /// Flattens nested sums, folds numbers, combines like terms (`2x + 3x`
    /// becomes `5x`), drops zero terms and sorts the result in descending
    /// canonical order, numbers last.
    pub fn sum(terms: Vec<Expr>) -> Expr {
        let mut flat: Vec<Expr> = Vec::with_capacity(terms.len());
        for t in terms {
            match t.kind {
                ExprKind::Sum(inner) => flat.extend(inner.into_iter().map(unwrap_arc)),
                _ => flat.push(t),
            }
        }

        let mut constant = Number::zero();
        let mut rests: Vec<Expr> = Vec::with_capacity(flat.len());
        let mut coeffs: Vec<Number> = Vec::with_capacity(flat.len());
        let mut index: FxHashMap<Expr, usize> = FxHashMap::default();

        for t in flat {
            if let ExprKind::Number(n) = t.kind {
                constant = constant.add(n);
                continue;
            }
            let (c, rest) = t.as_coeff_term();
            if let Some(&i) = index.get(&rest) {
                coeffs[i] = coeffs[i].add(c);
            } else {
                index.insert(rest.clone(), rests.len());
                rests.push(rest);
                coeffs.push(c);
            }
        }

        let mut out: Vec<Expr> = rests
            .into_iter()
            .zip(coeffs)
            .filter(|(_, c)| !c.is_zero())
            .map(|(rest, c)| Expr::scaled(c, rest))
            .collect();
        if !constant.is_zero() {
            out.push(Expr::number(constant));
        }

        match out.len() {
            0 => Expr::zero(),
            1 => out.pop().unwrap_or_else(Expr::zero),
            _ => {
                out.sort_by(|a, b| expr_cmp(b, a));
                Self::new(ExprKind::Sum(out.into_iter().map(Arc::new).collect()))
            }
        }
    }

    /// `c * rest` where `rest` is already canonical and carries no coefficient
    fn scaled(c: Number, rest: Expr) -> Expr {
        if c.is_one() {
            return rest;
        }
        let mut factors = vec![Arc::new(Expr::number(c))];
        match rest.kind {
            ExprKind::Product(inner) => factors.extend(inner),
            ExprKind::Number(n) => return Expr::number(c.mul(n)),
            _ => factors.push(Arc::new(rest)),
        }
        Self::new(ExprKind::Product(factors))
    }

    // -------------------------------------------------------------------------
    // N-ary Product constructor
    // -------------------------------------------------------------------------

    /// Create a product expression from factors.
    ///
    /// Flattens nested products, folds numbers into one leading coefficient,
    /// merges like bases by adding exponents (`x * x^2` becomes `x^3`,
    /// `exp(a) * exp(b)` becomes `exp(a + b)`) and sorts the factors.
    pub fn product(factors: Vec<Expr>) -> Expr {
        let mut flat: Vec<Expr> = Vec::with_capacity(factors.len());
        for f in factors {
            match f.kind {
                ExprKind::Product(inner) => flat.extend(inner.into_iter().map(unwrap_arc)),
                _ => flat.push(f),
            }
        }

        let mut coeff = Number::one();
        let mut bases: Vec<Expr> = Vec::with_capacity(flat.len());
        let mut exponents: Vec<Vec<Expr>> = Vec::with_capacity(flat.len());
        let mut index: FxHashMap<Expr, usize> = FxHashMap::default();

        for f in flat {
            if let ExprKind::Number(n) = f.kind {
                coeff = coeff.mul(n);
                continue;
            }
            let (base, exp) = f.into_base_exp();
            if let Some(&i) = index.get(&base) {
                exponents[i].push(exp);
            } else {
                index.insert(base.clone(), bases.len());
                bases.push(base);
                exponents.push(vec![exp]);
            }
        }

        if coeff.is_zero() {
            return Expr::zero();
        }

        let mut rebuilt: Vec<Expr> = Vec::with_capacity(bases.len());
        let mut needs_regroup = false;
        for (base, exps) in bases.into_iter().zip(exponents) {
            let merged = base.pow(Expr::sum(exps));
            match merged.kind {
                ExprKind::Number(n) => coeff = coeff.mul(n),
                ExprKind::Product(_) => {
                    needs_regroup = true;
                    rebuilt.push(merged);
                }
                _ => rebuilt.push(merged),
            }
        }

        if needs_regroup {
            rebuilt.push(Expr::number(coeff));
            return Expr::product(rebuilt);
        }
        if coeff.is_zero() {
            return Expr::zero();
        }

        rebuilt.sort_by(expr_cmp);
        let mut out: Vec<Arc<Expr>> = Vec::with_capacity(rebuilt.len() + 1);
        if !coeff.is_one() {
            out.push(Arc::new(Expr::number(coeff)));
        }
        out.extend(rebuilt.into_iter().map(Arc::new));
        Self::product_from_sorted(out)
    }

    /// Wrap factors that are already canonical and sorted
    pub(crate) fn product_from_sorted(mut factors: Vec<Arc<Expr>>) -> Expr {
        match factors.len() {
            0 => Expr::one(),
            1 => factors.pop().map_or_else(Expr::one, unwrap_arc),
            _ => Self::new(ExprKind::Product(factors)),
        }
    }

    /// View a factor as `base^exponent`; `exp(u)` is `e^u`
    fn into_base_exp(self) -> (Expr, Expr) {
        if let Some(arg) = self.as_unary_call("exp") {
            return (Expr::e(), arg.clone());
        }
        match self.kind {
            ExprKind::Pow(base, exp) => (unwrap_arc(base), unwrap_arc(exp)),
            kind => (
                Expr {
                    hash: self.hash,
                    kind,
                },
                Expr::one(),
            ),
        }
    }

    // -------------------------------------------------------------------------
    // Power constructor
    // -------------------------------------------------------------------------

    /// `self^exp` with numeric folding.
    ///
    /// `e^u` becomes `exp(u)`. Integer powers distribute over products and
    /// compose with inner powers; other exponents are kept as written.
    pub fn pow(self, exp: Expr) -> Expr {
        if let Some(n) = exp.as_number() {
            if n.is_zero() {
                return Expr::one();
            }
            if n.is_one() {
                return self;
            }
        }

        match (&self.kind, &exp.kind) {
            (ExprKind::Number(b), ExprKind::Number(e)) => {
                if b.is_zero() && !e.is_negative() {
                    return Expr::zero();
                }
                if let Some(value) = b.pow(*e) {
                    return Expr::number(value);
                }
            }
            (ExprKind::Number(b), _) if b.is_one() => return Expr::one(),
            (ExprKind::Constant(Constant::E), _) => return exp.clone().exp(),
            (ExprKind::Pow(base, inner), ExprKind::Number(n)) if n.as_integer().is_some() => {
                let combined = Expr::product(vec![(**inner).clone(), exp.clone()]);
                return (**base).clone().pow(combined);
            }
            (ExprKind::FunctionCall { name, args }, ExprKind::Number(_))
                if &**name == "exp" && args.len() == 1 =>
            {
                return Expr::product(vec![(*args[0]).clone(), exp.clone()]).exp();
            }
            (ExprKind::Product(factors), ExprKind::Number(n)) if n.as_integer().is_some() => {
                let distributed = factors
                    .iter()
                    .map(|f| (**f).clone().pow(exp.clone()))
                    .collect();
                return Expr::product(distributed);
            }
            _ => {}
        }

        Self::new(ExprKind::Pow(Arc::new(self), Arc::new(exp)))
    }

    // -------------------------------------------------------------------------
    // Binary helpers
    // -------------------------------------------------------------------------

    pub fn add_expr(a: Expr, b: Expr) -> Expr {
        Expr::sum(vec![a, b])
    }

    /// `a - b` as `a + (-1)*b`
    pub fn sub_expr(a: Expr, b: Expr) -> Expr {
        Expr::sum(vec![a, Expr::negate(b)])
    }

    pub fn mul_expr(a: Expr, b: Expr) -> Expr {
        Expr::product(vec![a, b])
    }

    /// `a / b` as `a * b^-1`
    pub fn div_expr(a: Expr, b: Expr) -> Expr {
        Expr::product(vec![a, b.pow(Expr::integer(-1))])
    }

    pub fn negate(e: Expr) -> Expr {
        Expr::product(vec![Expr::integer(-1), e])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, reason = "Standard test relaxations")]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn test_like_terms_combine() {
        let e = Expr::sum(vec![
            Expr::integer(2) * x(),
            Expr::integer(3) * x(),
            Expr::integer(1),
        ]);
        assert_eq!(e, Expr::sum(vec![Expr::integer(5) * x(), Expr::integer(1)]));
    }

    #[test]
    fn test_cancelling_terms_vanish() {
        let e = x() - x();
        assert!(e.is_zero_num());
    }

    #[test]
    fn test_like_bases_combine() {
        let e = x() * x().pow(Expr::integer(2));
        assert_eq!(e, x().pow(Expr::integer(3)));
        let q = x().pow(Expr::integer(2)) / x();
        assert_eq!(q, x());
        assert_eq!(x() / x(), Expr::one());
    }

    #[test]
    fn test_exponentials_merge() {
        let e = x().exp() * (Expr::integer(2) * x()).exp();
        assert_eq!(e, (Expr::integer(3) * x()).exp());
        assert_eq!(x().exp() / x().exp(), Expr::one());
    }

    #[test]
    fn test_e_power_becomes_exp() {
        let e = Expr::e().pow(x());
        assert_eq!(e.as_unary_call("exp"), Some(&x()));
        assert_eq!(Expr::e().pow(Expr::one()), Expr::e());
    }

    #[test]
    fn test_numeric_powers_fold() {
        assert_eq!(Expr::integer(2).pow(Expr::integer(3)), Expr::integer(8));
        assert_eq!(Expr::integer(9).sqrt(), Expr::integer(3));
        assert!(Expr::integer(2).sqrt().is_pow());
    }

    #[test]
    fn test_integer_power_distributes_over_product() {
        let e = (Expr::integer(2) * x()).pow(Expr::integer(2));
        assert_eq!(e, Expr::integer(4) * x().pow(Expr::integer(2)));
    }

    #[test]
    fn test_nested_integer_power() {
        let e = x().pow(Expr::integer(2)).pow(Expr::integer(3));
        assert_eq!(e, x().pow(Expr::integer(6)));
    }

    #[test]
    fn test_product_coefficient_leads() {
        let e = x() * Expr::integer(3);
        let factors = e.factors().unwrap();
        assert_eq!(factors[0].as_number(), Some(Number::integer(3)));
    }

    #[test]
    fn test_zero_annihilates_product() {
        assert!((Expr::zero() * x().sin()).is_zero_num());
    }
}
