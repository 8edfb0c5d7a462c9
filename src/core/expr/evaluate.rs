//! Numeric evaluation at a point.

use super::{Expr, ExprKind};
use crate::core::symbol::Symbol;
use crate::functions::Registry;

impl Expr {
    /// Evaluate with `var = value`.
    ///
    /// Returns `None` when another free variable remains, a catalog function is
    /// outside its real domain, or the result is not finite.
    pub fn eval_at(&self, var: &Symbol, value: f64) -> Option<f64> {
        let result = match &self.kind {
            ExprKind::Number(n) => n.to_f64(),
            ExprKind::Constant(c) => c.value(),
            ExprKind::Symbol(s) if s == var => value,
            ExprKind::Symbol(_) | ExprKind::Derivative { .. } => return None,
            ExprKind::Sum(terms) => terms
                .iter()
                .map(|t| t.eval_at(var, value))
                .sum::<Option<f64>>()?,
            ExprKind::Product(factors) => factors
                .iter()
                .map(|f| f.eval_at(var, value))
                .product::<Option<f64>>()?,
            ExprKind::Pow(base, exp) => base.eval_at(var, value)?.powf(exp.eval_at(var, value)?),
            ExprKind::FunctionCall { name, args } => {
                let def = Registry::get(name)?;
                if !def.validate_arity(args.len()) {
                    return None;
                }
                let values = args
                    .iter()
                    .map(|a| a.eval_at(var, value))
                    .collect::<Option<Vec<f64>>>()?;
                (def.eval)(&values)?
            }
        };
        result.is_finite().then_some(result)
    }
}
