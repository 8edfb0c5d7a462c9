//! Repeated integration by parts for polynomial times exponential.
//!
//! With `u` the polynomial and `dv = exp(a*x) dx`, each level lowers the
//! degree of `u` by one until it is free of the variable.

use crate::core::pattern::match_linear;
use crate::integration::Derivation;
use crate::simplification::simplify;
use crate::{Expr, IntegralError, Polynomial, Symbol};

/// `p(x) * exp(a*x)` with `p` a non-constant polynomial
pub(crate) fn poly_times_exp(expr: &Expr, var: &Symbol) -> Result<Option<Derivation>, IntegralError> {
    let Some(factors) = expr.factors() else {
        return Ok(None);
    };

    let mut exponentials = factors.iter().enumerate().filter_map(|(i, f)| {
        let a = match_linear(f.as_unary_call("exp")?, var)?;
        Some((i, a))
    });
    let (Some((position, a)), None) = (exponentials.next(), exponentials.next()) else {
        return Ok(None);
    };

    let poly = Expr::product(
        factors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, f)| (**f).clone())
            .collect(),
    );
    match Polynomial::from_expr(&poly, var) {
        Some(p) if !p.is_constant() => {}
        _ => return Ok(None),
    }

    let exponential = (*factors[position]).clone();
    let detected = format!(
        "Polynomial times exponential: integrate ∫({expr}) d{var} by parts repeatedly with dv = {exponential} d{var}"
    );
    let levels = by_parts(&poly, &exponential, &a, var);
    let mut steps = vec![detected];
    steps.extend(levels.steps);
    Ok(Some(Derivation::new(levels.result, steps)))
}

/// `∫u * exponential` where `exponential = exp(a*x)`.
///
/// Differentiates `u` down to a constant, then folds the levels back up:
/// `∫u_k e = u_k v - (∫u_{k+1} e)/a`.
fn by_parts(u: &Expr, exponential: &Expr, a: &Expr, var: &Symbol) -> Derivation {
    let v = exponential.clone() / a.clone();
    let mut steps = Vec::new();
    let mut levels = Vec::new();
    let mut current = u.clone();

    while !current.is_free_of(var) {
        let du = current.diff(var);
        steps.push(format!(
            "By parts: u = {current}, dv = {exponential} d{var}, du = {du} d{var}, v = {v}"
        ));
        levels.push(std::mem::replace(&mut current, du));
    }

    let mut result = simplify(current.clone() * v.clone());
    steps.push(format!("∫{current}*{exponential} d{var} = {result}"));
    for u in levels.into_iter().rev() {
        result = simplify(u * v.clone() - result / a.clone());
    }
    Derivation::new(result, steps)
}
