//! General-purpose integrator used when no step rule applies.
//!
//! A table-driven search over the integrand's shape: linearity, polynomials,
//! elementary functions of affine arguments, a handful of product forms,
//! derivative-divides substitution and a final retry after expansion. It
//! reports only whether a closed form was found.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::pattern::match_affine;
use crate::functions::call;
use crate::simplification::simplify;
use crate::{Expr, ExprKind, IntegralError, Polynomial, Symbol};

/// Nested attempts before the search gives up
const MAX_SEARCH_DEPTH: usize = 24;

/// Functions whose antiderivative repeats under integration by parts
const PARTS_FRIENDLY: &[&str] = &["exp", "sin", "cos", "sinh", "cosh"];

/// Antiderivative of `expr` with respect to `var`, simplified.
///
/// # Errors
/// `IntegrationFailure` when no closed form is found.
pub fn integrate(expr: &Expr, var: &Symbol) -> Result<Expr, IntegralError> {
    match search(expr, var, 0) {
        Some(result) => {
            let result = simplify(result);
            debug!(integrand = %expr, result = %result, "fallback found closed form");
            Ok(result)
        }
        None => Err(IntegralError::IntegrationFailure(format!(
            "no closed form found for ∫({expr}) d{var}"
        ))),
    }
}

fn search(expr: &Expr, var: &Symbol, depth: usize) -> Option<Expr> {
    if depth > MAX_SEARCH_DEPTH {
        trace!(integrand = %expr, "fallback search depth exhausted");
        return None;
    }
    let x = var.to_expr();

    if expr.is_free_of(var) {
        return Some(expr.clone() * x);
    }

    if let Some(terms) = expr.terms() {
        let parts = terms
            .iter()
            .map(|t| search(t, var, depth + 1))
            .collect::<Option<Vec<_>>>()?;
        return Some(Expr::sum(parts));
    }

    let (coeff, rest) = expr.split_independent(var);
    if !coeff.is_one_num() {
        return search(&rest, var, depth + 1).map(|r| coeff * r);
    }

    if let Some(p) = Polynomial::from_expr(expr, var) {
        return Some(integrate_polynomial(&p, var));
    }

    table(expr, var)
        .or_else(|| product_forms(expr, var, depth))
        .or_else(|| substitution(expr, var))
        .or_else(|| {
            let expanded = simplify(expr.clone());
            (expanded != *expr).then(|| search(&expanded, var, depth + 1))?
        })
}

fn integrate_polynomial(p: &Polynomial, var: &Symbol) -> Expr {
    let x = var.to_expr();
    Expr::sum(
        p.coeffs()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let n = i as i64 + 1;
                c.clone() * x.clone().pow(Expr::integer(n)) / Expr::integer(n)
            })
            .collect(),
    )
}

/// `F(u)` with `dF/du = name(u)`
fn call_antiderivative(name: &str, u: &Expr) -> Option<Expr> {
    let square = u.clone().pow(Expr::integer(2));
    Some(match name {
        "sin" => -u.clone().cos(),
        "cos" => u.clone().sin(),
        "tan" => -u.clone().cos().ln(),
        "exp" => u.clone().exp(),
        "ln" => u.clone() * u.clone().ln() - u.clone(),
        "sinh" => call("cosh", u.clone()),
        "cosh" => call("sinh", u.clone()),
        "tanh" => call("cosh", u.clone()).ln(),
        "atan" => u.clone() * call("atan", u.clone()) - (Expr::one() + square).ln() / Expr::integer(2),
        "asin" => u.clone() * call("asin", u.clone()) + (Expr::one() - square).sqrt(),
        "acos" => u.clone() * call("acos", u.clone()) - (Expr::one() - square).sqrt(),
        _ => return None,
    })
}

/// Single-factor forms
fn table(expr: &Expr, var: &Symbol) -> Option<Expr> {
    match expr.kind() {
        ExprKind::FunctionCall { name, args } if args.len() == 1 => {
            let (a, _) = match_affine(&args[0], var)?;
            Some(call_antiderivative(name, &args[0])? / a)
        }
        ExprKind::Pow(base, exp) => power_form(base, exp, var),
        _ => None,
    }
}

fn power_form(base: &Expr, exp: &Expr, var: &Symbol) -> Option<Expr> {
    // (a*x + b)^n
    if exp.is_free_of(var)
        && let Some((a, _)) = match_affine(base, var)
    {
        if exp.is_neg_one_num() {
            return Some(base.clone().ln() / a);
        }
        let n1 = exp.clone() + Expr::one();
        return Some(base.clone().pow(n1.clone()) / (n1 * a));
    }

    // c^(a*x + b)
    if base.is_free_of(var)
        && let Some((a, _)) = match_affine(exp, var)
    {
        let power = base.clone().pow(exp.clone());
        return Some(power / (a * base.clone().ln()));
    }

    // sin(u)^2, cos(u)^2
    if exp.as_number().and_then(|n| n.as_integer()) == Some(2)
        && let Some((name, [arg])) = base.as_function()
        && let Some((a, _)) = match_affine(arg, var)
    {
        let u = (**arg).clone();
        let half = u.clone() / Expr::integer(2);
        let quarter = (Expr::integer(2) * u).sin() / Expr::integer(4);
        let f = match name {
            "sin" => half - quarter,
            "cos" => half + quarter,
            _ => return None,
        };
        return Some(f / a);
    }

    // 1/(a*x^2 + c) with a, c > 0
    if exp.is_neg_one_num()
        && let Some(p) = Polynomial::from_expr(base, var)
        && p.degree() == 2
        && p.coeff(1).is_zero_num()
    {
        let a = p.coeff(2).as_number()?;
        let c = p.coeff(0).as_number()?;
        if a.is_negative() || c.is_negative() || c.is_zero() {
            return None;
        }
        let (a, c) = (Expr::number(a), Expr::number(c));
        let scale = (a.clone() / c.clone()).sqrt();
        let x = var.to_expr();
        return Some(call("atan", scale * x) / (a * c).sqrt());
    }

    None
}

/// Multi-factor forms with the constant part already removed
fn product_forms(expr: &Expr, var: &Symbol, depth: usize) -> Option<Expr> {
    let factors = expr.factors()?;

    if let [f, g] = factors {
        if let Some(r) = exp_times_trig(f, g, var).or_else(|| exp_times_trig(g, f, var)) {
            return Some(r);
        }
        if let Some(r) = power_times_log(f, g, var).or_else(|| power_times_log(g, f, var)) {
            return Some(r);
        }
    }

    polynomial_by_parts(factors, var, depth)
}

/// `exp(a*x + p) * sin(b*x + q)` and the cosine counterpart
fn exp_times_trig(e: &Expr, t: &Expr, var: &Symbol) -> Option<Expr> {
    let u = e.as_unary_call("exp")?;
    let (a, _) = match_affine(u, var)?;
    let (name, [v]) = t.as_function()? else {
        return None;
    };
    let (b, _) = match_affine(v, var)?;
    let v = (**v).clone();

    let denom = a.clone().pow(Expr::integer(2)) + b.clone().pow(Expr::integer(2));
    let body = match name {
        "sin" => a * v.clone().sin() - b * v.cos(),
        "cos" => a * v.clone().cos() + b * v.sin(),
        _ => return None,
    };
    Some(e.clone() * body / denom)
}

/// `x^n * ln(x)` for `n != -1`
fn power_times_log(p: &Expr, l: &Expr, var: &Symbol) -> Option<Expr> {
    let arg = l.as_unary_call("ln")?;
    if !arg.is_symbol(var) {
        return None;
    }
    let n = if p.is_symbol(var) {
        Expr::one()
    } else {
        let (base, exp) = p.as_pow()?;
        if !base.is_symbol(var) || !exp.is_free_of(var) || exp.is_neg_one_num() {
            return None;
        }
        exp.clone()
    };
    let x = var.to_expr();
    let n1 = n + Expr::one();
    let lifted = x.pow(n1.clone());
    Some(lifted.clone() * l.clone() / n1.clone() - lifted / n1.pow(Expr::integer(2)))
}

/// `p(x) * f(a*x + b)` for a polynomial `p` and `f` in [`PARTS_FRIENDLY`],
/// via `p*F - ∫p'*F`.
fn polynomial_by_parts(factors: &[Arc<Expr>], var: &Symbol, depth: usize) -> Option<Expr> {
    let position = factors.iter().position(|f| {
        f.as_function().is_some_and(|(name, args)| {
            PARTS_FRIENDLY.contains(&name) && args.len() == 1 && match_affine(&args[0], var).is_some()
        })
    })?;
    let g = &factors[position];
    let rest = Expr::product(
        factors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, f)| (**f).clone())
            .collect(),
    );
    let p = Polynomial::from_expr(&rest, var)?;
    if p.is_constant() {
        return None;
    }
    let big_g = table(g, var)?;
    let dp = p.derivative().to_expr();
    let inner = search(&simplify(dp * big_g.clone()), var, depth + 1)?;
    Some(rest * big_g - inner)
}

/// Derivative-divides: `c * f(u) * u'` with `c` free of `var`.
///
/// Tries each factor as either an outer function of some inner `u`, or as
/// `u` itself raised to a constant power.
fn substitution(expr: &Expr, var: &Symbol) -> Option<Expr> {
    let single = [Arc::new(expr.clone())];
    let factors = expr.factors().unwrap_or(&single[..]);

    for factor in factors {
        // f(u) with u non-affine
        if let Some((name, [u])) = factor.as_function()
            && match_affine(u, var).is_none()
            && let Some(big_f) = call_antiderivative(name, u)
            && let Some(c) = constant_ratio(expr, &((**factor).clone() * u.diff(var)), var)
        {
            return Some(c * big_f);
        }

        // u^n with u non-affine
        if let Some((u, n)) = factor.as_pow()
            && n.is_free_of(var)
            && match_affine(u, var).is_none()
            && let Some(c) = constant_ratio(expr, &((**factor).clone() * u.diff(var)), var)
        {
            return Some(c * lift_power(u, n));
        }

        // the factor is u itself: expr = c * u^k * u'
        if factor.as_function().is_some() {
            let du = factor.diff(var);
            if du.is_zero_num() {
                continue;
            }
            let ratio = simplify(expr.clone() / du);
            if let Some((c, k)) = as_power_of(&ratio, factor, var) {
                return Some(c * lift_power(factor, &k));
            }
        }
    }
    None
}

/// `∫u^n du`
fn lift_power(u: &Expr, n: &Expr) -> Expr {
    if n.is_neg_one_num() {
        return u.clone().ln();
    }
    let n1 = n.clone() + Expr::one();
    u.clone().pow(n1.clone()) / n1
}

/// `expr / candidate` when it simplifies to something free of `var`
fn constant_ratio(expr: &Expr, candidate: &Expr, var: &Symbol) -> Option<Expr> {
    if candidate.is_zero_num() {
        return None;
    }
    let ratio = simplify(expr.clone() / candidate.clone());
    ratio.is_free_of(var).then_some(ratio)
}

/// Read `ratio` as `c * u^k` with `c` free of `var`
fn as_power_of(ratio: &Expr, u: &Expr, var: &Symbol) -> Option<(Expr, Expr)> {
    let (c, dependent) = ratio.split_independent(var);
    if dependent == *u {
        return Some((c, Expr::one()));
    }
    if dependent.is_one_num() {
        return Some((c, Expr::zero()));
    }
    let (base, k) = dependent.as_pow()?;
    (base == u && k.is_free_of(var)).then(|| (c, k.clone()))
}
