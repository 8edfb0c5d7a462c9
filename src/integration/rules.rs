//! Pattern rules of the step engine.
//!
//! Each rule inspects the integrand's shape and either declines with
//! `Ok(None)` or returns a derivation. Rules never mutate shared state;
//! sub-derivations are combined by value.

use crate::core::pattern::match_linear;
use crate::integration::{Derivation, fallback, integrate_steps};
use crate::{Expr, IntegralError, Symbol};

type RuleResult = Result<Option<Derivation>, IntegralError>;

/// ∫(f + g + ...) = ∫f + ∫g + ...
pub(crate) fn sum_rule(expr: &Expr, var: &Symbol) -> RuleResult {
    let Some(terms) = expr.terms() else {
        return Ok(None);
    };

    let mut steps = vec![format!(
        "Sum rule: split ∫({expr}) d{var} into {} terms and integrate each one",
        terms.len()
    )];
    let mut results = Vec::with_capacity(terms.len());
    for term in terms {
        let sub = integrate_steps(term, var)?;
        results.push(sub.result);
        steps.extend(sub.steps);
    }
    Ok(Some(Derivation::new(Expr::sum(results), steps)))
}

/// ∫c*f = c*∫f for a factor `c` free of the variable
pub(crate) fn constant_multiple(expr: &Expr, var: &Symbol) -> RuleResult {
    let (coeff, rest) = expr.split_independent(var);
    if coeff.is_one_num() {
        return Ok(None);
    }

    let sub = integrate_steps(&rest, var)?;
    let mut steps = vec![format!(
        "Constant multiple: factor out {coeff} and integrate {rest}"
    )];
    steps.extend(sub.steps);
    Ok(Some(Derivation::new(coeff * sub.result, steps)))
}

/// ∫x^n = x^(n+1)/(n+1), and ∫x^-1 = ln(x)
pub(crate) fn power_rule(expr: &Expr, var: &Symbol) -> RuleResult {
    let Some((base, exp)) = expr.as_pow() else {
        return Ok(None);
    };
    if !base.is_symbol(var) || !exp.is_number() {
        return Ok(None);
    }

    let x = var.to_expr();
    if exp.is_neg_one_num() {
        return Ok(Some(Derivation::single(
            x.ln(),
            format!("Power rule with n = -1: ∫{var}^-1 d{var} = ln({var})"),
        )));
    }
    let n1 = exp.clone() + Expr::one();
    let result = x.pow(n1.clone()) / n1;
    Ok(Some(Derivation::single(
        result.clone(),
        format!("Power rule: ∫{expr} d{var} = {var}^(n + 1)/(n + 1) with n = {exp}, giving {result}"),
    )))
}

/// ∫x = x^2/2 and ∫1/x = ln(x)
pub(crate) fn identity(expr: &Expr, var: &Symbol) -> RuleResult {
    let x = var.to_expr();
    if expr.is_symbol(var) {
        let result = x.pow(Expr::integer(2)) / Expr::integer(2);
        return Ok(Some(Derivation::single(
            result,
            format!("∫{var} d{var} = {var}^2/2"),
        )));
    }
    if *expr == Expr::one() / x.clone() {
        return Ok(Some(Derivation::single(
            x.ln(),
            format!("∫1/{var} d{var} = ln({var})"),
        )));
    }
    Ok(None)
}

/// ∫ln(x)/x = ln(x)^2/2 by the substitution u = ln(x)
pub(crate) fn log_over_var(expr: &Expr, var: &Symbol) -> RuleResult {
    let x = var.to_expr();
    if *expr != x.clone().ln() / x.clone() {
        return Ok(None);
    }
    let result = x.ln().pow(Expr::integer(2)) / Expr::integer(2);
    Ok(Some(Derivation::single(
        result.clone(),
        format!("Substitute u = ln({var}), du = d{var}/{var}: ∫u du = u^2/2 = {result}"),
    )))
}

/// ∫sqrt(x) = (2/3)*x^(3/2)
pub(crate) fn sqrt_rule(expr: &Expr, var: &Symbol) -> RuleResult {
    let x = var.to_expr();
    if *expr != x.clone().sqrt() {
        return Ok(None);
    }
    let result = Expr::rational(2, 3) * x.pow(Expr::rational(3, 2));
    Ok(Some(Derivation::single(
        result,
        format!("∫sqrt({var}) d{var} = (2/3)*{var}^(3/2)"),
    )))
}

/// exp(a*x) times sin(b*x) or cos(b*x), solved by the fallback
///
/// Declines when the fallback cannot produce a closed form so that later
/// rules still get a chance.
pub(crate) fn exp_trig(expr: &Expr, var: &Symbol) -> RuleResult {
    let Some([f, g]) = expr.factors() else {
        return Ok(None);
    };
    let (f, g): (&Expr, &Expr) = (f, g);
    let is_exp = |e: &Expr| e.as_unary_call("exp").is_some_and(|u| match_linear(u, var).is_some());
    let is_trig = |e: &Expr| {
        ["sin", "cos"].iter().any(|name| {
            e.as_unary_call(name)
                .is_some_and(|u| match_linear(u, var).is_some())
        })
    };
    let matched = (is_exp(f) && is_trig(g)) || (is_exp(g) && is_trig(f));
    if !matched {
        return Ok(None);
    }

    match fallback::integrate(expr, var) {
        Ok(result) => Ok(Some(Derivation::single(
            result.clone(),
            format!(
                "∫({expr}) d{var}: integrate by parts twice and solve for the original integral, giving {result}"
            ),
        ))),
        Err(_) => Ok(None),
    }
}

/// ∫sin(a*x), ∫cos(a*x) and ∫exp(a*x)
pub(crate) fn basic_function(expr: &Expr, var: &Symbol) -> RuleResult {
    let Some((name, [arg])) = expr.as_function() else {
        return Ok(None);
    };
    let Some(a) = match_linear(arg, var) else {
        return Ok(None);
    };
    let u = (**arg).clone();
    let result = match name {
        "sin" => -u.cos() / a,
        "cos" => u.sin() / a,
        "exp" => u.exp() / a,
        _ => return Ok(None),
    };
    Ok(Some(Derivation::single(
        result.clone(),
        format!("∫{expr} d{var} = {result}"),
    )))
}

/// Defer to the general-purpose integrator; its failure is terminal
pub(crate) fn fallback(expr: &Expr, var: &Symbol) -> RuleResult {
    let result = fallback::integrate(expr, var)?;
    Ok(Some(Derivation::single(
        result.clone(),
        format!("No elementary rule applies; general integration gives ∫({expr}) d{var} = {result}"),
    )))
}
