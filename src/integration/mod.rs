//! Step-by-step integration engine
//!
//! An ordered table of rules is tried against the integrand; the first rule
//! that recognizes the shape produces the antiderivative and a list of
//! human-readable steps. Rules that split the problem (sums, constant
//! multiples, integration by parts) recurse through [`integrate_steps`] and
//! splice the sub-derivations into their own. The last rule defers to the
//! general-purpose [`fallback`] integrator.

mod by_parts;
pub mod fallback;
mod rules;

use tracing::{debug, trace};

use crate::simplification::simplify;
use crate::{Expr, IntegralError, Symbol};

/// An antiderivative together with the steps that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub result: Expr,
    pub steps: Vec<String>,
}

impl Derivation {
    pub fn new(result: Expr, steps: Vec<String>) -> Self {
        Derivation { result, steps }
    }

    /// A derivation with a single explanatory step
    pub fn single(result: Expr, step: String) -> Self {
        Derivation {
            result,
            steps: vec![step],
        }
    }
}

/// A rule either recognizes the integrand (`Some`) or declines (`None`).
/// Errors only come from sub-integrations that reached the fallback.
pub(crate) type RuleFn = fn(&Expr, &Symbol) -> Result<Option<Derivation>, IntegralError>;

/// Rules in priority order; the first match wins
pub(crate) const RULES: &[(&str, RuleFn)] = &[
    ("sum", rules::sum_rule),
    ("constant_multiple", rules::constant_multiple),
    ("power", rules::power_rule),
    ("identity", rules::identity),
    ("log_over_var", rules::log_over_var),
    ("sqrt", rules::sqrt_rule),
    ("exp_trig", rules::exp_trig),
    ("poly_exp", by_parts::poly_times_exp),
    ("basic_function", rules::basic_function),
    ("fallback", rules::fallback),
];

/// Integrate `expr` with respect to `var`, recording every step.
///
/// The returned antiderivative is simplified and carries no constant of
/// integration.
///
/// # Errors
/// `IntegrationFailure` when the fallback integrator finds no closed form for
/// the integrand or for any sub-integrand a rule produced.
pub fn integrate_steps(expr: &Expr, var: &Symbol) -> Result<Derivation, IntegralError> {
    for (name, rule) in RULES {
        if let Some(derivation) = rule(expr, var)? {
            let result = simplify(derivation.result);
            debug!(rule = name, integrand = %expr, result = %result, "rule applied");
            return Ok(Derivation::new(result, derivation.steps));
        }
        trace!(rule = name, integrand = %expr, "rule declined");
    }
    Err(IntegralError::IntegrationFailure(format!(
        "no rule applies to ∫({expr}) d{var}"
    )))
}
