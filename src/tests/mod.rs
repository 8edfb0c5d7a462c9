#![allow(clippy::unwrap_used, clippy::panic, reason = "Standard test relaxations")]

mod integration_tests;

use crate::{Expr, Symbol};

/// Sample points inside the real domain of every scenario integrand
const SAMPLE_POINTS: [f64; 4] = [0.35, 0.8, 1.3, 2.2];

/// Check `d/dvar antiderivative == integrand` numerically at the sample points
pub(crate) fn assert_antiderivative(integrand: &Expr, antiderivative: &Expr, var: &Symbol) {
    let derivative = antiderivative.diff(var);
    for point in SAMPLE_POINTS {
        let want = integrand
            .eval_at(var, point)
            .unwrap_or_else(|| panic!("{integrand} does not evaluate at {point}"));
        let got = derivative
            .eval_at(var, point)
            .unwrap_or_else(|| panic!("{derivative} does not evaluate at {point}"));
        assert!(
            (want - got).abs() <= 1e-9 * want.abs().max(1.0),
            "d/d{var} ({antiderivative}) = {derivative} gives {got} at {point}, integrand gives {want}"
        );
    }
}

/// Whether `a` and `b` take the same value at every sample point
pub(crate) fn agree_at_samples(a: &Expr, b: &Expr, var: &Symbol) -> bool {
    SAMPLE_POINTS.iter().all(|&point| {
        match (a.eval_at(var, point), b.eval_at(var, point)) {
            (Some(u), Some(v)) => (u - v).abs() <= 1e-9 * u.abs().max(v.abs()).max(1.0),
            _ => false,
        }
    })
}
