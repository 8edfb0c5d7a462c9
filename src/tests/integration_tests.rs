//! End-to-end integration scenarios: string in, antiderivative and steps out

use rstest::rstest;

use super::assert_antiderivative;
use crate::{Expr, IntegralError, Integrate, integrate_with_steps, sym};

#[rstest]
#[case("2*x", "x^2")]
#[case("x^2", "x^3/3")]
#[case("1/x", "ln(x)")]
#[case("ln(x)/x", "ln(x)^2/2")]
#[case("sqrt(x)", "2*x^(3/2)/3")]
#[case("1/(x^2 + 1)", "atan(x)")]
#[case("-3*x^3 + 5*x - 1", "-3*x^4/4 + 5*x^2/2 - x")]
#[case("x", "x^2/2")]
#[case("5", "5*x")]
#[case("sin(2*x)", "-cos(2*x)/2")]
#[case("cos(x)", "sin(x)")]
#[case("exp(3x)", "exp(3*x)/3")]
fn test_known_antiderivatives(#[case] input: &str, #[case] expected: &str) {
    let (_, antiderivative, steps) = integrate_with_steps(input, "x").unwrap();
    assert_eq!(antiderivative.to_string(), expected, "integrating {input}");
    assert!(!steps.is_empty());
}

#[rstest]
#[case("2*x")]
#[case("x^2")]
#[case("sin(x)*exp(x)")]
#[case("cos(2x)*exp(x)")]
#[case("ln(x)/x")]
#[case("1/(x^2 + 1)")]
#[case("sqrt(x)")]
#[case("-3*x^3 + 5*x - 1")]
#[case("x*e^x")]
#[case("x^2*exp(-x)")]
#[case("1/x")]
#[case("tan(x)")]
#[case("x*ln(x)")]
#[case("x*sin(x)")]
#[case("(2x + 1)^5")]
#[case("x*exp(x^2)")]
#[case("3*x^2 + 2*sin(x) - exp(2*x)")]
#[case("x^(-3)")]
fn test_differentiation_oracle(#[case] input: &str) {
    let (integrand, antiderivative, _) = integrate_with_steps(input, "x").unwrap();
    assert_antiderivative(&integrand, &antiderivative, &sym("x"));
}

#[test]
fn test_polynomial_steps_follow_term_order() {
    let (_, _, steps) = integrate_with_steps("-3*x^3 + 5*x - 1", "x").unwrap();
    assert!(steps[0].starts_with("Sum rule"));
    assert!(steps[0].contains("3 terms"));
    // each addend: constant multiple followed by its own rule
    assert_eq!(steps.len(), 7);
    assert!(steps[1].contains("factor out -3"));
    assert!(steps[2].starts_with("Power rule"));
    assert!(steps[3].contains("factor out 5"));
    assert!(steps[5].contains("factor out -1"));
}

#[test]
fn test_exp_times_trig_narrates_by_parts_twice() {
    let (_, antiderivative, steps) = integrate_with_steps("sin(x)*exp(x)", "x").unwrap();
    assert_eq!(steps.len(), 1);
    assert!(steps[0].contains("by parts twice"));
    let x = sym("x");
    let xe = x.to_expr();
    let expected = xe.clone().exp() * (xe.clone().sin() - xe.cos()) / Expr::integer(2);
    assert_eq!(antiderivative, crate::simplify(expected));
}

#[test]
fn test_poly_times_exp_records_each_level() {
    let (_, antiderivative, steps) = integrate_with_steps("x*e^x", "x").unwrap();
    assert!(steps[0].starts_with("Polynomial times exponential"));
    assert!(steps[1].starts_with("By parts"));
    assert_eq!(steps.len(), 3);
    let x = sym("x").to_expr();
    assert_eq!(
        antiderivative,
        crate::simplify(x.clone() * x.clone().exp() - x.exp())
    );
}

#[test]
fn test_fallback_is_a_single_step() {
    let (_, antiderivative, steps) = integrate_with_steps("1/(x^2 + 1)", "x").unwrap();
    assert_eq!(steps.len(), 1);
    assert!(steps[0].starts_with("No elementary rule applies"));
    assert_eq!(antiderivative.to_string(), "atan(x)");
}

#[test]
fn test_sqrt_goes_through_power_rule() {
    let (_, _, steps) = integrate_with_steps("sqrt(x)", "x").unwrap();
    assert_eq!(steps.len(), 1);
    assert!(steps[0].starts_with("Power rule"));
}

#[test]
fn test_symbolic_exponent_reaches_fallback() {
    let (_, antiderivative, steps) = integrate_with_steps("x^a", "x").unwrap();
    assert!(steps[0].starts_with("No elementary rule applies"));
    let x = sym("x").to_expr();
    let a = Expr::symbol("a");
    let n1 = a + Expr::one();
    assert_eq!(antiderivative, crate::simplify(x.pow(n1.clone()) / n1));
}

#[test]
fn test_radical_fails_with_integration_failure() {
    let integrand = crate::parse("root(3, x^2 + 1)", &sym("x")).unwrap();
    assert_eq!(integrand.to_string(), "(x^2 + 1)^(1/3)");
    let err = integrate_with_steps("root(3, x^2 + 1)", "x").unwrap_err();
    assert!(matches!(err, IntegralError::IntegrationFailure(_)));
    assert!(err.to_string().starts_with("Integration failed"));
}

#[test]
fn test_other_symbols_are_constants() {
    let (_, antiderivative, steps) = integrate_with_steps("a*x + b", "x").unwrap();
    assert!(steps[0].starts_with("Sum rule"));
    let x = sym("x").to_expr();
    let expected = Expr::symbol("a") * x.clone().pow(Expr::integer(2)) / Expr::integer(2)
        + Expr::symbol("b") * x;
    assert_eq!(antiderivative, crate::simplify(expected));
}

#[test]
fn test_variable_other_than_x() {
    let (_, antiderivative, _) = integrate_with_steps("t^2 + x", "t").unwrap();
    let t = sym("t").to_expr();
    let expected = t.clone().pow(Expr::integer(3)) / Expr::integer(3) + Expr::symbol("x") * t;
    assert_eq!(antiderivative, crate::simplify(expected));
}

#[rstest]
#[case("x +", "Not enough operands")]
#[case("(x + 1", "mismatched parentheses")]
#[case("x $ 2", "unrecognized character '$'")]
#[case("", "empty expression")]
fn test_errors_propagate_unchanged(#[case] input: &str, #[case] fragment: &str) {
    let err = integrate_with_steps(input, "x").unwrap_err();
    assert!(
        err.to_string().contains(fragment),
        "{input}: expected '{fragment}' in '{err}'"
    );
}

#[test]
fn test_builder_limits_apply_before_integration() {
    let err = Integrate::new()
        .max_nodes(3)
        .integrate_str("x^2 + x + 1", "x")
        .unwrap_err();
    assert_eq!(err, IntegralError::MaxNodesExceeded);
}

#[rstest]
#[case("x^65*exp(x)")]
#[case("(x + 1)^65*exp(2x)")]
fn test_high_degree_polynomial_times_exp(#[case] input: &str) {
    let (_, antiderivative, steps) = integrate_with_steps(input, "x").unwrap();
    assert!(steps[0].starts_with("Polynomial times exponential"));
    // detection, one level per degree, base case
    assert_eq!(steps.len(), 67);
    assert!(antiderivative.contains_var(&sym("x")));
}

#[test]
fn test_default_entry_point_has_no_size_limits() {
    let mut nested = "x".to_owned();
    for _ in 0..crate::DEFAULT_MAX_DEPTH + 5 {
        nested = format!("sin({nested})");
    }
    let result = integrate_with_steps(&nested, "x");
    assert!(
        !matches!(
            result,
            Err(IntegralError::MaxDepthExceeded | IntegralError::MaxNodesExceeded)
        ),
        "{result:?}"
    );
    let limited = Integrate::new()
        .max_depth(crate::DEFAULT_MAX_DEPTH)
        .integrate_str(&nested, "x");
    assert_eq!(limited.unwrap_err(), IntegralError::MaxDepthExceeded);
}
