//! Elementary function definitions for the function registry
//!
//! Contains evaluation and symbolic differentiation rules for the catalog.

use super::registry::FunctionDefinition;
use super::{call, neg};
use crate::Expr;

fn one_minus_square(u: &Expr) -> Expr {
    Expr::one() - u.clone().pow(Expr::integer(2))
}

fn domain(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Return all function definitions for populating the registry
pub(crate) fn all_definitions() -> Vec<FunctionDefinition> {
    vec![
        // Trigonometric
        FunctionDefinition {
            name: "sin",
            arity: 1..=1,
            eval: |args| Some(args[0].sin()),
            derivative: |args, arg_primes| {
                // d/dx sin(u) = cos(u) * u'
                call("cos", args[0].clone()) * arg_primes[0].clone()
            },
        },
        FunctionDefinition {
            name: "cos",
            arity: 1..=1,
            eval: |args| Some(args[0].cos()),
            derivative: |args, arg_primes| {
                // d/dx cos(u) = -sin(u) * u'
                neg(call("sin", args[0].clone())) * arg_primes[0].clone()
            },
        },
        FunctionDefinition {
            name: "tan",
            arity: 1..=1,
            eval: |args| domain(args[0].tan()),
            derivative: |args, arg_primes| {
                // d/dx tan(u) = u' / cos^2(u)
                arg_primes[0].clone() / call("cos", args[0].clone()).pow(Expr::integer(2))
            },
        },
        // Inverse trigonometric
        FunctionDefinition {
            name: "asin",
            arity: 1..=1,
            eval: |args| domain(args[0].asin()),
            derivative: |args, arg_primes| {
                // d/dx asin(u) = u' / sqrt(1 - u^2)
                arg_primes[0].clone() / one_minus_square(&args[0]).sqrt()
            },
        },
        FunctionDefinition {
            name: "acos",
            arity: 1..=1,
            eval: |args| domain(args[0].acos()),
            derivative: |args, arg_primes| {
                // d/dx acos(u) = -u' / sqrt(1 - u^2)
                neg(arg_primes[0].clone()) / one_minus_square(&args[0]).sqrt()
            },
        },
        FunctionDefinition {
            name: "atan",
            arity: 1..=1,
            eval: |args| Some(args[0].atan()),
            derivative: |args, arg_primes| {
                // d/dx atan(u) = u' / (1 + u^2)
                arg_primes[0].clone() / (Expr::one() + args[0].clone().pow(Expr::integer(2)))
            },
        },
        // Hyperbolic
        FunctionDefinition {
            name: "sinh",
            arity: 1..=1,
            eval: |args| domain(args[0].sinh()),
            derivative: |args, arg_primes| call("cosh", args[0].clone()) * arg_primes[0].clone(),
        },
        FunctionDefinition {
            name: "cosh",
            arity: 1..=1,
            eval: |args| domain(args[0].cosh()),
            derivative: |args, arg_primes| call("sinh", args[0].clone()) * arg_primes[0].clone(),
        },
        FunctionDefinition {
            name: "tanh",
            arity: 1..=1,
            eval: |args| Some(args[0].tanh()),
            derivative: |args, arg_primes| {
                // d/dx tanh(u) = u' / cosh^2(u)
                arg_primes[0].clone() / call("cosh", args[0].clone()).pow(Expr::integer(2))
            },
        },
        // Exponential and logarithm
        FunctionDefinition {
            name: "exp",
            arity: 1..=1,
            eval: |args| domain(args[0].exp()),
            derivative: |args, arg_primes| args[0].clone().exp() * arg_primes[0].clone(),
        },
        FunctionDefinition {
            name: "ln",
            arity: 1..=1,
            eval: |args| (args[0] > 0.0).then(|| args[0].ln()),
            derivative: |args, arg_primes| {
                // d/dx ln(u) = u' / u
                arg_primes[0].clone() / args[0].clone()
            },
        },
        FunctionDefinition {
            name: "sqrt",
            arity: 1..=1,
            eval: |args| (args[0] >= 0.0).then(|| args[0].sqrt()),
            derivative: |args, arg_primes| {
                // d/dx sqrt(u) = u' / (2*sqrt(u))
                arg_primes[0].clone() / (Expr::integer(2) * args[0].clone().sqrt())
            },
        },
        FunctionDefinition {
            name: "abs",
            arity: 1..=1,
            eval: |args| Some(args[0].abs()),
            derivative: |args, arg_primes| {
                // d/dx |u| = u/|u| * u'
                args[0].clone() / call("abs", args[0].clone()) * arg_primes[0].clone()
            },
        },
    ]
}
