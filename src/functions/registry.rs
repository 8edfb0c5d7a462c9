use rustc_hash::FxHashMap;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use crate::Expr;

/// Definition of an elementary function: evaluation and differentiation
#[derive(Clone)]
pub(crate) struct FunctionDefinition {
    /// Canonical name of the function (e.g., "sin", "ln")
    pub name: &'static str,

    /// Acceptable argument count (arity)
    pub arity: RangeInclusive<usize>,

    /// Numerical evaluation; `None` outside the real domain
    pub eval: fn(&[f64]) -> Option<f64>,

    /// Symbolic differentiation function
    /// Arguments: (args of the function call, derivatives of the arguments)
    /// Returns the total derivative dA/dx = sum( (dA/d_arg_i) * (d_arg_i/dx) )
    pub derivative: fn(&[Expr], &[Expr]) -> Expr,
}

impl FunctionDefinition {
    pub(crate) fn validate_arity(&self, args: usize) -> bool {
        self.arity.contains(&args)
    }
}

/// Static registry storing all function definitions
static REGISTRY: OnceLock<FxHashMap<&'static str, FunctionDefinition>> = OnceLock::new();

fn init_registry() -> FxHashMap<&'static str, FunctionDefinition> {
    crate::functions::definitions::all_definitions()
        .into_iter()
        .map(|def| (def.name, def))
        .collect()
}

/// Read-only catalog of elementary functions, built on first use
pub(crate) struct Registry;

impl Registry {
    pub(crate) fn get(name: &str) -> Option<&'static FunctionDefinition> {
        REGISTRY.get_or_init(init_registry).get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        for name in ["sin", "cos", "tan", "exp", "ln", "sqrt", "atan", "cosh", "abs"] {
            assert!(Registry::get(name).is_some(), "missing {name}");
        }
        assert!(Registry::get("besselj").is_none());
    }

    #[test]
    fn test_arity() {
        let sin = Registry::get("sin").map(|d| d.validate_arity(1));
        assert_eq!(sin, Some(true));
        let sin2 = Registry::get("sin").map(|d| d.validate_arity(2));
        assert_eq!(sin2, Some(false));
    }
}
