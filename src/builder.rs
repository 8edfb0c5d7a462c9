//! Builder pattern API for integration
//!
//! Provides a fluent interface for configuring and running the step engine.
//!
//! # Example
//! ```
//! use symb_integral::{Integrate, sym};
//!
//! let integration = Integrate::new()
//!     .max_depth(50)
//!     .integrate_str("2*x", "x")
//!     .unwrap();
//! assert_eq!(integration.antiderivative.to_string(), "x^2");
//! ```

use crate::integration::integrate_steps;
use crate::{Expr, IntegralError, Symbol, parser};

/// Outcome of one integration: the parsed integrand, its antiderivative
/// (without constant of integration) and the explanation steps in order
#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    pub integrand: Expr,
    pub antiderivative: Expr,
    pub steps: Vec<String>,
}

impl Integration {
    /// `(integrand, antiderivative, steps)`
    pub fn into_parts(self) -> (Expr, Expr, Vec<String>) {
        (self.integrand, self.antiderivative, self.steps)
    }
}

/// Builder for integration operations
#[derive(Debug, Clone, Default)]
pub struct Integrate {
    max_depth: Option<usize>,
    max_nodes: Option<usize>,
}

impl Integrate {
    /// Create a new integration builder with no size limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum expression depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set maximum expression node count
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    fn check_limits(&self, expr: &Expr) -> Result<(), IntegralError> {
        if let Some(max_d) = self.max_depth
            && expr.max_depth() > max_d
        {
            return Err(IntegralError::MaxDepthExceeded);
        }
        if let Some(max_n) = self.max_nodes
            && expr.node_count() > max_n
        {
            return Err(IntegralError::MaxNodesExceeded);
        }
        Ok(())
    }

    /// Integrate an expression with respect to `var`
    ///
    /// # Errors
    /// A size limit is exceeded, or no closed form is found.
    pub fn integrate(&self, expr: Expr, var: &Symbol) -> Result<Integration, IntegralError> {
        self.check_limits(&expr)?;
        let derivation = integrate_steps(&expr, var)?;
        Ok(Integration {
            integrand: expr,
            antiderivative: derivation.result,
            steps: derivation.steps,
        })
    }

    /// Parse and integrate a string formula
    ///
    /// # Errors
    /// Any parse error, a size limit, or an integration failure.
    pub fn integrate_str(&self, formula: &str, var: &str) -> Result<Integration, IntegralError> {
        let var = Symbol::new(var);
        let expr = parser::parse(formula, &var)?;
        self.integrate(expr, &var)
    }
}
