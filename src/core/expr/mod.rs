//! Expression tree for the integration engine.
//!
//! This module defines:
//! - `Expr` - an immutable expression node carrying a structural hash
//! - `ExprKind` - the node variants (Number, Symbol, Constant, Sum, ...)
//! - `Constant` - the named constants `pi` and `e`
//!
//! # Architecture
//!
//! ## N-ary Sum/Product
//! `a + b + c` is `Sum([a, b, c])`, never nested binary additions. Subtraction
//! is `a + (-1)*b` and division is `a * b^-1`, so the only binary node is `Pow`.
//!
//! ## Canonical construction
//! All nodes are built through the constructors in [`constructors`], which
//! flatten, fold numbers, merge like terms and like bases, and sort children.
//! Two expressions that differ only by term order are therefore equal.
//!
//! ## Structural Hashing
//! Each `Expr` stores a pre-computed hash for O(1) equality rejection and so it
//! can key the like-term maps used during construction.
//!
//! # Usage
//!
//! ```
//! use symb_integral::{Expr, sym};
//!
//! let x = sym("x").to_expr();
//! let expr = x.clone().pow(Expr::integer(2)) + x.sin();  // x^2 + sin(x)
//! assert_eq!(expr.to_string(), "sin(x) + x^2");
//! ```

mod constructors;
mod evaluate;
mod ops;
mod ordering;

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::core::number::Number;
use crate::core::symbol::Symbol;

pub use ordering::expr_cmp;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Named mathematical constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }

    /// Case-insensitive lookup of a constant by name
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("pi") {
            Some(Constant::Pi)
        } else if name.eq_ignore_ascii_case("e") {
            Some(Constant::E)
        } else {
            None
        }
    }
}

// =============================================================================
// EXPR - The main expression type
// =============================================================================

/// A symbolic mathematical expression.
///
/// Expressions are immutable; every transformation builds a new tree and
/// shares unchanged children through `Arc`.
#[derive(Debug, Clone)]
pub struct Expr {
    /// Structural hash for O(1) equality rejection
    pub(crate) hash: u64,
    /// The kind of expression (structure)
    pub(crate) kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;
    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl PartialEq for Expr {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.hash != other.hash {
            return false;
        }
        self.kind == other.kind
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

// =============================================================================
// EXPRKIND
// =============================================================================

/// The kind (structure) of an expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Exact rational or floating literal
    Number(Number),

    /// Free variable
    Symbol(Symbol),

    /// `pi` or `e`
    Constant(Constant),

    /// N-ary sum, sorted in descending canonical order (numbers last)
    Sum(Vec<Arc<Expr>>),

    /// N-ary product, sorted in ascending canonical order (numbers first)
    Product(Vec<Arc<Expr>>),

    /// Exponentiation
    Pow(Arc<Expr>, Arc<Expr>),

    /// Catalog function (`sin`, `exp`, `ln`, ...) or an uninterpreted one
    FunctionCall {
        name: Arc<str>,
        args: Vec<Arc<Expr>>,
    },

    /// Unevaluated derivative of an expression that has no known derivative
    Derivative { inner: Arc<Expr>, var: Symbol },
}

impl Hash for ExprKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Number(Number::Rational(r)) => {
                r.numer().hash(state);
                r.denom().hash(state);
            }
            Self::Number(Number::Float(f)) => {
                // Normalize -0.0 to 0.0 before hashing
                let normalized = if *f == 0.0 { 0.0 } else { *f };
                normalized.to_bits().hash(state);
            }
            Self::Symbol(s) => s.hash(state),
            Self::Constant(c) => c.hash(state),
            Self::Sum(children) | Self::Product(children) => {
                for child in children {
                    child.hash.hash(state);
                }
            }
            Self::Pow(base, exp) => {
                base.hash.hash(state);
                exp.hash.hash(state);
            }
            Self::FunctionCall { name, args } => {
                name.hash(state);
                for arg in args {
                    arg.hash.hash(state);
                }
            }
            Self::Derivative { inner, var } => {
                inner.hash.hash(state);
                var.hash(state);
            }
        }
    }
}

pub(crate) fn compute_expr_hash(kind: &ExprKind) -> u64 {
    let mut hasher = FxHasher::default();
    kind.hash(&mut hasher);
    hasher.finish()
}

/// Take the expression out of an `Arc`, cloning only when it is shared
pub(crate) fn unwrap_arc(arc: Arc<Expr>) -> Expr {
    Arc::try_unwrap(arc).unwrap_or_else(|shared| (*shared).clone())
}

// =============================================================================
// SHAPE QUERIES
// =============================================================================

impl Expr {
    #[inline]
    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    #[inline]
    pub fn structural_hash(&self) -> u64 {
        self.hash
    }

    pub fn is_sum(&self) -> bool {
        matches!(self.kind, ExprKind::Sum(_))
    }

    pub fn is_product(&self) -> bool {
        matches!(self.kind, ExprKind::Product(_))
    }

    pub fn is_pow(&self) -> bool {
        matches!(self.kind, ExprKind::Pow(..))
    }

    pub fn is_number(&self) -> bool {
        matches!(self.kind, ExprKind::Number(_))
    }

    /// Addends of a sum, or `None` for any other node
    pub fn terms(&self) -> Option<&[Arc<Expr>]> {
        match &self.kind {
            ExprKind::Sum(terms) => Some(terms),
            _ => None,
        }
    }

    /// Factors of a product, or `None` for any other node
    pub fn factors(&self) -> Option<&[Arc<Expr>]> {
        match &self.kind {
            ExprKind::Product(factors) => Some(factors),
            _ => None,
        }
    }

    pub fn as_pow(&self) -> Option<(&Expr, &Expr)> {
        match &self.kind {
            ExprKind::Pow(base, exp) => Some((base, exp)),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<(&str, &[Arc<Expr>])> {
        match &self.kind {
            ExprKind::FunctionCall { name, args } => Some((name, args)),
            _ => None,
        }
    }

    /// The single argument of `name(arg)`
    pub fn as_unary_call(&self, name: &str) -> Option<&Expr> {
        match self.as_function() {
            Some((n, [arg])) if n == name => Some(arg),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match &self.kind {
            ExprKind::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match &self.kind {
            ExprKind::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// True when this expression is exactly the variable `var`
    pub fn is_symbol(&self, var: &Symbol) -> bool {
        self.as_symbol() == Some(var)
    }

    pub fn is_zero_num(&self) -> bool {
        self.as_number().is_some_and(|n| n.is_zero())
    }

    pub fn is_one_num(&self) -> bool {
        self.as_number().is_some_and(|n| n.is_one())
    }

    pub fn is_neg_one_num(&self) -> bool {
        self.as_number().is_some_and(|n| n.is_neg_one())
    }

    /// Does `var` occur anywhere in the tree
    pub fn contains_var(&self, var: &Symbol) -> bool {
        match &self.kind {
            ExprKind::Number(_) | ExprKind::Constant(_) => false,
            ExprKind::Symbol(s) => s == var,
            ExprKind::Sum(children) | ExprKind::Product(children) => {
                children.iter().any(|c| c.contains_var(var))
            }
            ExprKind::Pow(base, exp) => base.contains_var(var) || exp.contains_var(var),
            ExprKind::FunctionCall { args, .. } => args.iter().any(|a| a.contains_var(var)),
            ExprKind::Derivative { inner, var: v } => v == var || inner.contains_var(var),
        }
    }

    pub fn is_free_of(&self, var: &Symbol) -> bool {
        !self.contains_var(var)
    }

    /// Split off the leading numeric coefficient: `-3*x^2` gives `(-3, x^2)`
    pub fn as_coeff_term(&self) -> (Number, Expr) {
        match &self.kind {
            ExprKind::Number(n) => (*n, Expr::one()),
            ExprKind::Product(factors) => match factors.first().and_then(|f| f.as_number()) {
                Some(n) => (n, Expr::product_from_sorted(factors[1..].to_vec())),
                None => (Number::one(), self.clone()),
            },
            _ => (Number::one(), self.clone()),
        }
    }

    /// Split into `(independent, dependent)` factors with respect to `var`.
    ///
    /// The product of the two parts rebuilds `self`. A non-product is entirely
    /// on one side.
    pub fn split_independent(&self, var: &Symbol) -> (Expr, Expr) {
        match &self.kind {
            ExprKind::Product(factors) => {
                let (free, dependent): (Vec<_>, Vec<_>) =
                    factors.iter().partition(|f| f.is_free_of(var));
                (
                    Expr::product_from_sorted(free.into_iter().cloned().collect()),
                    Expr::product_from_sorted(dependent.into_iter().cloned().collect()),
                )
            }
            _ if self.is_free_of(var) => (self.clone(), Expr::one()),
            _ => (Expr::one(), self.clone()),
        }
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        1 + match &self.kind {
            ExprKind::Number(_) | ExprKind::Symbol(_) | ExprKind::Constant(_) => 0,
            ExprKind::Sum(children) | ExprKind::Product(children) => {
                children.iter().map(|c| c.node_count()).sum()
            }
            ExprKind::Pow(base, exp) => base.node_count() + exp.node_count(),
            ExprKind::FunctionCall { args, .. } => args.iter().map(|a| a.node_count()).sum(),
            ExprKind::Derivative { inner, .. } => inner.node_count(),
        }
    }

    /// Maximum nesting depth, leaves at depth 1
    pub fn max_depth(&self) -> usize {
        1 + match &self.kind {
            ExprKind::Number(_) | ExprKind::Symbol(_) | ExprKind::Constant(_) => 0,
            ExprKind::Sum(children) | ExprKind::Product(children) => {
                children.iter().map(|c| c.max_depth()).max().unwrap_or(0)
            }
            ExprKind::Pow(base, exp) => base.max_depth().max(exp.max_depth()),
            ExprKind::FunctionCall { args, .. } => {
                args.iter().map(|a| a.max_depth()).max().unwrap_or(0)
            }
            ExprKind::Derivative { inner, .. } => inner.max_depth(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
