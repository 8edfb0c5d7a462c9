//! Core types for symbolic mathematics
//!
//! This module contains the fundamental types:
//! - `Expr` / `ExprKind` - Expression tree
//! - `Number` - exact rationals with a floating fallback
//! - `Symbol` / `SymbolTable` - variables
//! - `Polynomial` - dense univariate polynomial view of an expression
//! - Linear pattern extraction and display formatting

mod display;
pub(crate) mod expr;
pub(crate) mod number;
pub mod pattern;
pub(crate) mod poly;
pub(crate) mod symbol;

pub use expr::{Constant, Expr, ExprKind, expr_cmp};
pub use number::Number;
pub use poly::Polynomial;
pub use symbol::{Symbol, SymbolTable, sym};
