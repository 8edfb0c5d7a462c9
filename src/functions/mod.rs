//! Centralized elementary-function catalog
//!
//! This module is the single source of truth for the named functions the
//! parser recognizes, their numeric evaluation and their derivatives.

use crate::Expr;

pub(crate) mod definitions;
pub(crate) mod registry;

pub(crate) use registry::Registry;

// ===== Helpers for building catalog expressions =====

/// Apply a catalog function in canonical form.
///
/// `sqrt` becomes a power and `exp` goes through the exponential constructor,
/// so every path that names them builds the same tree.
pub(crate) fn call(name: &str, arg: Expr) -> Expr {
    match name {
        "sqrt" => arg.sqrt(),
        "log" => arg.ln(),
        _ => Expr::func(name, arg),
    }
}

/// Negate an expression
pub(crate) fn neg(e: Expr) -> Expr {
    Expr::negate(e)
}

/// Is `name` a catalog function (case-insensitive)? Returns the canonical name.
pub fn lookup(name: &str) -> Option<&'static str> {
    Registry::get(&name.to_ascii_lowercase()).map(|def| def.name)
}
