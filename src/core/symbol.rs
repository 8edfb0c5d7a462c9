//! Variables and the per-call symbol table.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::expr::Expr;

/// A named free variable.
///
/// Names are case-sensitive; `X` and `x` are distinct variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: impl AsRef<str>) -> Self {
        Symbol(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// The symbol as an expression
    pub fn to_expr(&self) -> Expr {
        Expr::from_symbol(self.clone())
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorthand for [`Symbol::new`]
pub fn sym(name: &str) -> Symbol {
    Symbol::new(name)
}

/// Maps variable names seen during one build to their symbols.
///
/// Seeded with the integration variable; other names are registered the
/// first time they are looked up. Never shared between calls.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: FxHashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new(var: &Symbol) -> Self {
        let mut symbols = FxHashMap::default();
        symbols.insert(var.name().to_owned(), var.clone());
        SymbolTable { symbols }
    }

    /// Fetch the symbol for `name`, registering it on first use
    pub fn resolve(&mut self, name: &str) -> Symbol {
        self.symbols
            .entry(name.to_owned())
            .or_insert_with(|| Symbol::new(name))
            .clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
