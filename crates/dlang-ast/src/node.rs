//! Root and leaf nodes shared by the rest of the tree.

use crate::stmt::Stmt;
use dlang_core::Span;
use std::fmt;

/// An identifier with its source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident<'ast> {
    /// The identifier text.
    pub name: &'ast str,
    /// Source location.
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A complete compilation unit: the top-level statements in source order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Module<'ast> {
    /// Top-level items.
    pub items: &'ast [Stmt<'ast>],
    /// Source location.
    pub span: Span,
}

impl<'ast> Module<'ast> {
    /// Iterate over the function declarations, skipping everything else.
    pub fn functions(&self) -> impl Iterator<Item = &crate::FunctionDecl<'ast>> {
        self.items.iter().filter_map(|item| match item {
            Stmt::Function(decl) => Some(decl),
            _ => None,
        })
    }
}
