//! Type annotations.

use crate::Ident;
use dlang_core::Span;

/// A named type annotation, e.g. the `i32` in `let x: i32 = 1`.
///
/// The AST does not interpret the name. A signature resolver in the
/// code generator decides what it means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeRef<'ast> {
    /// The referenced type name.
    pub name: Ident<'ast>,
    /// Source location.
    pub span: Span,
}

impl<'ast> TypeRef<'ast> {
    pub fn named(name: Ident<'ast>) -> Self {
        Self {
            name,
            span: name.span,
        }
    }
}
