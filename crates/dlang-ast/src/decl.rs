//! Declaration AST nodes.

use crate::stmt::{Block, VarDeclStmt};
use crate::{Ident, TypeRef};
use dlang_core::Span;

/// A function declaration: `fn name(params) -> result { body }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionDecl<'ast> {
    /// Function name
    pub name: Ident<'ast>,
    /// Parameters and result annotation
    pub signature: FunctionType<'ast>,
    /// Function body
    pub body: Block<'ast>,
    /// Source location
    pub span: Span,
}

/// The declared signature of a function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionType<'ast> {
    /// Parameters in declaration order
    pub params: &'ast [Param<'ast>],
    /// Result annotation, if written
    pub result: Option<TypeRef<'ast>>,
    /// Source location
    pub span: Span,
}

/// A function parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param<'ast> {
    /// Parameter name
    pub name: Ident<'ast>,
    /// Optional type annotation
    pub ty: Option<TypeRef<'ast>>,
    /// Source location
    pub span: Span,
}

/// A class declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassDecl<'ast> {
    /// Class name
    pub name: Ident<'ast>,
    /// Implemented interfaces
    pub implements: &'ast [Ident<'ast>],
    /// Field declarations
    pub fields: &'ast [VarDeclStmt<'ast>],
    /// Methods
    pub methods: &'ast [FunctionDecl<'ast>],
    /// Source location
    pub span: Span,
}

/// An interface declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceDecl<'ast> {
    /// Interface name
    pub name: Ident<'ast>,
    /// Method signatures
    pub methods: &'ast [InterfaceMethod<'ast>],
    /// Source location
    pub span: Span,
}

/// A method signature inside an interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceMethod<'ast> {
    /// Method name
    pub name: Ident<'ast>,
    /// Method signature
    pub signature: FunctionType<'ast>,
    /// Source location
    pub span: Span,
}
