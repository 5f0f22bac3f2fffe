//! Statement AST nodes.

use crate::decl::{ClassDecl, FunctionDecl, InterfaceDecl};
use crate::{Expr, Ident, TypeRef};
use dlang_core::Span;

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// Expression statement
    Expr(ExprStmt<'ast>),
    /// Variable declaration
    VarDecl(VarDeclStmt<'ast>),
    /// Function declaration
    Function(FunctionDecl<'ast>),
    /// Class declaration
    Class(&'ast ClassDecl<'ast>),
    /// Interface declaration
    Interface(&'ast InterfaceDecl<'ast>),
    /// If statement
    If(&'ast IfStmt<'ast>),
    /// For-in loop
    For(&'ast ForStmt<'ast>),
    /// Break statement
    Break(BreakStmt),
    /// Return statement
    Return(ReturnStmt<'ast>),
}

impl<'ast> Stmt<'ast> {
    /// Get the span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Self::Expr(s) => s.span,
            Self::VarDecl(s) => s.span,
            Self::Function(s) => s.span,
            Self::Class(s) => s.span,
            Self::Interface(s) => s.span,
            Self::If(s) => s.span,
            Self::For(s) => s.span,
            Self::Break(s) => s.span,
            Self::Return(s) => s.span,
        }
    }

    /// Short description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Expr(_) => "expression statement",
            Self::VarDecl(_) => "variable declaration",
            Self::Function(_) => "function declaration",
            Self::Class(_) => "class declaration",
            Self::Interface(_) => "interface declaration",
            Self::If(_) => "if statement",
            Self::For(_) => "for statement",
            Self::Break(_) => "break statement",
            Self::Return(_) => "return statement",
        }
    }
}

/// An expression used as a statement: `expr;`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    /// The expression
    pub expr: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A variable declaration.
///
/// Examples:
/// - `let x;`
/// - `let x = 5;`
/// - `let mut x: i32 = 5;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDeclStmt<'ast> {
    /// Variable name
    pub name: Ident<'ast>,
    /// Optional type annotation
    pub ty: Option<TypeRef<'ast>>,
    /// Optional initializer
    pub init: Option<&'ast Expr<'ast>>,
    /// Declared mutable
    pub mutable: bool,
    /// Source location
    pub span: Span,
}

/// A block of statements: `{ ... }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    /// Statements in the block
    pub stmts: &'ast [Stmt<'ast>],
    /// Source location
    pub span: Span,
}

/// An if statement with an optional else branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    /// Condition
    pub condition: &'ast Expr<'ast>,
    /// Then branch
    pub then_block: &'ast Block<'ast>,
    /// Else branch
    pub else_block: Option<&'ast Block<'ast>>,
    /// Source location
    pub span: Span,
}

/// A for-in loop: `for x in iterable { ... }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForStmt<'ast> {
    /// Loop variable
    pub binding: Ident<'ast>,
    /// Iterated expression
    pub iterable: &'ast Expr<'ast>,
    /// Loop body
    pub body: &'ast Block<'ast>,
    /// Source location
    pub span: Span,
}

/// A break statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakStmt {
    /// Source location
    pub span: Span,
}

/// A return statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    /// Optional return value
    pub value: Option<&'ast Expr<'ast>>,
    /// Source location
    pub span: Span,
}
