//! Expression AST nodes.
//!
//! Only literals, paths, arithmetic and blocks have a lowering today. The
//! remaining variants are produced by the front end and rejected by the code
//! generator with a descriptive error.

use crate::stmt::Block;
use crate::{BinaryOp, Ident, UnaryOp};
use dlang_core::Span;

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Literal value
    Literal(LiteralExpr<'ast>),
    /// Variable reference
    Path(PathExpr<'ast>),
    /// Binary operation
    Binary(&'ast BinaryExpr<'ast>),
    /// Block used as an expression
    Block(&'ast Block<'ast>),
    /// Unary prefix operation
    Unary(&'ast UnaryExpr<'ast>),
    /// Function call
    Call(&'ast CallExpr<'ast>),
    /// Array literal
    Array(&'ast ArrayExpr<'ast>),
    /// Indexing
    Index(&'ast IndexExpr<'ast>),
    /// Array destructuring pattern
    ArrayPattern(&'ast ArrayPatternExpr<'ast>),
    /// Member access (.)
    Member(&'ast MemberExpr<'ast>),
    /// Object construction
    New(&'ast NewExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::Path(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Block(e) => e.span,
            Self::Unary(e) => e.span,
            Self::Call(e) => e.span,
            Self::Array(e) => e.span,
            Self::Index(e) => e.span,
            Self::ArrayPattern(e) => e.span,
            Self::Member(e) => e.span,
            Self::New(e) => e.span,
        }
    }

    /// Short description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Literal(e) => match e.kind {
                LiteralKind::Int(_) => "integer literal",
                LiteralKind::String(_) => "string literal",
                LiteralKind::Bool(_) => "boolean literal",
            },
            Self::Path(_) => "path expression",
            Self::Binary(_) => "binary expression",
            Self::Block(_) => "block expression",
            Self::Unary(_) => "unary expression",
            Self::Call(_) => "call expression",
            Self::Array(_) => "array expression",
            Self::Index(_) => "index expression",
            Self::ArrayPattern(_) => "array pattern",
            Self::Member(_) => "member access",
            Self::New(_) => "new expression",
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr<'ast> {
    /// The literal kind and value
    pub kind: LiteralKind<'ast>,
    /// Source location
    pub span: Span,
}

/// Kinds of literal values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind<'ast> {
    /// Integer literal as written, before range checking
    Int(i64),
    /// String literal (escapes already processed)
    String(&'ast str),
    /// Boolean literal
    Bool(bool),
}

/// A reference to a variable by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathExpr<'ast> {
    /// The referenced name
    pub ident: Ident<'ast>,
    /// Source location
    pub span: Span,
}

/// A binary operation: `left op right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    /// Left operand
    pub left: &'ast Expr<'ast>,
    /// Operator
    pub op: BinaryOp,
    /// Right operand
    pub right: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A unary prefix operation: `op operand`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    /// Operator
    pub op: UnaryOp,
    /// Operand
    pub operand: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A function call: `callee(args)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    /// The callee
    pub callee: &'ast Expr<'ast>,
    /// Arguments
    pub args: &'ast [Expr<'ast>],
    /// Source location
    pub span: Span,
}

/// An array literal: `[a, b, c]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayExpr<'ast> {
    /// Elements
    pub elements: &'ast [Expr<'ast>],
    /// Source location
    pub span: Span,
}

/// An index operation: `object[index]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexExpr<'ast> {
    /// The indexed object
    pub object: &'ast Expr<'ast>,
    /// The index
    pub index: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// An array destructuring pattern: `[a, b, ...rest]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayPatternExpr<'ast> {
    /// Bound element names
    pub elements: &'ast [Ident<'ast>],
    /// Name bound to the remaining elements
    pub rest: Option<Ident<'ast>>,
    /// Source location
    pub span: Span,
}

/// Member access: `object.member`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberExpr<'ast> {
    /// The object
    pub object: &'ast Expr<'ast>,
    /// The member name
    pub member: Ident<'ast>,
    /// Source location
    pub span: Span,
}

/// Object construction: `new Class(args)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewExpr<'ast> {
    /// The constructed class
    pub class: Ident<'ast>,
    /// Constructor arguments
    pub args: &'ast [Expr<'ast>],
    /// Source location
    pub span: Span,
}
