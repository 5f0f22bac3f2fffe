//! Abstract Syntax Tree for dlang.
//!
//! The front end allocates every node in a [`bumpalo::Bump`] arena and hands
//! the code generator an immutable [`Module`]. Child nodes are `&'ast`
//! references into that arena, so the whole tree is `Copy` and cheap to pass
//! around.
//!
//! The tree is a set of closed sum types. Consumers match exhaustively, which
//! makes every construct without a lowering an explicit decision.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use dlang_ast::{AstBuilder, BinaryOp};
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let body = b.block(&[
//!     b.let_stmt("x", b.int(2)),
//!     b.expr_stmt(b.binary(b.path("x"), BinaryOp::Add, b.int(1))),
//! ]);
//! let module = b.module(&[b.function("main", &[], body)]);
//! assert_eq!(module.items.len(), 1);
//! ```

mod builder;
pub mod decl;
pub mod expr;
mod node;
pub mod ops;
pub mod stmt;
pub mod types;

pub use builder::AstBuilder;
pub use decl::{ClassDecl, FunctionDecl, FunctionType, InterfaceDecl, InterfaceMethod, Param};
pub use expr::{
    ArrayExpr, ArrayPatternExpr, BinaryExpr, CallExpr, Expr, IndexExpr, LiteralExpr,
    LiteralKind, MemberExpr, NewExpr, PathExpr, UnaryExpr,
};
pub use node::{Ident, Module};
pub use ops::{BinaryOp, UnaryOp};
pub use stmt::{Block, BreakStmt, ExprStmt, ForStmt, IfStmt, ReturnStmt, Stmt, VarDeclStmt};
pub use types::TypeRef;

pub use dlang_core::Span;
