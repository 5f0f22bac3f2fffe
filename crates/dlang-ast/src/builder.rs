//! Arena-backed convenience constructors for AST nodes.
//!
//! Front ends and tests use [`AstBuilder`] to assemble trees without spelling
//! out every span. Each node gets a fresh span on its own line so diagnostics
//! can tell nodes apart.

use std::cell::Cell;

use bumpalo::Bump;
use dlang_core::Span;

use crate::{
    BinaryExpr, BinaryOp, Block, BreakStmt, CallExpr, Expr, ExprStmt, FunctionDecl, FunctionType,
    Ident, IfStmt, LiteralExpr, LiteralKind, Module, Param, PathExpr, ReturnStmt, Stmt, TypeRef,
    UnaryExpr, UnaryOp, VarDeclStmt,
};

/// Builds AST nodes inside a [`Bump`] arena.
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    next_line: Cell<u32>,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            next_line: Cell::new(1),
        }
    }

    /// The arena nodes are allocated in.
    pub fn arena(&self) -> &'ast Bump {
        self.arena
    }

    /// A fresh span on the next unused line.
    pub fn span(&self) -> Span {
        let line = self.next_line.get();
        self.next_line.set(line + 1);
        Span::new(line, 1, 1)
    }

    pub fn ident(&self, name: &str) -> Ident<'ast> {
        Ident::new(self.arena.alloc_str(name), self.span())
    }

    pub fn type_ref(&self, name: &str) -> TypeRef<'ast> {
        TypeRef::named(self.ident(name))
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn expr(&self, expr: Expr<'ast>) -> &'ast Expr<'ast> {
        self.arena.alloc(expr)
    }

    pub fn int(&self, value: i64) -> &'ast Expr<'ast> {
        self.literal(LiteralKind::Int(value))
    }

    pub fn bool(&self, value: bool) -> &'ast Expr<'ast> {
        self.literal(LiteralKind::Bool(value))
    }

    pub fn string(&self, value: &str) -> &'ast Expr<'ast> {
        let value = self.arena.alloc_str(value);
        self.literal(LiteralKind::String(value))
    }

    fn literal(&self, kind: LiteralKind<'ast>) -> &'ast Expr<'ast> {
        self.expr(Expr::Literal(LiteralExpr {
            kind,
            span: self.span(),
        }))
    }

    pub fn path(&self, name: &str) -> &'ast Expr<'ast> {
        let ident = self.ident(name);
        self.expr(Expr::Path(PathExpr {
            ident,
            span: ident.span,
        }))
    }

    pub fn binary(
        &self,
        left: &'ast Expr<'ast>,
        op: BinaryOp,
        right: &'ast Expr<'ast>,
    ) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(BinaryExpr {
            left,
            op,
            right,
            span: left.span().to(right.span()),
        });
        self.expr(Expr::Binary(node))
    }

    pub fn unary(&self, op: UnaryOp, operand: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(UnaryExpr {
            op,
            operand,
            span: self.span(),
        });
        self.expr(Expr::Unary(node))
    }

    pub fn call(&self, callee: &str, args: &[Expr<'ast>]) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(CallExpr {
            callee: self.path(callee),
            args: self.arena.alloc_slice_copy(args),
            span: self.span(),
        });
        self.expr(Expr::Call(node))
    }

    /// A block used in expression position.
    pub fn block_expr(&self, stmts: &[Stmt<'ast>]) -> &'ast Expr<'ast> {
        let block = self.arena.alloc(self.block(stmts));
        self.expr(Expr::Block(block))
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    pub fn block(&self, stmts: &[Stmt<'ast>]) -> Block<'ast> {
        Block {
            stmts: self.arena.alloc_slice_copy(stmts),
            span: self.span(),
        }
    }

    pub fn expr_stmt(&self, expr: &'ast Expr<'ast>) -> Stmt<'ast> {
        Stmt::Expr(ExprStmt {
            expr,
            span: expr.span(),
        })
    }

    /// `let name = init;`
    pub fn let_stmt(&self, name: &str, init: &'ast Expr<'ast>) -> Stmt<'ast> {
        self.var_decl(name, None, Some(init))
    }

    /// `let name;`
    pub fn let_uninit(&self, name: &str) -> Stmt<'ast> {
        self.var_decl(name, None, None)
    }

    /// `let name: ty = init;` with optional pieces.
    pub fn var_decl(
        &self,
        name: &str,
        ty: Option<&str>,
        init: Option<&'ast Expr<'ast>>,
    ) -> Stmt<'ast> {
        let name = self.ident(name);
        Stmt::VarDecl(VarDeclStmt {
            name,
            ty: ty.map(|ty| self.type_ref(ty)),
            init,
            mutable: false,
            span: name.span,
        })
    }

    pub fn if_stmt(&self, condition: &'ast Expr<'ast>, then_stmts: &[Stmt<'ast>]) -> Stmt<'ast> {
        let then_block = self.arena.alloc(self.block(then_stmts));
        Stmt::If(self.arena.alloc(IfStmt {
            condition,
            then_block,
            else_block: None,
            span: self.span(),
        }))
    }

    pub fn return_stmt(&self, value: Option<&'ast Expr<'ast>>) -> Stmt<'ast> {
        Stmt::Return(ReturnStmt {
            value,
            span: self.span(),
        })
    }

    pub fn break_stmt(&self) -> Stmt<'ast> {
        Stmt::Break(BreakStmt { span: self.span() })
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    /// `fn name(params) { body }` with unannotated parameters.
    pub fn function(&self, name: &str, params: &[&str], body: Block<'ast>) -> Stmt<'ast> {
        self.function_with_result(name, params, None, body)
    }

    /// `fn name(params) -> result { body }`.
    pub fn function_with_result(
        &self,
        name: &str,
        params: &[&str],
        result: Option<&str>,
        body: Block<'ast>,
    ) -> Stmt<'ast> {
        let name = self.ident(name);
        let params: Vec<Param<'ast>> = params
            .iter()
            .map(|p| {
                let ident = self.ident(p);
                Param {
                    name: ident,
                    ty: None,
                    span: ident.span,
                }
            })
            .collect();
        let signature = FunctionType {
            params: self.arena.alloc_slice_copy(&params),
            result: result.map(|r| self.type_ref(r)),
            span: self.span(),
        };
        Stmt::Function(FunctionDecl {
            name,
            signature,
            body,
            span: name.span,
        })
    }

    pub fn module(&self, items: &[Stmt<'ast>]) -> Module<'ast> {
        Module {
            items: self.arena.alloc_slice_copy(items),
            span: Span::new(1, 1, 0),
        }
    }
}
