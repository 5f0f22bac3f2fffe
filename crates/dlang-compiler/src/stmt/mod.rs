//! Statement compiler.
//!
//! The [`StmtCompiler`] lowers statements into the current instruction
//! sequence. Only expression statements and variable declarations have a
//! lowering; every other statement kind is rejected explicitly.
//!
//! # Example
//!
//! ```ignore
//! let mut compiler = StmtCompiler::new(&mut ctx, &mut emitter);
//! let result = compiler.compile_block_body(&block)?;
//! ```

mod block;
mod var_decl;

use dlang_ast::{ExprStmt, Stmt};
use dlang_core::{CompilationError, ValType};

use crate::context::FunctionContext;
use crate::emit::InstructionBuilder;
use crate::expr::ExprCompiler;

type Result<T> = std::result::Result<T, CompilationError>;

/// Lowers statements to stack-machine instructions.
pub struct StmtCompiler<'a, 'ctx> {
    /// Function context with the binding table and resolver
    ctx: &'a mut FunctionContext<'ctx>,
    /// Instruction builder for the current sequence
    emitter: &'a mut InstructionBuilder,
}

impl<'a, 'ctx> StmtCompiler<'a, 'ctx> {
    pub fn new(ctx: &'a mut FunctionContext<'ctx>, emitter: &'a mut InstructionBuilder) -> Self {
        Self { ctx, emitter }
    }

    /// Compile a statement.
    ///
    /// `is_last` marks the final statement of a block, whose value (if any)
    /// stays on the stack as the block's result. Returns that value's type.
    pub fn compile<'ast>(&mut self, stmt: &Stmt<'ast>, is_last: bool) -> Result<Option<ValType>> {
        match stmt {
            Stmt::Expr(expr_stmt) => self.compile_expr_stmt(expr_stmt, is_last),
            Stmt::VarDecl(var_decl) => {
                self.compile_var_decl(var_decl)?;
                Ok(None)
            }
            Stmt::Function(decl) => Err(CompilationError::unsupported(
                "nested function declaration",
                decl.span,
            )),

            Stmt::Class(_)
            | Stmt::Interface(_)
            | Stmt::If(_)
            | Stmt::For(_)
            | Stmt::Break(_)
            | Stmt::Return(_) => Err(CompilationError::unsupported(stmt.describe(), stmt.span())),
        }
    }

    /// Compile an expression statement.
    ///
    /// A value produced by a non-final statement is dropped.
    fn compile_expr_stmt<'ast>(
        &mut self,
        expr_stmt: &ExprStmt<'ast>,
        is_last: bool,
    ) -> Result<Option<ValType>> {
        let ty = self.expr_compiler().compile(expr_stmt.expr)?;

        if is_last {
            return Ok(ty);
        }
        if ty.is_some() {
            self.emitter.emit_drop();
        }
        Ok(None)
    }

    /// Create an expression compiler sharing this compiler's context and sequence.
    fn expr_compiler(&mut self) -> ExprCompiler<'_, 'ctx> {
        ExprCompiler::new(self.ctx, self.emitter)
    }
}
