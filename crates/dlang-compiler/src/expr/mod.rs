//! Expression compiler.
//!
//! The [`ExprCompiler`] lowers one expression into the current instruction
//! sequence and reports the type of the value it leaves on the stack, or
//! `None` when it leaves nothing.
//!
//! # Example
//!
//! ```ignore
//! let mut compiler = ExprCompiler::new(&mut ctx, &mut emitter);
//! let ty = compiler.compile(&expr)?;
//! ```

mod binary;
mod block;
mod identifiers;
mod literals;

use dlang_ast::Expr;
use dlang_core::{CompilationError, ValType};

use crate::context::FunctionContext;
use crate::emit::InstructionBuilder;

type Result<T> = std::result::Result<T, CompilationError>;

/// Lowers expressions to stack-machine instructions.
pub struct ExprCompiler<'a, 'ctx> {
    /// Function context with the binding table and resolver
    ctx: &'a mut FunctionContext<'ctx>,
    /// Instruction builder for the current sequence
    emitter: &'a mut InstructionBuilder,
}

impl<'a, 'ctx> ExprCompiler<'a, 'ctx> {
    pub fn new(ctx: &'a mut FunctionContext<'ctx>, emitter: &'a mut InstructionBuilder) -> Self {
        Self { ctx, emitter }
    }

    /// Lower an expression.
    ///
    /// Returns the type of the value left on the stack, if any.
    pub fn compile<'ast>(&mut self, expr: &Expr<'ast>) -> Result<Option<ValType>> {
        match expr {
            Expr::Literal(lit) => literals::compile_literal(self, lit),
            Expr::Path(path) => identifiers::compile_path(self, path),
            Expr::Binary(bin) => binary::compile_binary(self, bin),
            Expr::Block(block) => block::compile_block_expr(self, block),

            Expr::Unary(_)
            | Expr::Call(_)
            | Expr::Array(_)
            | Expr::Index(_)
            | Expr::ArrayPattern(_)
            | Expr::Member(_)
            | Expr::New(_) => Err(CompilationError::unsupported(expr.describe(), expr.span())),
        }
    }

    /// Lower an expression that must produce a value.
    ///
    /// `what` names the position for the diagnostic, e.g. "left operand".
    pub fn compile_value<'ast>(&mut self, expr: &Expr<'ast>, what: &str) -> Result<ValType> {
        self.compile(expr)?
            .ok_or_else(|| CompilationError::TypeMismatch {
                message: format!("{what} does not produce a value"),
                span: expr.span(),
            })
    }

    pub(crate) fn ctx(&mut self) -> &mut FunctionContext<'ctx> {
        self.ctx
    }

    pub(crate) fn emitter(&mut self) -> &mut InstructionBuilder {
        self.emitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Instruction, NumericOp};
    use crate::type_resolver::NumericResolver;
    use bumpalo::Bump;
    use dlang_ast::{AstBuilder, BinaryOp, UnaryOp};

    fn lower<'ast>(expr: &Expr<'ast>) -> Result<(Option<ValType>, Vec<Instruction>)> {
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 64);
        let mut emitter = InstructionBuilder::new();
        let ty = ExprCompiler::new(&mut ctx, &mut emitter).compile(expr)?;
        Ok((ty, emitter.code().to_vec()))
    }

    #[test]
    fn arithmetic_is_postorder() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        // (1 + 2) * 3
        let expr = b.binary(
            b.binary(b.int(1), BinaryOp::Add, b.int(2)),
            BinaryOp::Mul,
            b.int(3),
        );
        let (ty, code) = lower(expr).unwrap();
        assert_eq!(ty, Some(ValType::I32));
        assert_eq!(
            code,
            vec![
                Instruction::Const(1),
                Instruction::Const(2),
                Instruction::Binary(NumericOp::Add),
                Instruction::Const(3),
                Instruction::Binary(NumericOp::Mul),
            ]
        );
    }

    #[test]
    fn unlowered_expressions_are_unsupported() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        for expr in [b.unary(UnaryOp::Neg, b.int(1)), b.call("f", &[])] {
            let err = lower(expr).unwrap_err();
            assert!(
                matches!(err, CompilationError::UnsupportedConstruct { .. }),
                "{err}"
            );
            assert_eq!(err.span(), expr.span());
        }
    }

    #[test]
    fn compile_value_rejects_empty_block() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let empty = b.block_expr(&[]);

        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 64);
        let mut emitter = InstructionBuilder::new();
        let err = ExprCompiler::new(&mut ctx, &mut emitter)
            .compile_value(empty, "initializer")
            .unwrap_err();
        assert_eq!(
            err,
            CompilationError::TypeMismatch {
                message: "initializer does not produce a value".into(),
                span: empty.span(),
            }
        );
    }
}
