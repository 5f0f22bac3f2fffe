//! Block body compilation.

use dlang_ast::Block;
use dlang_core::ValType;

use super::{Result, StmtCompiler};

impl<'a, 'ctx> StmtCompiler<'a, 'ctx> {
    /// Compile the statements of a block in the current scope.
    ///
    /// The caller owns scoping: function bodies are lowered at function
    /// scope, block expressions push their own scope first. The block yields
    /// a value only when its final statement is an expression that does.
    pub fn compile_block_body<'ast>(&mut self, block: &Block<'ast>) -> Result<Option<ValType>> {
        let mut result = None;
        let count = block.stmts.len();

        for (i, stmt) in block.stmts.iter().enumerate() {
            result = self.compile(stmt, i + 1 == count)?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FunctionContext;
    use crate::emit::InstructionBuilder;
    use crate::ir::Instruction;
    use crate::type_resolver::NumericResolver;
    use bumpalo::Bump;
    use dlang_ast::AstBuilder;

    #[test]
    fn empty_block() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 8);
        let mut emitter = InstructionBuilder::new();

        let result = StmtCompiler::new(&mut ctx, &mut emitter)
            .compile_block_body(&b.block(&[]))
            .unwrap();
        assert_eq!(result, None);
        assert!(emitter.is_empty());
    }

    #[test]
    fn trailing_declaration_yields_nothing() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 8);
        let mut emitter = InstructionBuilder::new();

        let block = b.block(&[b.expr_stmt(b.int(1)), b.let_stmt("x", b.int(2))]);
        let result = StmtCompiler::new(&mut ctx, &mut emitter)
            .compile_block_body(&block)
            .unwrap();
        assert_eq!(result, None);
        assert_eq!(
            emitter.code(),
            &[
                Instruction::Const(1),
                Instruction::Drop,
                Instruction::Const(2),
                Instruction::LocalSet(0),
            ]
        );
    }

    #[test]
    fn stops_at_first_error() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 8);
        let mut emitter = InstructionBuilder::new();

        let block = b.block(&[
            b.expr_stmt(b.path("a")),
            b.expr_stmt(b.path("b")),
        ]);
        let err = StmtCompiler::new(&mut ctx, &mut emitter)
            .compile_block_body(&block)
            .unwrap_err();
        assert!(err.to_string().contains("'a'"));
    }
}
