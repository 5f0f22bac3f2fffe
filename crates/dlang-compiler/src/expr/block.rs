//! Block expression compilation.
//!
//! A block in expression position opens a nested scope and lowers into its
//! own instruction sequence, wrapped in a structured `block` instruction.

use dlang_ast::Block;
use dlang_core::ValType;

use super::{ExprCompiler, Result};
use crate::emit::InstructionBuilder;
use crate::stmt::StmtCompiler;

/// Compile `{ ... }` used as an expression.
pub fn compile_block_expr(
    compiler: &mut ExprCompiler<'_, '_>,
    block: &Block<'_>,
) -> Result<Option<ValType>> {
    let mut nested = InstructionBuilder::new();

    compiler.ctx().push_scope();
    let result = StmtCompiler::new(compiler.ctx(), &mut nested).compile_block_body(block)?;
    compiler.ctx().pop_scope()?;

    compiler.emitter().emit_block(result, nested.finish());
    Ok(result)
}
