//! Literal expression compilation.

use dlang_ast::{LiteralExpr, LiteralKind};
use dlang_core::{CompilationError, ValType};

use super::{ExprCompiler, Result};

/// Compile a literal expression.
///
/// Integer literals must fit `i32`. String and boolean literals have no
/// numeric encoding.
pub fn compile_literal(
    compiler: &mut ExprCompiler<'_, '_>,
    lit: &LiteralExpr<'_>,
) -> Result<Option<ValType>> {
    match lit.kind {
        LiteralKind::Int(value) => {
            let value = i32::try_from(value).map_err(|_| CompilationError::LiteralOutOfRange {
                value,
                span: lit.span,
            })?;
            compiler.emitter().emit_const(value);
            Ok(Some(ValType::I32))
        }
        LiteralKind::String(_) => Err(CompilationError::unsupported("string literal", lit.span)),
        LiteralKind::Bool(_) => Err(CompilationError::unsupported("boolean literal", lit.span)),
    }
}
