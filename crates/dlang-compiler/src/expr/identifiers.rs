//! Path (variable reference) compilation.

use dlang_ast::PathExpr;
use dlang_core::{CompilationError, ValType};

use super::{ExprCompiler, Result};

/// Compile a variable reference to `local.get` of its innermost binding.
pub fn compile_path(
    compiler: &mut ExprCompiler<'_, '_>,
    path: &PathExpr<'_>,
) -> Result<Option<ValType>> {
    let name = path.ident.name;
    let Some(binding) = compiler.ctx().lookup(name) else {
        return Err(CompilationError::UnboundIdentifier {
            name: name.to_string(),
            span: path.span,
        });
    };

    let (slot, ty) = (binding.slot, binding.ty);
    compiler.emitter().emit_local_get(slot);
    Ok(Some(ty))
}
