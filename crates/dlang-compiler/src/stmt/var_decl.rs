//! Variable declaration compilation.
//!
//! Handles:
//! - Initialized declarations: `let x = 5;`
//! - Bare declarations: `let x;` (slot is zero-initialized by the machine)
//! - Annotated declarations: `let x: i32 = 5;`

use dlang_ast::VarDeclStmt;
use dlang_core::{CompilationError, ValType};

use super::{Result, StmtCompiler};

impl<'a, 'ctx> StmtCompiler<'a, 'ctx> {
    /// Compile a variable declaration.
    ///
    /// The initializer is lowered before the new binding exists, so
    /// `let x = x + 1;` reads the outer `x`.
    pub fn compile_var_decl<'ast>(&mut self, decl: &VarDeclStmt<'ast>) -> Result<()> {
        let declared = match &decl.ty {
            Some(ty) => Some(self.ctx.resolver().resolve_value_type(ty)?),
            None => None,
        };

        let init_ty = match decl.init {
            Some(init) => Some(self.expr_compiler().compile_value(init, "initializer")?),
            None => None,
        };

        let ty = match (declared, init_ty) {
            (Some(declared), Some(found)) if declared != found => {
                return Err(CompilationError::TypeMismatch {
                    message: format!(
                        "variable '{}' is declared {declared} but initialized with {found}",
                        decl.name.name
                    ),
                    span: decl.span,
                });
            }
            (Some(ty), _) | (None, Some(ty)) => ty,
            (None, None) => ValType::NUMERIC,
        };

        let slot = self.ctx.declare_local(decl.name.name, ty, decl.name.span)?;

        if init_ty.is_some() {
            self.emitter.emit_local_set(slot);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FunctionContext;
    use crate::emit::InstructionBuilder;
    use crate::ir::{Instruction, NumericOp};
    use crate::type_resolver::NumericResolver;
    use bumpalo::Bump;
    use dlang_ast::{AstBuilder, BinaryOp};
    use dlang_core::Span;

    #[test]
    fn initializer_then_set() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 8);
        let mut emitter = InstructionBuilder::new();

        let stmt = b.let_stmt("x", b.int(2));
        StmtCompiler::new(&mut ctx, &mut emitter)
            .compile(&stmt, false)
            .unwrap();
        assert_eq!(
            emitter.code(),
            &[Instruction::Const(2), Instruction::LocalSet(0)]
        );
        assert_eq!(ctx.lookup("x").unwrap().slot, 0);
    }

    #[test]
    fn bare_declaration_only_allocates() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 8);
        let mut emitter = InstructionBuilder::new();

        StmtCompiler::new(&mut ctx, &mut emitter)
            .compile(&b.let_uninit("x"), false)
            .unwrap();
        assert!(emitter.is_empty());
        assert_eq!(ctx.into_locals(), vec![ValType::I32]);
    }

    #[test]
    fn initializer_sees_outer_binding() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 8);
        ctx.declare_local("x", ValType::I32, Span::new(1, 1, 1)).unwrap();
        ctx.push_scope();
        let mut emitter = InstructionBuilder::new();

        // let x = x + 1;   (inner scope)
        let stmt = b.let_stmt("x", b.binary(b.path("x"), BinaryOp::Add, b.int(1)));
        StmtCompiler::new(&mut ctx, &mut emitter)
            .compile(&stmt, false)
            .unwrap();
        assert_eq!(
            emitter.code(),
            &[
                Instruction::LocalGet(0),
                Instruction::Const(1),
                Instruction::Binary(NumericOp::Add),
                Instruction::LocalSet(1),
            ]
        );
    }

    #[test]
    fn self_reference_without_outer_is_unbound() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 8);
        let mut emitter = InstructionBuilder::new();

        let stmt = b.let_stmt("x", b.path("x"));
        let err = StmtCompiler::new(&mut ctx, &mut emitter)
            .compile(&stmt, false)
            .unwrap_err();
        assert!(matches!(err, CompilationError::UnboundIdentifier { .. }));
        assert!(ctx.lookup("x").is_none());
    }

    #[test]
    fn redeclaration_in_same_scope() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 8);
        let mut emitter = InstructionBuilder::new();
        let mut compiler = StmtCompiler::new(&mut ctx, &mut emitter);

        compiler.compile(&b.let_stmt("x", b.int(1)), false).unwrap();
        let err = compiler
            .compile(&b.let_stmt("x", b.int(2)), false)
            .unwrap_err();
        assert!(matches!(
            err,
            CompilationError::DuplicateBinding { ref name, .. } if name == "x"
        ));
    }

    #[test]
    fn annotation_must_resolve() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 8);
        let mut emitter = InstructionBuilder::new();
        let mut compiler = StmtCompiler::new(&mut ctx, &mut emitter);

        compiler
            .compile(&b.var_decl("a", Some("i32"), Some(b.int(1))), false)
            .unwrap();
        let err = compiler
            .compile(&b.var_decl("b", Some("bool"), Some(b.int(1))), false)
            .unwrap_err();
        assert!(matches!(err, CompilationError::TypeMismatch { .. }));
    }

    #[test]
    fn valueless_initializer_is_type_mismatch() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let resolver = NumericResolver;
        let mut ctx = FunctionContext::new("test", &resolver, 8);
        let mut emitter = InstructionBuilder::new();

        let stmt = b.let_stmt("x", b.block_expr(&[b.let_uninit("y")]));
        let err = StmtCompiler::new(&mut ctx, &mut emitter)
            .compile(&stmt, false)
            .unwrap_err();
        assert!(err.to_string().contains("initializer does not produce a value"));
    }
}
