//! Function compiler for lowering one function declaration.
//!
//! [`FunctionCompiler`] owns everything a single function needs while it is
//! generated: a fresh binding table and an instruction builder. It:
//!
//! - Declares parameters as slots `0..n`
//! - Lowers the body at function scope
//! - Resolves the final signature once the body's result is known
//! - Terminates the body with `End`
//!
//! The output is a [`PendingFunction`] that has not touched the module yet.
//! The module pass commits it, so a failed function leaves no trace.
//!
//! # Example
//!
//! ```ignore
//! let compiler = FunctionCompiler::new(&decl, &resolver, &options);
//! let pending = compiler.compile()?;
//! ```

use dlang_ast::FunctionDecl;
use dlang_core::{CompilationError, Span, ValType};

use crate::context::FunctionContext;
use crate::emit::InstructionBuilder;
use crate::ir::{FuncType, Function, Instruction, TypeTable};
use crate::options::CodegenOptions;
use crate::stmt::StmtCompiler;
use crate::type_resolver::SignatureResolver;

type Result<T> = std::result::Result<T, CompilationError>;

/// A fully generated function waiting to be committed to a module.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFunction {
    pub name: String,
    pub signature: FuncType,
    pub param_count: u32,
    /// Every slot's value type, parameters first.
    pub locals: Vec<ValType>,
    /// Body, terminated by `End`.
    pub body: Vec<Instruction>,
    pub span: Span,
}

impl PendingFunction {
    /// Intern the signature and produce the module-level function.
    pub fn commit(self, types: &mut TypeTable) -> Function {
        let type_index = types.intern(self.signature);
        Function {
            name: self.name,
            type_index,
            param_count: self.param_count,
            locals: self.locals,
            body: self.body,
            span: self.span,
        }
    }
}

/// Lowers a single function declaration.
pub struct FunctionCompiler<'a, 'ast> {
    /// Declaration being compiled
    decl: &'a FunctionDecl<'ast>,
    /// Function context (bindings, resolver, limits)
    ctx: FunctionContext<'a>,
    /// Body instruction builder
    emitter: InstructionBuilder,
}

impl<'a, 'ast> FunctionCompiler<'a, 'ast> {
    pub fn new(
        decl: &'a FunctionDecl<'ast>,
        resolver: &'a dyn SignatureResolver,
        options: &CodegenOptions,
    ) -> Self {
        Self {
            decl,
            ctx: FunctionContext::new(decl.name.name, resolver, options.max_locals),
            emitter: InstructionBuilder::new(),
        }
    }

    /// Compile the declaration.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile(mut self) -> Result<PendingFunction> {
        let param_types = self.setup_parameters()?;
        let body_result = self.compile_body()?;

        let signature = self
            .ctx
            .resolver()
            .resolve_signature(&self.decl.signature, body_result)?;
        if signature.params != param_types {
            return Err(CompilationError::internal(format!(
                "resolver produced params {:?} for '{}' but slots were declared as {:?}",
                signature.params, self.decl.name.name, param_types
            )));
        }

        let param_count = param_types.len() as u32;
        let locals = self.ctx.into_locals();
        let body = self.emitter.finish();

        tracing::debug!(
            function = self.decl.name.name,
            signature = %signature,
            locals = locals.len(),
            instructions = body.len(),
            "generated function"
        );

        Ok(PendingFunction {
            name: self.decl.name.name.to_string(),
            signature,
            param_count,
            locals,
            body,
            span: self.decl.span,
        })
    }

    /// Declare every parameter, in order, as slots `0..n`.
    fn setup_parameters(&mut self) -> Result<Vec<ValType>> {
        let resolver = self.ctx.resolver();
        let mut types = Vec::with_capacity(self.decl.signature.params.len());

        for param in self.decl.signature.params {
            let ty = resolver.resolve_param(param)?;
            self.ctx.declare_param(param.name.name, ty, param.name.span)?;
            types.push(ty);
        }

        Ok(types)
    }

    /// Lower the body at function scope.
    fn compile_body(&mut self) -> Result<Option<ValType>> {
        StmtCompiler::new(&mut self.ctx, &mut self.emitter).compile_block_body(&self.decl.body)
    }
}
