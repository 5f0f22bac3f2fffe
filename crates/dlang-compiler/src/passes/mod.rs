//! Module generation pass.
//!
//! Walks the top-level items of a module and turns every function
//! declaration into IR.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ ModuleGenerator                                                 │
//! │   - Collects function declarations, rejects other items         │
//! │   - Detects duplicate function names                            │
//! │   - Dispatches to FunctionCompiler (sequentially or via rayon)  │
//! └─────────────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ FunctionCompiler                                                │
//! │   - Declares parameters                                         │
//! │   - Uses StmtCompiler for the body                              │
//! │   - Produces a PendingFunction                                  │
//! └─────────────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ Commit (sequential, declaration order)                          │
//! │   - Interns each signature in the TypeTable                     │
//! │   - Appends the Function to the ModuleIr                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failed function contributes one diagnostic. If any diagnostic was
//! recorded no IR is returned.

use dlang_ast::{FunctionDecl, Module, Stmt};
use dlang_core::{CompilationError, Diagnostics, Span};
use rustc_hash::FxHashMap;

use crate::function_compiler::{FunctionCompiler, PendingFunction};
use crate::ir::ModuleIr;
use crate::options::CodegenOptions;
use crate::type_resolver::SignatureResolver;

type Result<T> = std::result::Result<T, CompilationError>;

/// Generates a [`ModuleIr`] from a module AST.
pub struct ModuleGenerator<'a> {
    resolver: &'a dyn SignatureResolver,
    options: &'a CodegenOptions,
}

impl<'a> ModuleGenerator<'a> {
    pub fn new(resolver: &'a dyn SignatureResolver, options: &'a CodegenOptions) -> Self {
        Self { resolver, options }
    }

    /// Run the pass.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(&self, module: &Module<'_>) -> std::result::Result<ModuleIr, Diagnostics> {
        let mut diagnostics = Diagnostics::new();
        let functions = collect_functions(module, &mut diagnostics);

        let results = self.generate_all(&functions);

        let mut pending = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(function) => pending.push(function),
                Err(err) => diagnostics.push(err),
            }
        }

        if !diagnostics.is_empty() {
            tracing::debug!(errors = diagnostics.len(), "module generation failed");
            return Err(diagnostics);
        }

        Ok(commit(pending))
    }

    fn generate(&self, decl: &FunctionDecl<'_>) -> Result<PendingFunction> {
        FunctionCompiler::new(decl, self.resolver, self.options).compile()
    }

    /// Generate every function, preserving declaration order.
    fn generate_all(&self, functions: &[&FunctionDecl<'_>]) -> Vec<Result<PendingFunction>> {
        if self.options.parallel_enabled() && functions.len() > 1 {
            return self.generate_parallel(functions);
        }
        functions.iter().map(|decl| self.generate(decl)).collect()
    }

    #[cfg(feature = "parallel")]
    fn generate_parallel(&self, functions: &[&FunctionDecl<'_>]) -> Vec<Result<PendingFunction>> {
        use rayon::prelude::*;

        tracing::debug!(functions = functions.len(), "generating functions in parallel");
        // Indexed collect keeps declaration order.
        functions
            .par_iter()
            .map(|decl| self.generate(decl))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn generate_parallel(&self, functions: &[&FunctionDecl<'_>]) -> Vec<Result<PendingFunction>> {
        functions.iter().map(|decl| self.generate(decl)).collect()
    }
}

/// Pick out the function declarations, reporting everything else.
///
/// A function whose name repeats an earlier one is reported and skipped.
fn collect_functions<'m, 'ast>(
    module: &'m Module<'ast>,
    diagnostics: &mut Diagnostics,
) -> Vec<&'m FunctionDecl<'ast>> {
    let mut seen: FxHashMap<&str, Span> = FxHashMap::default();
    let mut functions = Vec::new();

    for item in module.items {
        let Stmt::Function(decl) = item else {
            diagnostics.push(CompilationError::unsupported(
                format!(
                    "{} at module scope (only function declarations are allowed at module scope)",
                    item.describe()
                ),
                item.span(),
            ));
            continue;
        };

        if let Some(&original_span) = seen.get(decl.name.name) {
            diagnostics.push(CompilationError::DuplicateFunction {
                name: decl.name.name.to_string(),
                original_span,
                new_span: decl.name.span,
            });
            continue;
        }

        seen.insert(decl.name.name, decl.name.span);
        functions.push(decl);
    }

    functions
}

/// Commit generated functions in declaration order.
fn commit(pending: Vec<PendingFunction>) -> ModuleIr {
    let mut module = ModuleIr::new();

    for function in pending {
        let known_types = module.types.len();
        let function = function.commit(&mut module.types);
        if module.types.len() > known_types
            && let Some(ty) = module.types.get(function.type_index)
        {
            tracing::trace!(index = function.type_index, signature = %ty, "interned function type");
        }
        module.functions.push(function);
    }

    module
}
