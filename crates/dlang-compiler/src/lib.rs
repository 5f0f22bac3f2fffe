//! dlang Compiler
//!
//! Lowers a dlang AST into a typed module IR, checks it, and serializes it
//! into a binary module for the stack machine.
//!
//! ## Pipeline
//!
//! - **Generation**: [`ModuleGenerator`] compiles every function declaration
//!   with its own [`FunctionCompiler`] and commits the results in
//!   declaration order
//! - **Validation**: [`Validator`] simulates the operand stack of every body
//! - **Encoding**: [`Encoder`] writes the binary sections
//!
//! ## Modules
//!
//! - [`context`]: Per-function compilation context
//! - [`emit`]: Instruction builder
//! - [`encode`]: Binary encoder on top of `wasm_encoder`
//! - [`expr`]: Expression compiler
//! - [`ir`]: Module IR (types, functions, instructions)
//! - [`passes`]: Module generation pass
//! - [`scope`]: Binding table with nested block scopes
//! - [`stmt`]: Statement compiler
//! - [`type_resolver`]: Signature resolution extension point
//! - [`validate`]: Stack and type validation

pub mod context;
pub mod emit;
pub mod encode;
pub mod expr;
pub mod function_compiler;
pub mod ir;
mod options;
pub mod passes;
pub mod scope;
pub mod stmt;
pub mod type_resolver;
pub mod validate;

pub use context::FunctionContext;
pub use emit::InstructionBuilder;
pub use encode::Encoder;
pub use expr::ExprCompiler;
pub use function_compiler::{FunctionCompiler, PendingFunction};
pub use ir::{FuncType, Function, Instruction, ModuleIr, NumericOp, TypeTable};
pub use options::CodegenOptions;
pub use passes::ModuleGenerator;
pub use scope::{Binding, BindingTable};
pub use stmt::StmtCompiler;
pub use type_resolver::{NumericResolver, SignatureResolver};
pub use validate::{FunctionStats, ValidationReport, Validator};

// Re-export the error types from core for convenience
pub use dlang_core::{CompilationError, Diagnostics, EncodingError, ValidationError};

use dlang_ast::Module;

/// Generate the IR for a module.
///
/// Convenience wrapper around [`ModuleGenerator`].
pub fn generate_module(
    module: &Module<'_>,
    resolver: &dyn SignatureResolver,
    options: &CodegenOptions,
) -> Result<ModuleIr, Diagnostics> {
    ModuleGenerator::new(resolver, options).run(module)
}
