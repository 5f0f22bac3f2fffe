//! dlang backend
//!
//! Turns a parsed dlang [`Module`] into a binary module for the stack
//! machine:
//!
//! ```text
//! AST ─► ModuleGenerator ─► ModuleIr ─► Validator ─► Encoder ─► Vec<u8>
//! ```
//!
//! [`generate_module`] runs the whole pipeline with default settings.
//! [`Pipeline`] exposes the options and a custom [`SignatureResolver`].
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use dlang::ast::{AstBuilder, BinaryOp};
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let body = b.block(&[
//!     b.let_stmt("x", b.int(2)),
//!     b.let_stmt("y", b.int(3)),
//!     b.expr_stmt(b.binary(b.path("x"), BinaryOp::Add, b.path("y"))),
//! ]);
//! let module = b.module(&[b.function("main", &[], body)]);
//!
//! let bytes = dlang::generate_module(&module).unwrap();
//! assert_eq!(&bytes[..4], b"\0asm");
//! ```

use std::fmt;

pub use dlang_ast as ast;
pub use dlang_compiler as compiler;

pub use dlang_ast::Module;
pub use dlang_compiler::{
    CodegenOptions, Encoder, FuncType, Function, Instruction, ModuleGenerator, ModuleIr,
    NumericOp, NumericResolver, SignatureResolver, TypeTable, ValidationReport, Validator,
};
pub use dlang_core::{
    CompilationError, Diagnostics, DlangError, EncodingError, Span, ValType, ValidationError,
};

/// Generate, validate and encode a module with the default settings.
pub fn generate_module(module: &Module<'_>) -> Result<Vec<u8>, Diagnostics> {
    Pipeline::new().run(module)
}

/// Everything a successful pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    /// The validated module IR.
    pub ir: ModuleIr,
    /// Per-function validation statistics.
    pub report: ValidationReport,
    /// The encoded binary module.
    pub bytes: Vec<u8>,
}

/// Configurable code generation pipeline.
pub struct Pipeline {
    resolver: Box<dyn SignatureResolver>,
    options: CodegenOptions,
}

impl Pipeline {
    /// Pipeline with [`NumericResolver`] and default options.
    pub fn new() -> Self {
        Self {
            resolver: Box::new(NumericResolver),
            options: CodegenOptions::default(),
        }
    }

    /// Replace the signature resolver.
    pub fn with_resolver(mut self, resolver: Box<dyn SignatureResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_options(mut self, options: CodegenOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    /// Generate the module IR without validating or encoding it.
    pub fn generate_ir(&self, module: &Module<'_>) -> Result<ModuleIr, Diagnostics> {
        ModuleGenerator::new(self.resolver.as_ref(), &self.options).run(module)
    }

    /// Run every phase and keep the intermediate results.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn assemble(&self, module: &Module<'_>) -> Result<Assembled, Diagnostics> {
        let ir = self.generate_ir(module)?;
        let report = Validator::new().validate(&ir)?;
        let bytes = Encoder::from_options(&self.options).encode(&ir)?;

        tracing::debug!(
            functions = ir.functions.len(),
            max_stack_depth = report.max_stack_depth(),
            bytes = bytes.len(),
            "assembled module"
        );

        Ok(Assembled { ir, report, bytes })
    }

    /// Run every phase and return the encoded module.
    pub fn run(&self, module: &Module<'_>) -> Result<Vec<u8>, Diagnostics> {
        self.assemble(module).map(|assembled| assembled.bytes)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
