//! Code generation options.

/// Knobs for module generation and encoding.
///
/// ```
/// use dlang_compiler::CodegenOptions;
///
/// let options = CodegenOptions::default()
///     .with_name_section(true)
///     .with_max_locals(1024);
/// assert!(options.export_functions);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Emit an export entry for every function.
    pub export_functions: bool,
    /// Emit the custom `name` section with function names.
    pub name_section: bool,
    /// Generate functions on the rayon thread pool. Only honored when the
    /// crate is built with the `parallel` feature.
    pub parallel: bool,
    /// Upper bound on local slots per function, parameters included.
    pub max_locals: u32,
}

impl CodegenOptions {
    /// Default per-function local limit.
    pub const DEFAULT_MAX_LOCALS: u32 = 50_000;

    pub fn with_export_functions(mut self, export_functions: bool) -> Self {
        self.export_functions = export_functions;
        self
    }

    pub fn with_name_section(mut self, name_section: bool) -> Self {
        self.name_section = name_section;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_locals(mut self, max_locals: u32) -> Self {
        self.max_locals = max_locals;
        self
    }

    /// Whether parallel generation will actually run.
    pub fn parallel_enabled(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            export_functions: true,
            name_section: false,
            parallel: false,
            max_locals: Self::DEFAULT_MAX_LOCALS,
        }
    }
}
