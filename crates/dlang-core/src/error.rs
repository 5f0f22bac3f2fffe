//! Error types for the dlang backend.
//!
//! Each pipeline phase has its own error enum. All of them convert into
//! [`DlangError`], and a failed module run reports a [`Diagnostics`] list.
//!
//! ## Error Hierarchy
//!
//! ```text
//! DlangError (top-level wrapper)
//! ├── CompilationError - AST lowering errors (carry a source span)
//! ├── ValidationError  - structural/type errors in the module IR
//! └── EncodingError    - binary serialization errors
//! ```

use thiserror::Error;

use crate::Span;

// ============================================================================
// Compilation Errors
// ============================================================================

/// Errors raised while lowering the AST into the module IR.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompilationError {
    /// The AST node is representable but has no lowering.
    #[error("at {span}: unsupported {construct}")]
    UnsupportedConstruct {
        /// Human-readable description of the construct.
        construct: String,
        /// Where the construct appears.
        span: Span,
    },

    /// A name was declared twice in the same scope.
    #[error("at {new_span}: variable '{name}' is already declared in this scope (first declared at {original_span})")]
    DuplicateBinding {
        /// The redeclared name.
        name: String,
        /// Where the name was first declared.
        original_span: Span,
        /// Where the redeclaration happened.
        new_span: Span,
    },

    /// A path expression names no visible binding.
    #[error("at {span}: unbound identifier '{name}'")]
    UnboundIdentifier {
        /// The name that wasn't found.
        name: String,
        /// Where the name was referenced.
        span: Span,
    },

    /// A binary operator with no instruction mapping.
    #[error("at {span}: unsupported operator '{op}'")]
    UnsupportedOperator {
        /// Source spelling of the operator.
        op: String,
        /// Where the operator appears.
        span: Span,
    },

    /// An operand or initializer has the wrong type (or no value at all).
    #[error("at {span}: {message}")]
    TypeMismatch {
        /// Description of the mismatch.
        message: String,
        /// Where the mismatch occurred.
        span: Span,
    },

    /// An integer literal does not fit the numeric type.
    #[error("at {span}: integer literal {value} is out of range for i32")]
    LiteralOutOfRange {
        /// The literal value as written.
        value: i64,
        /// Where the literal appears.
        span: Span,
    },

    /// Two functions in one module share a name.
    #[error("at {new_span}: function '{name}' is already defined (first defined at {original_span})")]
    DuplicateFunction {
        /// The duplicated function name.
        name: String,
        /// The first definition.
        original_span: Span,
        /// The second definition.
        new_span: Span,
    },

    /// A function declares more locals than the configured limit.
    #[error("at {span}: function '{function}' exceeds the limit of {limit} locals")]
    TooManyLocals {
        /// The offending function.
        function: String,
        /// The configured limit.
        limit: u32,
        /// Where the limit was crossed.
        span: Span,
    },

    /// Generator invariant violated. Always a bug.
    #[error("internal compiler error: {message}")]
    Internal {
        /// Description of the broken invariant.
        message: String,
    },
}

impl CompilationError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            CompilationError::UnsupportedConstruct { span, .. } => *span,
            CompilationError::DuplicateBinding { new_span, .. } => *new_span,
            CompilationError::UnboundIdentifier { span, .. } => *span,
            CompilationError::UnsupportedOperator { span, .. } => *span,
            CompilationError::TypeMismatch { span, .. } => *span,
            CompilationError::LiteralOutOfRange { span, .. } => *span,
            CompilationError::DuplicateFunction { new_span, .. } => *new_span,
            CompilationError::TooManyLocals { span, .. } => *span,
            CompilationError::Internal { .. } => Span::default(),
        }
    }

    /// Shorthand for [`CompilationError::UnsupportedConstruct`].
    pub fn unsupported(construct: impl Into<String>, span: Span) -> Self {
        CompilationError::UnsupportedConstruct {
            construct: construct.into(),
            span,
        }
    }

    /// Shorthand for [`CompilationError::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        CompilationError::Internal {
            message: message.into(),
        }
    }
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Structural or type errors found by the module validator.
///
/// These never originate from user code when the generator is correct; they
/// report IR that would be rejected by the target machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An instruction popped from an empty operand stack.
    #[error("in function '{function}': stack underflow at instruction {position}")]
    StackUnderflow {
        /// The function being validated.
        function: String,
        /// Index of the instruction within its sequence.
        position: usize,
    },

    /// The stack at `End` does not match the declared result.
    #[error("in function '{function}': expected {expected} result value(s) at end, found {found}")]
    UnbalancedResult {
        /// The function being validated.
        function: String,
        /// Declared result arity.
        expected: usize,
        /// Actual stack depth.
        found: usize,
    },

    /// A local instruction references a slot past the local count.
    #[error("in function '{function}': local index {index} out of range ({count} locals)")]
    InvalidLocalIndex {
        /// The function being validated.
        function: String,
        /// The referenced slot.
        index: u32,
        /// Number of locals in the function.
        count: u32,
    },

    /// A function references a type past the type table.
    #[error("in function '{function}': type index {index} out of range ({count} types)")]
    InvalidTypeIndex {
        /// The function being validated.
        function: String,
        /// The referenced type index.
        index: u32,
        /// Number of types in the module.
        count: u32,
    },

    /// An operand, local, or parameter has the wrong value type.
    #[error("in function '{function}': {message}")]
    TypeMismatch {
        /// The function being validated.
        function: String,
        /// Description of the mismatch.
        message: String,
    },

    /// `End` is missing, duplicated, or not the last instruction.
    #[error("in function '{function}': misplaced end at instruction {position}")]
    MisplacedEnd {
        /// The function being validated.
        function: String,
        /// Index of the offending instruction, or the sequence length when missing.
        position: usize,
    },
}

impl ValidationError {
    /// Name of the function that failed validation.
    pub fn function(&self) -> &str {
        match self {
            ValidationError::StackUnderflow { function, .. }
            | ValidationError::UnbalancedResult { function, .. }
            | ValidationError::InvalidLocalIndex { function, .. }
            | ValidationError::InvalidTypeIndex { function, .. }
            | ValidationError::TypeMismatch { function, .. }
            | ValidationError::MisplacedEnd { function, .. } => function,
        }
    }
}

// ============================================================================
// Encoding Errors
// ============================================================================

/// Errors raised while serializing a module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// A count or byte size does not fit the format's 32-bit fields.
    #[error("{what} overflows u32 ({count})")]
    EncodingOverflow {
        /// What was being counted.
        what: &'static str,
        /// The value that overflowed.
        count: usize,
    },
}

// ============================================================================
// Unified Error
// ============================================================================

/// The unified error type for the dlang backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DlangError {
    /// A code generation error.
    #[error(transparent)]
    Compilation(#[from] CompilationError),

    /// A module validation error.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A binary encoding error.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl DlangError {
    /// Check if this is a code generation error.
    pub fn is_compilation(&self) -> bool {
        matches!(self, DlangError::Compilation(_))
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, DlangError::Validation(_))
    }

    /// Check if this is an encoding error.
    pub fn is_encoding(&self) -> bool {
        matches!(self, DlangError::Encoding(_))
    }

    /// The source span, for errors that have one.
    pub fn span(&self) -> Option<Span> {
        match self {
            DlangError::Compilation(e) => Some(e.span()),
            _ => None,
        }
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Every error collected from a failed pipeline run.
///
/// A `Diagnostics` returned as `Err` is never empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagnostics {
    errors: Vec<DlangError>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error.
    pub fn push(&mut self, error: impl Into<DlangError>) {
        self.errors.push(error.into());
    }

    /// Number of collected errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first collected error.
    pub fn first(&self) -> Option<&DlangError> {
        self.errors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DlangError> {
        self.errors.iter()
    }

    /// Convert to a Vec of errors.
    pub fn into_vec(self) -> Vec<DlangError> {
        self.errors
    }
}

impl IntoIterator for Diagnostics {
    type Item = DlangError;
    type IntoIter = std::vec::IntoIter<DlangError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DlangError;
    type IntoIter = std::slice::Iter<'a, DlangError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl From<DlangError> for Diagnostics {
    fn from(error: DlangError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<CompilationError> for Diagnostics {
    fn from(error: CompilationError) -> Self {
        DlangError::from(error).into()
    }
}

impl From<ValidationError> for Diagnostics {
    fn from(error: ValidationError) -> Self {
        DlangError::from(error).into()
    }
}

impl From<EncodingError> for Diagnostics {
    fn from(error: EncodingError) -> Self {
        DlangError::from(error).into()
    }
}

impl FromIterator<DlangError> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = DlangError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

// ============================================================================
// Tests
// ============================================================================
