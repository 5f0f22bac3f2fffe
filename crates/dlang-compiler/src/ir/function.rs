use dlang_core::{Span, ValType};

use super::Instruction;

/// A generated function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Function name, used for exports and the name section.
    pub name: String,
    /// Index into the module type table.
    pub type_index: u32,
    /// How many leading entries of `locals` are parameters.
    pub param_count: u32,
    /// Value type of every local slot, parameters first.
    pub locals: Vec<ValType>,
    /// Instruction sequence, terminated by `End`.
    pub body: Vec<Instruction>,
    /// Source location of the declaration.
    pub span: Span,
}

impl Function {
    /// Locals declared in the body (excluding parameters).
    pub fn declared_locals(&self) -> &[ValType] {
        self.locals
            .get(self.param_count as usize..)
            .unwrap_or_default()
    }

    /// Total number of local slots, parameters included.
    pub fn local_count(&self) -> u32 {
        self.locals.len() as u32
    }
}
