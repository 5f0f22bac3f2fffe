//! Binding table for function compilation.
//!
//! `BindingTable` maps variable names to local slots while a single function
//! body is lowered. It handles:
//! - Slot allocation in declaration order, parameters first
//! - Nested block scopes
//! - Shadowing with restoration of the outer binding on scope exit
//!
//! Slots are never reused. A variable declared in a block keeps its slot after
//! the block ends, so the slot list doubles as the function's local list.

use dlang_core::{CompilationError, Span, ValType};
use rustc_hash::FxHashMap;

type Result<T> = std::result::Result<T, CompilationError>;

/// A resolved variable binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Variable name
    pub name: String,
    /// Value type of the slot
    pub ty: ValType,
    /// Local slot index
    pub slot: u32,
    /// Scope depth where declared (0 = function scope)
    pub depth: u32,
    /// Source location of the declaration
    pub span: Span,
}

/// Name-to-slot table for one function activation.
#[derive(Debug, Default)]
pub struct BindingTable {
    /// Visible bindings by name
    bindings: FxHashMap<String, Binding>,

    /// Current scope depth (0 = function scope)
    depth: u32,

    /// Bindings hidden by an inner declaration, tagged with the depth at
    /// which the shadowing happened.
    shadowed: Vec<(u32, Binding)>,

    /// Value type of every allocated slot, indexed by slot.
    slots: Vec<ValType>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Scope Management
    // ==========================================================================

    /// Enter a nested block scope.
    pub fn push_scope(&mut self) {
        self.depth += 1;
    }

    /// Leave the current block scope, hiding its bindings and restoring the
    /// ones they shadowed.
    pub fn pop_scope(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(CompilationError::internal(
                "pop_scope called at function scope",
            ));
        }

        let depth = self.depth;
        self.bindings.retain(|_, binding| binding.depth < depth);

        while let Some((shadowing_depth, _)) = self.shadowed.last() {
            if *shadowing_depth != depth {
                break;
            }
            if let Some((_, binding)) = self.shadowed.pop() {
                self.bindings.insert(binding.name.clone(), binding);
            }
        }

        self.depth -= 1;
        Ok(())
    }

    // ==========================================================================
    // Declaration
    // ==========================================================================

    /// Declare a variable in the current scope and allocate its slot.
    ///
    /// Fails with `DuplicateBinding` if the name is already declared at this
    /// depth. A binding from an outer depth is shadowed until the scope ends.
    pub fn declare(&mut self, name: &str, ty: ValType, span: Span) -> Result<u32> {
        if let Some(existing) = self.bindings.get(name) {
            if existing.depth == self.depth {
                return Err(CompilationError::DuplicateBinding {
                    name: name.to_string(),
                    original_span: existing.span,
                    new_span: span,
                });
            }
            self.shadowed.push((self.depth, existing.clone()));
        }

        let slot = self.allocate_slot(ty);
        self.bindings.insert(
            name.to_string(),
            Binding {
                name: name.to_string(),
                ty,
                slot,
                depth: self.depth,
                span,
            },
        );
        Ok(slot)
    }

    /// Declare a function parameter.
    ///
    /// Parameters live at function scope, so a body-level `let` with the same
    /// name is a redeclaration.
    pub fn declare_param(&mut self, name: &str, ty: ValType, span: Span) -> Result<u32> {
        if self.depth != 0 || self.slots.len() != self.bindings.len() {
            return Err(CompilationError::internal(
                "parameters must be declared before any local",
            ));
        }
        self.declare(name, ty, span)
    }

    fn allocate_slot(&mut self, ty: ValType) -> u32 {
        let slot = self.slots.len() as u32;
        self.slots.push(ty);
        slot
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Look up the innermost visible binding for `name`.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    // ==========================================================================
    // Accessors
    // ==========================================================================

    /// Number of slots allocated so far.
    pub fn slot_count(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Consume the table, returning the value type of every slot in order.
    pub fn into_locals(self) -> Vec<ValType> {
        self.slots
    }
}

// ============================================================================
// Tests
// ============================================================================
