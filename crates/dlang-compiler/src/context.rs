//! Per-function generation context.
//!
//! [`FunctionContext`] is the state shared by the statement and expression
//! compilers while one function is lowered: its binding table, the resolver
//! and the local limit. There is no module-wide "current function"; each
//! function gets its own context and drops it when generation ends.

use dlang_core::{CompilationError, Span, ValType};

use crate::scope::{Binding, BindingTable};
use crate::type_resolver::SignatureResolver;

type Result<T> = std::result::Result<T, CompilationError>;

pub struct FunctionContext<'a> {
    /// Name of the function being generated, for diagnostics.
    function: &'a str,
    /// Variable bindings
    bindings: BindingTable,
    /// Typing policy
    resolver: &'a dyn SignatureResolver,
    /// Maximum local slots
    max_locals: u32,
}

impl<'a> FunctionContext<'a> {
    pub fn new(function: &'a str, resolver: &'a dyn SignatureResolver, max_locals: u32) -> Self {
        Self {
            function,
            bindings: BindingTable::new(),
            resolver,
            max_locals,
        }
    }

    pub fn resolver(&self) -> &'a dyn SignatureResolver {
        self.resolver
    }

    // ==========================================================================
    // Locals
    // ==========================================================================

    /// Declare a parameter slot.
    pub fn declare_param(&mut self, name: &str, ty: ValType, span: Span) -> Result<u32> {
        self.check_local_limit(span)?;
        self.bindings.declare_param(name, ty, span)
    }

    /// Declare a local in the current scope.
    pub fn declare_local(&mut self, name: &str, ty: ValType, span: Span) -> Result<u32> {
        self.check_local_limit(span)?;
        self.bindings.declare(name, ty, span)
    }

    fn check_local_limit(&self, span: Span) -> Result<()> {
        if self.bindings.slot_count() >= self.max_locals {
            return Err(CompilationError::TooManyLocals {
                function: self.function.to_string(),
                limit: self.max_locals,
                span,
            });
        }
        Ok(())
    }

    /// Look up a visible binding.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.lookup(name)
    }

    pub fn push_scope(&mut self) {
        self.bindings.push_scope();
    }

    pub fn pop_scope(&mut self) -> Result<()> {
        self.bindings.pop_scope()
    }

    /// Finish the function, returning every slot's value type.
    pub fn into_locals(self) -> Vec<ValType> {
        self.bindings.into_locals()
    }
}
