//! Instruction builder for the code generator.
//!
//! An [`InstructionBuilder`] accumulates one instruction sequence: a function
//! body or the body of a nested block. [`InstructionBuilder::finish`] appends
//! the terminating `End`, so a finished sequence is always well-terminated.
//!
//! # Example
//!
//! ```
//! use dlang_compiler::emit::InstructionBuilder;
//! use dlang_compiler::ir::{Instruction, NumericOp};
//!
//! let mut builder = InstructionBuilder::new();
//! builder.emit_const(2);
//! builder.emit_const(3);
//! builder.emit_binary(NumericOp::Add);
//!
//! let body = builder.finish();
//! assert_eq!(body.last(), Some(&Instruction::End));
//! ```

use dlang_core::ValType;

use crate::ir::{Instruction, NumericOp};

/// Accumulates a linear instruction sequence.
#[derive(Debug, Default)]
pub struct InstructionBuilder {
    code: Vec<Instruction>,
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Basic Emission
    // ==========================================================================

    /// Emit a single instruction.
    ///
    /// `End` belongs to [`finish`](Self::finish). Emitting it here yields a
    /// sequence the validator rejects with `MisplacedEnd`.
    pub fn emit(&mut self, inst: Instruction) {
        self.code.push(inst);
    }

    pub fn emit_const(&mut self, value: i32) {
        self.emit(Instruction::Const(value));
    }

    pub fn emit_local_get(&mut self, slot: u32) {
        self.emit(Instruction::LocalGet(slot));
    }

    pub fn emit_local_set(&mut self, slot: u32) {
        self.emit(Instruction::LocalSet(slot));
    }

    pub fn emit_binary(&mut self, op: NumericOp) {
        self.emit(Instruction::Binary(op));
    }

    pub fn emit_drop(&mut self) {
        self.emit(Instruction::Drop);
    }

    /// Emit a structured block around an already finished sequence.
    pub fn emit_block(&mut self, result: Option<ValType>, body: Vec<Instruction>) {
        self.emit(Instruction::Block { result, body });
    }

    // ==========================================================================
    // Accessors
    // ==========================================================================

    /// Number of instructions emitted so far (excluding the final `End`).
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Instructions emitted so far.
    pub fn code(&self) -> &[Instruction] {
        &self.code
    }

    /// Terminate the sequence with `End` and return it.
    pub fn finish(mut self) -> Vec<Instruction> {
        self.code.push(Instruction::End);
        self.code
    }
}
