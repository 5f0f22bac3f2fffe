//! Typed module IR.
//!
//! The code generator populates a [`ModuleIr`] in one pass. The validator and
//! the encoder only ever see it by shared reference.

mod function;
mod instruction;
mod module;
mod types;

pub use function::Function;
pub use instruction::{Instruction, NumericOp};
pub use module::ModuleIr;
pub use types::{FuncType, TypeTable};

pub use dlang_core::ValType;
