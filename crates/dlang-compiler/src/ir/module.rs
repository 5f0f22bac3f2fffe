use std::fmt;

use super::{Function, Instruction, TypeTable};

/// A complete module: deduplicated types and functions in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleIr {
    pub types: TypeTable,
    pub functions: Vec<Function>,
}

impl ModuleIr {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Text listing of the module, for debugging and snapshot-style tests.
impl fmt::Display for ModuleIr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.types.types().iter().enumerate() {
            writeln!(f, "type {i}: {ty}")?;
        }
        for (i, func) in self.functions.iter().enumerate() {
            writeln!(
                f,
                "func {i} \"{}\" type {} locals {:?}",
                func.name, func.type_index, func.locals
            )?;
            for line in Instruction::listing(&func.body).lines() {
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}
