//! Value types of the target stack machine.

use std::fmt;

/// A value type that can live on the evaluation stack or in a local slot.
///
/// The code generator only synthesizes [`ValType::I32`] today. The other
/// numeric types exist so a richer type resolver can be plugged in without
/// touching the IR, validator or encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValType {
    /// 32-bit integer.
    I32,
    /// 64-bit integer.
    I64,
    /// 32-bit IEEE float.
    F32,
    /// 64-bit IEEE float.
    F64,
}

impl ValType {
    /// The numeric type every literal and variable currently has.
    pub const NUMERIC: ValType = ValType::I32;

    /// Source-level spelling of this type.
    pub fn name(&self) -> &'static str {
        match self {
            ValType::I32 => "i32",
            ValType::I64 => "i64",
            ValType::F32 => "f32",
            ValType::F64 => "f64",
        }
    }

    /// Parse a source-level type name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "i32" => Some(ValType::I32),
            "i64" => Some(ValType::I64),
            "f32" => Some(ValType::F32),
            "f64" => Some(ValType::F64),
            _ => None,
        }
    }
}

impl fmt::Display for ValType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
