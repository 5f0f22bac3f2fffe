//! Stack-machine instructions.

use std::fmt;

use dlang_core::ValType;

/// Arithmetic on two `i32` operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericOp {
    Add,
    Sub,
    Mul,
    /// Signed division, truncating toward zero.
    DivSigned,
}

impl NumericOp {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            NumericOp::Add => "i32.add",
            NumericOp::Sub => "i32.sub",
            NumericOp::Mul => "i32.mul",
            NumericOp::DivSigned => "i32.div_s",
        }
    }
}

/// A single IR instruction.
///
/// Every instruction sequence, a function body or a block body, ends with
/// exactly one [`Instruction::End`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Push an `i32` constant.
    Const(i32),
    /// Push the value of a local slot.
    LocalGet(u32),
    /// Pop into a local slot.
    LocalSet(u32),
    /// Pop two operands, push the result.
    Binary(NumericOp),
    /// Discard the top of the stack.
    Drop,
    /// Structured block with its own instruction sequence.
    Block {
        /// Value left by the block, if any.
        result: Option<ValType>,
        /// Nested sequence, terminated by `End`.
        body: Vec<Instruction>,
    },
    /// Terminates a sequence.
    End,
}

impl Instruction {
    /// Number of instructions including those nested in blocks.
    pub fn deep_len(&self) -> usize {
        match self {
            Instruction::Block { body, .. } => 1 + body.iter().map(Self::deep_len).sum::<usize>(),
            _ => 1,
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = indent * 2;
        match self {
            Instruction::Const(v) => writeln!(f, "{:pad$}i32.const {v}", ""),
            Instruction::LocalGet(slot) => writeln!(f, "{:pad$}local.get {slot}", ""),
            Instruction::LocalSet(slot) => writeln!(f, "{:pad$}local.set {slot}", ""),
            Instruction::Binary(op) => writeln!(f, "{:pad$}{}", "", op.mnemonic()),
            Instruction::Drop => writeln!(f, "{:pad$}drop", ""),
            Instruction::End => writeln!(f, "{:pad$}end", ""),
            Instruction::Block { result, body } => {
                match result {
                    Some(ty) => writeln!(f, "{:pad$}block (result {ty})", "")?,
                    None => writeln!(f, "{:pad$}block", "")?,
                }
                for inst in body {
                    inst.write_indented(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }

    /// Render a sequence as indented text, one instruction per line.
    pub fn listing(seq: &[Instruction]) -> String {
        struct Listing<'a>(&'a [Instruction]);

        impl fmt::Display for Listing<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for inst in self.0 {
                    inst.write_indented(f, 0)?;
                }
                Ok(())
            }
        }

        Listing(seq).to_string()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
