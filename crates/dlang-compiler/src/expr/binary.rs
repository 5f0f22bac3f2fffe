//! Binary expression compilation.
//!
//! Operands are lowered left then right, followed by the operator, so the
//! emitted sequence is the post-order walk of the expression tree.

use dlang_ast::{BinaryExpr, BinaryOp};
use dlang_core::{CompilationError, ValType};

use super::{ExprCompiler, Result};
use crate::ir::NumericOp;

/// Map a source operator to its `i32` instruction.
pub fn numeric_op(op: BinaryOp) -> Option<NumericOp> {
    match op {
        BinaryOp::Add => Some(NumericOp::Add),
        BinaryOp::Sub => Some(NumericOp::Sub),
        BinaryOp::Mul => Some(NumericOp::Mul),
        BinaryOp::Div => Some(NumericOp::DivSigned),
        BinaryOp::Mod
        | BinaryOp::Assign
        | BinaryOp::Equal
        | BinaryOp::LogicalAnd
        | BinaryOp::LogicalOr
        | BinaryOp::BitwiseAnd => None,
    }
}

/// Compile a binary expression.
pub fn compile_binary(
    compiler: &mut ExprCompiler<'_, '_>,
    bin: &BinaryExpr<'_>,
) -> Result<Option<ValType>> {
    // Reject before emitting anything so no operand code is left behind.
    let Some(op) = numeric_op(bin.op) else {
        return Err(CompilationError::UnsupportedOperator {
            op: bin.op.to_string(),
            span: bin.span,
        });
    };

    let left = compiler.compile_value(bin.left, "left operand")?;
    let right = compiler.compile_value(bin.right, "right operand")?;

    for (ty, operand) in [(left, bin.left), (right, bin.right)] {
        if ty != ValType::I32 {
            return Err(CompilationError::TypeMismatch {
                message: format!("operator '{}' expects i32 operands, found {ty}", bin.op),
                span: operand.span(),
            });
        }
    }

    compiler.emitter().emit_binary(op);
    Ok(Some(ValType::I32))
}
