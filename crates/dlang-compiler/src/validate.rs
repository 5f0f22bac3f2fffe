//! # Module Validator
//!
//! Checks a [`ModuleIr`] for structural and type soundness before encoding:
//!
//! - every function references an existing type
//! - the leading locals match the type's parameters
//! - an abstract operand stack never underflows, ends each sequence at the
//!   declared arity, and only sees the value types each instruction expects
//! - every sequence ends with exactly one `End`
//! - every local index is in range
//!
//! The validator never mutates the IR and stops at the first error.

use dlang_core::{ValType, ValidationError};

use crate::ir::{Function, Instruction, ModuleIr};

type Result<T> = std::result::Result<T, ValidationError>;

/// Statistics for one validated function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionStats {
    /// Function name
    pub name: String,
    /// Total instruction count, nested blocks and `End`s included
    pub instruction_count: usize,
    /// Maximum operand stack depth across all nesting levels
    pub max_stack_depth: usize,
}

/// Result of a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Per-function statistics in module order
    pub functions: Vec<FunctionStats>,
}

impl ValidationReport {
    /// Largest stack depth of any function.
    pub fn max_stack_depth(&self) -> usize {
        self.functions
            .iter()
            .map(|f| f.max_stack_depth)
            .max()
            .unwrap_or(0)
    }

    /// Total instructions in the module.
    pub fn instruction_count(&self) -> usize {
        self.functions.iter().map(|f| f.instruction_count).sum()
    }
}

/// Module IR validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a module.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn validate(&self, module: &ModuleIr) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        for func in &module.functions {
            report.functions.push(validate_function(module, func)?);
        }

        tracing::debug!(
            functions = report.functions.len(),
            instructions = report.instruction_count(),
            max_stack_depth = report.max_stack_depth(),
            "module validated"
        );
        Ok(report)
    }
}

fn validate_function(module: &ModuleIr, func: &Function) -> Result<FunctionStats> {
    let count = module.types.len() as u32;
    let Some(ty) = module.types.get(func.type_index) else {
        return Err(ValidationError::InvalidTypeIndex {
            function: func.name.clone(),
            index: func.type_index,
            count,
        });
    };

    let params = func.locals.get(..func.param_count as usize);
    if params != Some(ty.params.as_slice()) {
        return Err(ValidationError::TypeMismatch {
            function: func.name.clone(),
            message: format!(
                "parameter locals {:?} do not match type {}",
                params.unwrap_or_default(),
                ty
            ),
        });
    }

    let expected = match ty.results.as_slice() {
        [] => None,
        [single] => Some(*single),
        _ => {
            return Err(ValidationError::TypeMismatch {
                function: func.name.clone(),
                message: format!("multiple results are not supported ({ty})"),
            });
        }
    };

    let mut checker = StackChecker {
        func,
        max_depth: 0,
    };
    checker.check_sequence(&func.body, expected, 0)?;

    Ok(FunctionStats {
        name: func.name.clone(),
        instruction_count: func.body.iter().map(Instruction::deep_len).sum(),
        max_stack_depth: checker.max_depth,
    })
}

/// Abstract interpretation of the operand stack for one function.
struct StackChecker<'f> {
    func: &'f Function,
    max_depth: usize,
}

impl StackChecker<'_> {
    /// Check one sequence against a fresh stack.
    ///
    /// `base` is the depth of the enclosing stacks, used for statistics only.
    fn check_sequence(
        &mut self,
        seq: &[Instruction],
        expected: Option<ValType>,
        base: usize,
    ) -> Result<()> {
        let mut stack: Vec<ValType> = Vec::new();

        for (pos, inst) in seq.iter().enumerate() {
            match inst {
                Instruction::End => {
                    if pos + 1 != seq.len() {
                        return Err(self.misplaced_end(pos));
                    }
                    return self.check_end(&stack, expected);
                }
                Instruction::Const(_) => stack.push(ValType::I32),
                Instruction::LocalGet(slot) => {
                    let ty = self.local(*slot)?;
                    stack.push(ty);
                }
                Instruction::LocalSet(slot) => {
                    let ty = self.local(*slot)?;
                    let found = self.pop(&mut stack, pos)?;
                    if found != ty {
                        return Err(self.mismatch(format!(
                            "local.set {slot} expects {ty}, found {found}"
                        )));
                    }
                }
                Instruction::Binary(op) => {
                    let right = self.pop(&mut stack, pos)?;
                    let left = self.pop(&mut stack, pos)?;
                    if left != ValType::I32 || right != ValType::I32 {
                        return Err(self.mismatch(format!(
                            "{} expects i32 operands, found {left} and {right}",
                            op.mnemonic()
                        )));
                    }
                    stack.push(ValType::I32);
                }
                Instruction::Drop => {
                    self.pop(&mut stack, pos)?;
                }
                Instruction::Block { result, body } => {
                    self.check_sequence(body, *result, base + stack.len())?;
                    if let Some(ty) = result {
                        stack.push(*ty);
                    }
                }
            }
            self.max_depth = self.max_depth.max(base + stack.len());
        }

        Err(self.misplaced_end(seq.len()))
    }

    fn check_end(&self, stack: &[ValType], expected: Option<ValType>) -> Result<()> {
        let arity = usize::from(expected.is_some());
        if stack.len() != arity {
            return Err(ValidationError::UnbalancedResult {
                function: self.func.name.clone(),
                expected: arity,
                found: stack.len(),
            });
        }
        if let (Some(want), Some(&found)) = (expected, stack.first())
            && want != found
        {
            return Err(self.mismatch(format!("result expects {want}, found {found}")));
        }
        Ok(())
    }

    fn local(&self, slot: u32) -> Result<ValType> {
        self.func
            .locals
            .get(slot as usize)
            .copied()
            .ok_or_else(|| ValidationError::InvalidLocalIndex {
                function: self.func.name.clone(),
                index: slot,
                count: self.func.local_count(),
            })
    }

    fn pop(&self, stack: &mut Vec<ValType>, position: usize) -> Result<ValType> {
        stack.pop().ok_or_else(|| ValidationError::StackUnderflow {
            function: self.func.name.clone(),
            position,
        })
    }

    fn mismatch(&self, message: String) -> ValidationError {
        ValidationError::TypeMismatch {
            function: self.func.name.clone(),
            message,
        }
    }

    fn misplaced_end(&self, position: usize) -> ValidationError {
        ValidationError::MisplacedEnd {
            function: self.func.name.clone(),
            position,
        }
    }
}
