//! Binary module encoder.
//!
//! Lowers a [`ModuleIr`] onto `wasm_encoder` sections:
//!
//! ```text
//! magic  00 61 73 6D
//! version 01 00 00 00
//! section*  id:u8 size:u32 payload
//! ```
//!
//! Sections are written in a fixed order: type, function, export, code and
//! finally the custom `name` section. A section with no entries is omitted,
//! so an empty module encodes to the header alone.
//!
//! `wasm_encoder` panics on counts that do not fit in a `u32`. Every count
//! is checked first and reported as [`EncodingError::EncodingOverflow`].
//!
//! Output depends only on the IR and the encoder settings.

use dlang_core::{EncodingError, ValType};
use wasm_encoder::{
    BlockType, CodeSection, ExportKind, ExportSection, FunctionSection, NameMap, NameSection,
    TypeSection,
};

use crate::ir::{FuncType, Function, Instruction, ModuleIr, NumericOp};
use crate::options::CodegenOptions;

type Result<T> = std::result::Result<T, EncodingError>;

/// Serializes module IR to bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    export_functions: bool,
    name_section: bool,
}

impl Encoder {
    /// Encoder with the default settings: exports on, names off.
    pub fn new() -> Self {
        Self::from_options(&CodegenOptions::default())
    }

    /// Encoder configured from code generation options.
    pub fn from_options(options: &CodegenOptions) -> Self {
        Self {
            export_functions: options.export_functions,
            name_section: options.name_section,
        }
    }

    pub fn with_export_functions(mut self, export_functions: bool) -> Self {
        self.export_functions = export_functions;
        self
    }

    pub fn with_name_section(mut self, name_section: bool) -> Self {
        self.name_section = name_section;
        self
    }

    /// Encode a module.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn encode(&self, module: &ModuleIr) -> Result<Vec<u8>> {
        let mut out = wasm_encoder::Module::new();

        if !module.types.is_empty() {
            out.section(&type_section(module.types.types())?);
        }

        if !module.functions.is_empty() {
            out.section(&function_section(&module.functions)?);

            if self.export_functions {
                out.section(&export_section(&module.functions)?);
            }

            out.section(&code_section(&module.functions)?);

            if self.name_section {
                out.section(&name_section(&module.functions)?);
            }
        }

        let bytes = out.finish();
        tracing::debug!(
            bytes = bytes.len(),
            types = module.types.len(),
            functions = module.functions.len(),
            "encoded module"
        );
        Ok(bytes)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Sections
// ============================================================================

fn type_section(types: &[FuncType]) -> Result<TypeSection> {
    to_u32("type count", types.len())?;

    let mut section = TypeSection::new();
    for ty in types {
        to_u32("parameter count", ty.params.len())?;
        to_u32("result count", ty.results.len())?;
        section.ty().function(
            ty.params.iter().map(|&ty| val_type(ty)),
            ty.results.iter().map(|&ty| val_type(ty)),
        );
    }

    tracing::debug!(section = "type", entries = types.len(), "writing section");
    Ok(section)
}

fn function_section(functions: &[Function]) -> Result<FunctionSection> {
    to_u32("function count", functions.len())?;

    let mut section = FunctionSection::new();
    for function in functions {
        section.function(function.type_index);
    }

    tracing::debug!(section = "function", entries = functions.len(), "writing section");
    Ok(section)
}

fn export_section(functions: &[Function]) -> Result<ExportSection> {
    let mut section = ExportSection::new();
    for (index, function) in functions.iter().enumerate() {
        check_name(&function.name)?;
        section.export(&function.name, ExportKind::Func, to_u32("function index", index)?);
    }

    tracing::debug!(section = "export", entries = functions.len(), "writing section");
    Ok(section)
}

fn code_section(functions: &[Function]) -> Result<CodeSection> {
    let mut section = CodeSection::new();
    for function in functions {
        section.function(&encode_body(function)?);
    }

    tracing::debug!(section = "code", entries = functions.len(), "writing section");
    Ok(section)
}

/// Custom `name` section with the function names subsection.
fn name_section(functions: &[Function]) -> Result<NameSection> {
    let mut names = NameMap::new();
    for (index, function) in functions.iter().enumerate() {
        check_name(&function.name)?;
        names.append(to_u32("function index", index)?, &function.name);
    }

    let mut section = NameSection::new();
    section.functions(&names);

    tracing::debug!(section = "name", entries = functions.len(), "writing section");
    Ok(section)
}

// ============================================================================
// Function bodies
// ============================================================================

/// Local declarations followed by the instruction sequence.
fn encode_body(function: &Function) -> Result<wasm_encoder::Function> {
    let groups = group_locals(function.declared_locals())
        .into_iter()
        .map(|(count, ty)| Ok((to_u32("local count", count)?, val_type(ty))))
        .collect::<Result<Vec<_>>>()?;
    to_u32("local group count", groups.len())?;

    let mut body = wasm_encoder::Function::new(groups);
    encode_instructions(&mut body, &function.body);
    Ok(body)
}

/// Run-length group consecutive locals of the same type.
fn group_locals(locals: &[ValType]) -> Vec<(usize, ValType)> {
    let mut groups: Vec<(usize, ValType)> = Vec::new();
    for &ty in locals {
        match groups.last_mut() {
            Some((count, last)) if *last == ty => *count += 1,
            _ => groups.push((1, ty)),
        }
    }
    groups
}

fn encode_instructions(body: &mut wasm_encoder::Function, code: &[Instruction]) {
    use wasm_encoder::Instruction as W;

    for instruction in code {
        let lowered = match instruction {
            Instruction::Const(value) => W::I32Const(*value),
            Instruction::LocalGet(slot) => W::LocalGet(*slot),
            Instruction::LocalSet(slot) => W::LocalSet(*slot),
            Instruction::Binary(op) => numeric_instruction(*op),
            Instruction::Drop => W::Drop,
            Instruction::Block { result, body: inner } => {
                body.instruction(&W::Block(block_type(*result)));
                encode_instructions(body, inner);
                continue;
            }
            Instruction::End => W::End,
        };
        body.instruction(&lowered);
    }
}

fn numeric_instruction(op: NumericOp) -> wasm_encoder::Instruction<'static> {
    use wasm_encoder::Instruction as W;

    match op {
        NumericOp::Add => W::I32Add,
        NumericOp::Sub => W::I32Sub,
        NumericOp::Mul => W::I32Mul,
        NumericOp::DivSigned => W::I32DivS,
    }
}

// ============================================================================
// Primitives
// ============================================================================

fn val_type(ty: ValType) -> wasm_encoder::ValType {
    match ty {
        ValType::I32 => wasm_encoder::ValType::I32,
        ValType::I64 => wasm_encoder::ValType::I64,
        ValType::F32 => wasm_encoder::ValType::F32,
        ValType::F64 => wasm_encoder::ValType::F64,
    }
}

fn block_type(result: Option<ValType>) -> BlockType {
    match result {
        Some(ty) => BlockType::Result(val_type(ty)),
        None => BlockType::Empty,
    }
}

fn to_u32(what: &'static str, count: usize) -> Result<u32> {
    u32::try_from(count).map_err(|_| EncodingError::EncodingOverflow { what, count })
}

fn check_name(name: &str) -> Result<()> {
    to_u32("name length", name.len()).map(|_| ())
}
