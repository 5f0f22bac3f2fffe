//! Shared helpers for the integration tests.
//!
//! Encoded modules are read back with `wasmparser`, so every helper also
//! checks that the bytes parse.

#![allow(dead_code)]

use dlang::ValType;
use wasmparser::{Parser, Payload};

/// Sections the encoder can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Custom,
    Type,
    Function,
    Export,
    Code,
}

/// A section of an encoded module.
///
/// `payload` is the section contents after the size. For a custom section it
/// is the data after the section name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub id: SectionId,
    pub name: Option<&'a str>,
    pub payload: &'a [u8],
}

fn payloads(bytes: &[u8]) -> Vec<Payload<'_>> {
    assert_eq!(&bytes[..8], b"\0asm\x01\0\0\0", "bad module header");
    Parser::new(0)
        .parse_all(bytes)
        .collect::<Result<Vec<_>, _>>()
        .expect("module parses")
}

/// Split an encoded module into its sections.
pub fn sections(bytes: &[u8]) -> Vec<Section<'_>> {
    let mut out = Vec::new();
    for payload in payloads(bytes) {
        let (id, name, payload) = match payload {
            Payload::TypeSection(reader) => (SectionId::Type, None, &bytes[reader.range()]),
            Payload::FunctionSection(reader) => {
                (SectionId::Function, None, &bytes[reader.range()])
            }
            Payload::ExportSection(reader) => (SectionId::Export, None, &bytes[reader.range()]),
            Payload::CodeSectionStart { range, .. } => (SectionId::Code, None, &bytes[range]),
            Payload::CustomSection(reader) => {
                (SectionId::Custom, Some(reader.name()), reader.data())
            }
            Payload::Version { .. } | Payload::CodeSectionEntry(_) | Payload::End(_) => continue,
            other => panic!("unexpected payload {other:?}"),
        };
        out.push(Section { id, name, payload });
    }
    out
}

/// Section ids in encoded order.
pub fn section_ids(bytes: &[u8]) -> Vec<SectionId> {
    sections(bytes).iter().map(|s| s.id).collect()
}

/// Payload of the first section with `id`.
pub fn section(bytes: &[u8], id: SectionId) -> Option<&[u8]> {
    sections(bytes)
        .into_iter()
        .find(|s| s.id == id)
        .map(|s| s.payload)
}

/// Function types of the type section, as `(params, results)`.
pub fn func_types(bytes: &[u8]) -> Vec<(Vec<ValType>, Vec<ValType>)> {
    let mut types = Vec::new();
    for payload in payloads(bytes) {
        let Payload::TypeSection(reader) = payload else {
            continue;
        };
        for ty in reader.into_iter_err_on_gc_types() {
            let ty = ty.expect("function type");
            types.push((val_types(ty.params()), val_types(ty.results())));
        }
    }
    types
}

fn val_types(types: &[wasmparser::ValType]) -> Vec<ValType> {
    types
        .iter()
        .map(|ty| match ty {
            wasmparser::ValType::I32 => ValType::I32,
            wasmparser::ValType::I64 => ValType::I64,
            wasmparser::ValType::F32 => ValType::F32,
            wasmparser::ValType::F64 => ValType::F64,
            other => panic!("unexpected value type {other:?}"),
        })
        .collect()
}

/// Function bodies (locals + code) without their size prefix.
pub fn code_bodies(bytes: &[u8]) -> Vec<&[u8]> {
    payloads(bytes)
        .into_iter()
        .filter_map(|payload| match payload {
            Payload::CodeSectionEntry(body) => Some(&bytes[body.range()]),
            _ => None,
        })
        .collect()
}

/// Run the `wasmparser` validator over an encoded module.
pub fn assert_valid(bytes: &[u8]) {
    if let Err(err) = wasmparser::validate(bytes) {
        panic!("module failed validation: {err}");
    }
}
