//! Function types and the module type table.

use std::fmt;

use dlang_core::ValType;
use rustc_hash::FxHashMap;

/// A function signature: parameter and result value types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FuncType {
    pub params: Vec<ValType>,
    pub results: Vec<ValType>,
}

impl FuncType {
    pub fn new(params: Vec<ValType>, results: Vec<ValType>) -> Self {
        Self { params, results }
    }
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |tys: &[ValType]| {
            tys.iter()
                .map(ValType::name)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "({}) -> ({})", join(&self.params), join(&self.results))
    }
}

/// Module-level function type table with structural deduplication.
///
/// Interning the same signature twice returns the same index.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    /// Types in index order.
    types: Vec<FuncType>,
    /// Deduplication index: maps type to its position.
    index: FxHashMap<FuncType, u32>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or get an existing type, returning its index.
    pub fn intern(&mut self, ty: FuncType) -> u32 {
        if let Some(&idx) = self.index.get(&ty) {
            return idx;
        }

        let idx = self.types.len() as u32;
        self.types.push(ty.clone());
        self.index.insert(ty, idx);
        idx
    }

    /// Get a type by index.
    pub fn get(&self, index: u32) -> Option<&FuncType> {
        self.types.get(index as usize)
    }

    /// All types in index order.
    pub fn types(&self) -> &[FuncType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl PartialEq for TypeTable {
    fn eq(&self, other: &Self) -> bool {
        self.types == other.types
    }
}

impl Eq for TypeTable {}
