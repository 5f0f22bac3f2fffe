//! Core types shared by every dlang backend crate.
//!
//! - [`Span`] - source locations attached to AST nodes and diagnostics
//! - [`ValType`] - the value types of the target stack machine
//! - [`error`] - the error hierarchy for generation, validation and encoding

pub mod error;
mod span;
mod value_type;

pub use error::{
    CompilationError, Diagnostics, DlangError, EncodingError, ValidationError,
};
pub use span::Span;
pub use value_type::ValType;
