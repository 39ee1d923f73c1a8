//! # dotschema Schema
//!
//! JSON Schema document model and reference resolution.
//!
//! This crate provides:
//! - Parsing of JSON Schema text into a closed, typed node model
//! - Local schema pointers for addressing nodes
//! - Memoized `$ref` resolution against the document's `definitions`
//! - Document-level validation for code generation

pub mod error;
pub mod parser;
pub mod pointer;
pub mod resolver;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use parser::{parse_schema, parse_value};
pub use pointer::SchemaPointer;
pub use resolver::{ReferenceResolver, ResolvedReference};
pub use types::{
    ArraySchema, DefinitionsTable, EnumSchema, NodeKind, ObjectSchema, PrimitiveKind,
    PrimitiveSchema, ReferenceSchema, SchemaDocument, SchemaNode, StringFormat,
};
pub use validation::{resolve_root, validate_document};
