//! # dotschema Codegen
//!
//! C# data model generation from JSON Schema documents.
//!
//! This crate provides:
//! - Mapping of schema nodes to language-neutral type references
//! - Out-of-band generation hints keyed by schema pointer
//! - A worklist builder producing classes, interfaces and enums
//! - C# rendering of the built models
//! - An orchestrator that validates, builds, renders and writes

pub mod builder;
pub mod csharp;
pub mod error;
pub mod fs;
pub mod generator;
pub mod hints;
pub mod mapper;
pub mod model;
pub mod naming;
pub mod settings;
pub mod types;

pub use builder::ClassModelBuilder;
pub use csharp::CSharpEmitter;
pub use error::{CodegenError, HintError};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use generator::Generator;
pub use hints::{
    ClassNameHint, DictionaryHint, EnumHint, Hint, HintDictionary, InterfaceHint,
    PropertyNameHint,
};
pub use mapper::TypeMapper;
pub use model::{
    Artifact, ClassModel, EnumModel, IgnoredHint, ModelGraph, PropertyModel, TypeModel,
};
pub use naming::to_pascal_case;
pub use settings::GeneratorSettings;
pub use types::{ImportedKind, ScalarKind, TypeReference};

/// Generates C# files from JSON Schema text.
///
/// # Arguments
/// * `schema_text` - JSON Schema document
/// * `settings` - Output location, names and hints
/// * `fs` - File system the files are written through
///
/// # Returns
/// The artifacts written, root class first.
///
/// # Errors
/// Returns `CodegenError` if validation, parsing, building or writing fails.
pub fn generate<F: FileSystem + ?Sized>(
    schema_text: &str,
    settings: &GeneratorSettings,
    fs: &F,
) -> Result<Vec<Artifact>, CodegenError> {
    Generator::new(settings, fs).generate_from_str(schema_text)
}
