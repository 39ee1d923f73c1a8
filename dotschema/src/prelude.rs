//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```
//! use dotschema::prelude::*;
//! ```

// Schema types
pub use dotschema_schema::{
    ParseError, SchemaDocument, SchemaError, SchemaNode, SchemaPointer, parse_schema,
};

// Hints
pub use dotschema_codegen::hints::{
    ClassNameHint, DictionaryHint, EnumHint, Hint, HintDictionary, InterfaceHint,
    PropertyNameHint,
};

// Generation
pub use dotschema_codegen::{
    Artifact, CodegenError, FileSystem, Generator, GeneratorSettings, HintError,
    MemoryFileSystem, OsFileSystem, generate,
};
