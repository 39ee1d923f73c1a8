//! # dotschema
//!
//! Generate C# data model classes from JSON Schema documents.
//!
//! ## Features
//!
//! - **Typed schema model** - JSON Schema is parsed once into a closed node model
//! - **Reference follow-through** - `$ref` to a primitive yields the primitive, not a class
//! - **Recursive schemas** - self-referential and mutually recursive definitions terminate
//! - **Generation hints** - interfaces, renames, dictionaries and enums, keyed by schema pointer
//! - **All-or-nothing output** - nothing is written unless the whole run succeeds
//!
//! ## Quick Start
//!
//! ```no_run
//! use dotschema::prelude::*;
//!
//! # fn main() -> Result<(), CodegenError> {
//! let settings = GeneratorSettings::new("generated", "Contoso.Model", "Window")
//!     .force_overwrite(true);
//! let artifacts = generate(
//!     r#"{ "type": "object", "properties": { "title": { "type": "string" } } }"#,
//!     &settings,
//!     &OsFileSystem,
//! )?;
//! assert_eq!(artifacts[0].type_name, "Window");
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema parsing, pointers, reference resolution
//! - [`codegen`] - Type mapping, hints, model building, C# emission

pub mod prelude;

/// Schema parsing and reference resolution.
pub mod schema {
    pub use dotschema_schema::*;
}

/// Data model generation.
pub mod codegen {
    pub use dotschema_codegen::*;
}

// Re-export commonly used items at the crate root
pub use dotschema_codegen::{
    Artifact, CodegenError, FileSystem, Generator, GeneratorSettings, HintDictionary,
    MemoryFileSystem, OsFileSystem, generate,
};
pub use dotschema_schema::{SchemaDocument, parse_schema};
