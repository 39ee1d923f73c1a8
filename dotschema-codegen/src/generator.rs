//! Generation orchestrator.
//!
//! A run goes through validate, build, emit and write, in that order. Nothing
//! is written until every artifact has been rendered, so a failed run leaves
//! the output directory untouched.

use crate::builder::ClassModelBuilder;
use crate::csharp::CSharpEmitter;
use crate::error::CodegenError;
use crate::fs::FileSystem;
use crate::model::{Artifact, ModelGraph};
use crate::settings::GeneratorSettings;
use dotschema_schema::{SchemaDocument, parse_schema, validate_document};

/// Generates C# data model files from a schema document.
pub struct Generator<'a, F: FileSystem + ?Sized> {
    settings: &'a GeneratorSettings,
    fs: &'a F,
}

impl<'a, F: FileSystem + ?Sized> Generator<'a, F> {
    /// Creates a generator writing through `fs`.
    #[must_use]
    pub fn new(settings: &'a GeneratorSettings, fs: &'a F) -> Self {
        Self { settings, fs }
    }

    /// Generates and writes one file per class, interface and enum.
    ///
    /// # Returns
    /// The artifacts written, root class first.
    ///
    /// # Errors
    /// Returns `CodegenError` if the settings are unusable, the document
    /// cannot produce a model, or a file cannot be written.
    pub fn generate(&self, document: &SchemaDocument) -> Result<Vec<Artifact>, CodegenError> {
        let copyright = self.validate()?;

        validate_document(document)?;
        let graph = ClassModelBuilder::new(document, self.settings).build()?;
        let artifacts = self.emit(&graph, copyright.as_deref());

        self.write(&artifacts)?;
        tracing::info!(
            root = %self.settings.root_class_name,
            namespace = %self.settings.namespace_name,
            artifacts = artifacts.len(),
            ignored_hints = graph.ignored_hints().len(),
            "generated data model"
        );
        Ok(artifacts)
    }

    /// Parses schema text and generates from it.
    ///
    /// # Errors
    /// Returns `CodegenError` if the text is not a valid schema or generation fails.
    pub fn generate_from_str(&self, schema_text: &str) -> Result<Vec<Artifact>, CodegenError> {
        let document = parse_schema(schema_text)?;
        self.generate(&document)
    }

    /// Checks the settings against the file system and loads the copyright notice.
    fn validate(&self) -> Result<Option<String>, CodegenError> {
        let output = self.settings.output_directory();
        if self.fs.directory_exists(output) && !self.settings.force_overwrite {
            return Err(CodegenError::OutputDirectoryExists {
                path: output.to_path_buf(),
            });
        }

        let Some(path) = &self.settings.copyright_file_path else {
            return Ok(None);
        };
        if !self.fs.exists(path) {
            return Err(CodegenError::CopyrightFileNotFound { path: path.clone() });
        }
        self.fs
            .read_text(path)
            .map(Some)
            .map_err(|e| CodegenError::io(path, e))
    }

    fn emit(&self, graph: &ModelGraph, copyright: Option<&str>) -> Vec<Artifact> {
        let emitter = CSharpEmitter::new(copyright);
        graph
            .models()
            .map(|model| Artifact {
                type_name: model.name().to_string(),
                path: self
                    .settings
                    .output_path(model.name(), emitter.extension()),
                content: emitter.emit(model),
            })
            .collect()
    }

    fn write(&self, artifacts: &[Artifact]) -> Result<(), CodegenError> {
        for artifact in artifacts {
            self.fs
                .write_text(&artifact.path, &artifact.content)
                .map_err(|e| CodegenError::io(&artifact.path, e))?;
            tracing::debug!(path = %artifact.path.display(), "wrote artifact");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use std::path::{Path, PathBuf};

    const BASIC: &str =
        r#"{ "type": "object", "description": "The description", "properties": {} }"#;

    fn settings() -> GeneratorSettings {
        GeneratorSettings::new("out", "N", "C").force_overwrite(true)
    }

    #[test]
    fn test_output_directory_exists() {
        let fs = MemoryFileSystem::new().with_directory("out");
        let settings = settings().force_overwrite(false);

        let err = Generator::new(&settings, &fs)
            .generate_from_str(BASIC)
            .unwrap_err();
        assert!(matches!(err, CodegenError::OutputDirectoryExists { .. }));
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("out"));
        assert!(fs.is_empty());
    }

    #[test]
    fn test_output_directory_absent() {
        let fs = MemoryFileSystem::new().with_directory("out");
        let settings = GeneratorSettings::new("outx", "N", "C");

        let artifacts = Generator::new(&settings, &fs)
            .generate_from_str(BASIC)
            .expect("Failed to generate");
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].path, Path::new("outx").join("C.cs"));
    }

    #[test]
    fn test_force_overwrite() {
        let fs = MemoryFileSystem::new().with_directory("out");
        let settings = settings();

        let artifacts = Generator::new(&settings, &fs)
            .generate_from_str(BASIC)
            .expect("Failed to generate");
        assert_eq!(fs.files(), vec![PathBuf::from("out").join("C.cs")]);
        assert_eq!(fs.get(&artifacts[0].path), Some(artifacts[0].content.clone()));
    }

    #[test]
    fn test_copyright_file_missing() {
        let fs = MemoryFileSystem::new();
        let settings = settings().copyright_file_path("copyright.txt");

        let err = Generator::new(&settings, &fs)
            .generate_from_str(BASIC)
            .unwrap_err();
        assert!(matches!(err, CodegenError::CopyrightFileNotFound { .. }));
        assert!(err.to_string().contains("copyright.txt"));
        assert!(fs.is_empty());
    }

    #[test]
    fn test_copyright_header() {
        let fs = MemoryFileSystem::new().with_file("copyright.txt", "// Copyright.\n");
        let settings = settings().copyright_file_path("copyright.txt");

        let artifacts = Generator::new(&settings, &fs)
            .generate_from_str(BASIC)
            .expect("Failed to generate");
        assert!(artifacts[0].content.starts_with("// Copyright.\n\nnamespace N\n"));
    }

    #[test]
    fn test_schema_error_writes_nothing() {
        let fs = MemoryFileSystem::new();
        let settings = settings();

        let err = Generator::new(&settings, &fs)
            .generate_from_str(
                r##"{
  "type": "object",
  "properties": {
    "a": { "type": "object", "properties": { "x": { "type": "integer" } } },
    "b": { "$ref": "#/definitions/missing" }
  }
}"##,
            )
            .unwrap_err();
        assert!(err.is_schema_error());
        assert!(err.to_string().contains("missing"));
        assert!(fs.is_empty());
    }

    #[test]
    fn test_root_not_object() {
        let fs = MemoryFileSystem::new();
        let settings = settings();

        let err = Generator::new(&settings, &fs)
            .generate_from_str(r#"{ "type": "number" }"#)
            .unwrap_err();
        assert!(err.to_string().contains("number"));
        assert!(fs.is_empty());
    }

    #[test]
    fn test_repeated_runs_are_independent() {
        let settings = settings();
        let first = MemoryFileSystem::new();
        let second = MemoryFileSystem::new();

        let a = Generator::new(&settings, &first)
            .generate_from_str(BASIC)
            .expect("Failed to generate");
        let b = Generator::new(&settings, &second)
            .generate_from_str(BASIC)
            .expect("Failed to generate");
        assert_eq!(a, b);
    }

    #[test]
    fn test_dyn_file_system() {
        let fs = MemoryFileSystem::new();
        let dyn_fs: &dyn FileSystem = &fs;
        let settings = settings();

        Generator::new(&settings, dyn_fs)
            .generate_from_str(BASIC)
            .expect("Failed to generate");
        assert_eq!(fs.len(), 1);
    }
}
