//! Generator settings.

use crate::hints::HintDictionary;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings for one generation run.
///
/// Settings are built either in code with the `#[must_use]` setters or
/// deserialized from a camelCase JSON document:
///
/// ```json
/// {
///   "outputDirectory": "generated",
///   "namespaceName": "N",
///   "rootClassName": "C",
///   "forceOverwrite": true,
///   "hints": { "": [ { "kind": "InterfaceHint" } ] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorSettings {
    /// Directory that receives one file per generated type.
    pub output_directory: PathBuf,
    /// Replace output in an existing directory instead of failing.
    #[serde(default)]
    pub force_overwrite: bool,
    /// File whose text is emitted at the top of every generated file.
    #[serde(default)]
    pub copyright_file_path: Option<PathBuf>,
    /// Name of the class generated for the root schema.
    pub root_class_name: String,
    /// Namespace of every generated type.
    pub namespace_name: String,
    /// Generation hints keyed by schema pointer.
    #[serde(default)]
    pub hints: HintDictionary,
    /// Emit the `Equals` stub on classes without properties.
    #[serde(default)]
    pub generate_equality_for_empty_classes: bool,
}

impl GeneratorSettings {
    /// Creates settings with no copyright notice, no hints and overwrite disabled.
    #[must_use]
    pub fn new(
        output_directory: impl Into<PathBuf>,
        namespace_name: impl Into<String>,
        root_class_name: impl Into<String>,
    ) -> Self {
        Self {
            output_directory: output_directory.into(),
            force_overwrite: false,
            copyright_file_path: None,
            root_class_name: root_class_name.into(),
            namespace_name: namespace_name.into(),
            hints: HintDictionary::new(),
            generate_equality_for_empty_classes: false,
        }
    }

    /// Sets whether an existing output directory may be written into.
    #[must_use]
    pub fn force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    /// Sets the copyright notice file.
    #[must_use]
    pub fn copyright_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.copyright_file_path = Some(path.into());
        self
    }

    /// Sets the hint dictionary.
    #[must_use]
    pub fn hints(mut self, hints: HintDictionary) -> Self {
        self.hints = hints;
        self
    }

    /// Sets whether classes without properties get equality scaffolding.
    #[must_use]
    pub fn generate_equality_for_empty_classes(mut self, enabled: bool) -> Self {
        self.generate_equality_for_empty_classes = enabled;
        self
    }

    /// Path of the file generated for a type.
    #[must_use]
    pub fn output_path(&self, type_name: &str, extension: &str) -> PathBuf {
        self.output_directory
            .join(format!("{type_name}.{extension}"))
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }
}
