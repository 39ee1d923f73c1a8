//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for hint document parsing and application.
#[derive(Debug, Error)]
pub enum HintError {
    /// Hints document is not valid JSON or not shaped as pointer → hint list.
    #[error("hints parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Hint kind outside the supported set.
    #[error("unknown hint kind '{kind}' at '{pointer}'")]
    UnknownKind {
        /// Hint kind.
        kind: String,
        /// Pointer the hint is attached to.
        pointer: String,
    },

    /// Hint arguments do not fit the hint kind or the node.
    #[error("invalid arguments for {kind} at '{pointer}': {message}")]
    InvalidArguments {
        /// Hint kind.
        kind: String,
        /// Pointer the hint is attached to.
        pointer: String,
        /// Error message.
        message: String,
    },
}

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] dotschema_schema::ParseError),

    /// Schema error.
    #[error("schema error: {0}")]
    Schema(#[from] dotschema_schema::SchemaError),

    /// Hint error.
    #[error("hint error: {0}")]
    Hint(#[from] HintError),

    /// Output directory already holds generated output.
    #[error("output directory '{}' already exists; enable force_overwrite to replace it", .path.display())]
    OutputDirectoryExists {
        /// Output directory.
        path: PathBuf,
    },

    /// Configured copyright file does not exist.
    #[error("copyright file '{}' does not exist", .path.display())]
    CopyrightFileNotFound {
        /// Copyright file path.
        path: PathBuf,
    },

    /// Two distinct schema nodes produce the same type name.
    #[error("type name '{name}' is produced by both '{first}' and '{second}'")]
    DuplicateTypeName {
        /// Type name.
        name: String,
        /// Pointer of the node that claimed the name first.
        first: String,
        /// Pointer of the conflicting node.
        second: String,
    },

    /// A member identifier clashes with its class name or with another member.
    #[error("member '{identifier}' at '{pointer}' clashes with {clashes_with} in class '{class}'; rename it with a PropertyNameHint")]
    MemberNameCollision {
        /// Class declaring the member.
        class: String,
        /// Generated member identifier.
        identifier: String,
        /// Pointer of the property.
        pointer: String,
        /// What the identifier clashes with.
        clashes_with: String,
    },

    /// IO error.
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl CodegenError {
    /// Creates an IO error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for errors caused by the generation settings.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::OutputDirectoryExists { .. } | Self::CopyrightFileNotFound { .. }
        )
    }

    /// Returns true for errors caused by the schema document or its hints.
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_)
                | Self::Schema(_)
                | Self::Hint(_)
                | Self::DuplicateTypeName { .. }
                | Self::MemberNameCollision { .. }
        )
    }
}

impl HintError {
    /// Creates an invalid arguments error.
    pub fn invalid_arguments(
        kind: impl Into<String>,
        pointer: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArguments {
            kind: kind.into(),
            pointer: pointer.into(),
            message: message.into(),
        }
    }
}
