//! Error types for schema parsing and reference resolution.

use thiserror::Error;

/// Error type for schema parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally invalid schema node.
    #[error("invalid schema at '{pointer}': {message} (fragment: {fragment})")]
    InvalidStructure {
        /// Location of the offending node.
        pointer: String,
        /// Offending JSON fragment, serialized.
        fragment: String,
        /// Error message.
        message: String,
    },

    /// Unknown `type` value.
    #[error("unknown schema type '{value}' at '{pointer}'")]
    UnknownType {
        /// Location of the offending node.
        pointer: String,
        /// Value of the `type` keyword.
        value: String,
    },

    /// Keyword that is only valid alongside another `type`.
    #[error("keyword '{keyword}' at '{pointer}' is only valid with type '{expected}'")]
    MisplacedKeyword {
        /// Location of the offending node.
        pointer: String,
        /// Keyword name.
        keyword: String,
        /// Type the keyword requires.
        expected: String,
    },
}

/// Error type for schema semantics: root shape and `$ref` resolution.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The root schema does not describe an object.
    #[error("root schema must be of type 'object', but found type '{actual}'")]
    RootNotObject {
        /// Type actually found at the root.
        actual: String,
    },

    /// Reference is not a local fragment.
    #[error("reference '{reference}' is not a local fragment; only '#/definitions/<name>' is supported")]
    NotLocalFragment {
        /// The `$ref` value.
        reference: String,
    },

    /// Reference does not point into `definitions`.
    #[error("reference '{reference}' does not point to a definition; expected '#/definitions/<name>'")]
    NotADefinition {
        /// The `$ref` value.
        reference: String,
    },

    /// Referenced definition does not exist.
    #[error("definition '{name}' referenced by '{reference}' does not exist")]
    DefinitionNotFound {
        /// Missing definition name.
        name: String,
        /// The `$ref` value.
        reference: String,
    },

    /// Circular reference that never passes through an object.
    #[error("circular reference detected at '{pointer}'")]
    CircularReference {
        /// Pointer of the node that loops back on itself.
        pointer: String,
    },
}

impl ParseError {
    /// Creates an invalid structure error citing the offending fragment.
    pub fn invalid_structure(
        pointer: impl Into<String>,
        fragment: &serde_json::Value,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidStructure {
            pointer: pointer.into(),
            fragment: fragment.to_string(),
            message: message.into(),
        }
    }

    /// Creates a misplaced keyword error.
    pub fn misplaced(
        pointer: impl Into<String>,
        keyword: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::MisplacedKeyword {
            pointer: pointer.into(),
            keyword: keyword.into(),
            expected: expected.into(),
        }
    }
}
