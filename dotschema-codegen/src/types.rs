//! Target type references.
//!
//! A [`TypeReference`] is what a schema node maps to once references have
//! been followed. It is language-neutral; the emitter decides how each
//! variant is spelled.

use dotschema_schema::{PrimitiveKind, StringFormat};

/// Built-in scalar types that need no import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Text.
    String,
    /// Floating point number.
    Number,
    /// Integral number.
    Integer,
    /// Boolean.
    Boolean,
    /// Any value (an object without declared structure).
    AnyObject,
}

impl From<PrimitiveKind> for ScalarKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::String => Self::String,
            PrimitiveKind::Number => Self::Number,
            PrimitiveKind::Integer => Self::Integer,
            PrimitiveKind::Boolean => Self::Boolean,
        }
    }
}

/// Scalar types that require an import in the emitting file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImportedKind {
    /// Point in time.
    DateTime,
    /// URI.
    Uri,
}

impl From<StringFormat> for ImportedKind {
    fn from(format: StringFormat) -> Self {
        match format {
            StringFormat::DateTime => Self::DateTime,
            StringFormat::Uri => Self::Uri,
        }
    }
}

/// A resolved target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeReference {
    /// Built-in scalar.
    Scalar(ScalarKind),
    /// Scalar that needs an import.
    ImportedScalar(ImportedKind),
    /// Array of the inner type; nests without limit.
    ArrayOf(Box<TypeReference>),
    /// Generated class.
    ClassRef(String),
    /// Generated enum (hint-driven).
    EnumRef(String),
    /// Dictionary (hint-driven).
    DictionaryRef {
        /// Key type.
        key: Box<TypeReference>,
        /// Value type.
        value: Box<TypeReference>,
    },
}

impl TypeReference {
    /// Wraps a type in an array.
    #[must_use]
    pub fn array_of(inner: TypeReference) -> Self {
        Self::ArrayOf(Box::new(inner))
    }

    /// Creates a dictionary type.
    #[must_use]
    pub fn dictionary(key: TypeReference, value: TypeReference) -> Self {
        Self::DictionaryRef {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Number of array layers around the innermost element type.
    #[must_use]
    pub fn array_depth(&self) -> usize {
        match self {
            Self::ArrayOf(inner) => 1 + inner.array_depth(),
            _ => 0,
        }
    }

    /// Innermost element type, after peeling all array layers.
    #[must_use]
    pub fn element_type(&self) -> &TypeReference {
        match self {
            Self::ArrayOf(inner) => inner.element_type(),
            other => other,
        }
    }

    /// Calls `f` on this type and every type nested inside it.
    pub fn visit(&self, f: &mut impl FnMut(&TypeReference)) {
        f(self);
        match self {
            Self::ArrayOf(inner) => inner.visit(f),
            Self::DictionaryRef { key, value } => {
                key.visit(f);
                value.visit(f);
            }
            Self::Scalar(_) | Self::ImportedScalar(_) | Self::ClassRef(_) | Self::EnumRef(_) => {}
        }
    }
}
