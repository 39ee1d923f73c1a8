//! Out-of-band generation hints.
//!
//! A hints document maps schema pointers to ordered lists of hints:
//!
//! ```json
//! {
//!   "": [
//!     { "kind": "InterfaceHint", "arguments": { "description": "My interface." } }
//!   ],
//!   "definitions/color/properties/channels": [
//!     { "kind": "DictionaryHint" }
//!   ]
//! }
//! ```
//!
//! The set of kinds is closed: an unknown `kind` fails when the document is
//! parsed, never later during generation.

use crate::error::HintError;
use dotschema_schema::SchemaPointer;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Spawns a companion interface for a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InterfaceHint {
    /// Description of the generated interface.
    #[serde(default)]
    pub description: String,
}

impl InterfaceHint {
    /// `kind` tag in the hints document.
    pub const KIND: &'static str = "InterfaceHint";
}

/// Overrides the name of the class generated for a node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassNameHint {
    /// Class name to use.
    pub class_name: String,
}

impl ClassNameHint {
    /// `kind` tag in the hints document.
    pub const KIND: &'static str = "ClassNameHint";
}

/// Overrides the identifier generated for a property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PropertyNameHint {
    /// Identifier to use.
    pub property_name: String,
}

impl PropertyNameHint {
    /// `kind` tag in the hints document.
    pub const KIND: &'static str = "PropertyNameHint";
}

/// Maps an object node to a dictionary keyed by string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DictionaryHint {}

impl DictionaryHint {
    /// `kind` tag in the hints document.
    pub const KIND: &'static str = "DictionaryHint";
}

/// Maps an enum node to a generated enum type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnumHint {
    /// Name of the generated enum.
    pub type_name: String,
    /// Description of the generated enum.
    #[serde(default)]
    pub description: Option<String>,
    /// Member names, one per enum literal; derived from the literals when absent.
    #[serde(default)]
    pub member_names: Option<Vec<String>>,
}

impl EnumHint {
    /// `kind` tag in the hints document.
    pub const KIND: &'static str = "EnumHint";
}

/// A generation hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    /// `InterfaceHint`.
    Interface(InterfaceHint),
    /// `ClassNameHint`.
    ClassName(ClassNameHint),
    /// `PropertyNameHint`.
    PropertyName(PropertyNameHint),
    /// `DictionaryHint`.
    Dictionary(DictionaryHint),
    /// `EnumHint`.
    Enum(EnumHint),
}

impl Hint {
    /// Returns the `kind` tag of this hint.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Interface(_) => InterfaceHint::KIND,
            Self::ClassName(_) => ClassNameHint::KIND,
            Self::PropertyName(_) => PropertyNameHint::KIND,
            Self::Dictionary(_) => DictionaryHint::KIND,
            Self::Enum(_) => EnumHint::KIND,
        }
    }

    fn from_raw(raw: RawHint, pointer: &str) -> Result<Self, HintError> {
        let RawHint { kind, arguments } = raw;
        let arguments = if arguments.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            arguments
        };

        match kind.as_str() {
            InterfaceHint::KIND => {
                parse_arguments(&kind, pointer, arguments).map(Self::Interface)
            }
            ClassNameHint::KIND => {
                parse_arguments(&kind, pointer, arguments).map(Self::ClassName)
            }
            PropertyNameHint::KIND => {
                parse_arguments(&kind, pointer, arguments).map(Self::PropertyName)
            }
            DictionaryHint::KIND => {
                parse_arguments(&kind, pointer, arguments).map(Self::Dictionary)
            }
            EnumHint::KIND => parse_arguments(&kind, pointer, arguments).map(Self::Enum),
            other => Err(HintError::UnknownKind {
                kind: other.to_string(),
                pointer: pointer.to_string(),
            }),
        }
    }
}

fn parse_arguments<T: DeserializeOwned>(
    kind: &str,
    pointer: &str,
    arguments: Value,
) -> Result<T, HintError> {
    serde_json::from_value(arguments)
        .map_err(|e| HintError::invalid_arguments(kind, pointer, e.to_string()))
}

/// Hint as it appears in the hints document, before kind dispatch.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawHint {
    kind: String,
    #[serde(default)]
    arguments: Value,
}

/// Hints indexed by the pointer of the node they apply to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndexMap<String, Vec<RawHint>>")]
pub struct HintDictionary {
    entries: IndexMap<SchemaPointer, Vec<Hint>>,
}

impl HintDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a hints document.
    ///
    /// # Errors
    /// Returns `HintError` if the text is not a pointer → hint list mapping,
    /// a hint has an unknown kind, or its arguments do not fit the kind.
    pub fn from_json(text: &str) -> Result<Self, HintError> {
        let raw: IndexMap<String, Vec<RawHint>> = serde_json::from_str(text)?;
        Self::try_from(raw)
    }

    /// Appends a hint for the node at `pointer`.
    pub fn insert(&mut self, pointer: SchemaPointer, hint: Hint) {
        self.entries.entry(pointer).or_default().push(hint);
    }

    /// Appends a hint, builder style.
    #[must_use]
    pub fn with_hint(mut self, pointer: &str, hint: Hint) -> Self {
        self.insert(SchemaPointer::parse(pointer), hint);
        self
    }

    /// Returns the hints for a node in declaration order; empty if none.
    #[must_use]
    pub fn lookup(&self, pointer: &SchemaPointer) -> &[Hint] {
        self.entries
            .get(pointer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Class name override for a node; the last `ClassNameHint` wins.
    #[must_use]
    pub fn class_name(&self, pointer: &SchemaPointer) -> Option<&str> {
        self.lookup(pointer).iter().rev().find_map(|hint| match hint {
            Hint::ClassName(h) => Some(h.class_name.as_str()),
            _ => None,
        })
    }

    /// Identifier override for a property; the last `PropertyNameHint` wins.
    #[must_use]
    pub fn property_name(&self, pointer: &SchemaPointer) -> Option<&str> {
        self.lookup(pointer).iter().rev().find_map(|hint| match hint {
            Hint::PropertyName(h) => Some(h.property_name.as_str()),
            _ => None,
        })
    }

    /// Returns true if the node carries a `DictionaryHint`.
    #[must_use]
    pub fn is_dictionary(&self, pointer: &SchemaPointer) -> bool {
        self.lookup(pointer)
            .iter()
            .any(|hint| matches!(hint, Hint::Dictionary(_)))
    }

    /// Enum hint for a node; the last `EnumHint` wins.
    #[must_use]
    pub fn enum_hint(&self, pointer: &SchemaPointer) -> Option<&EnumHint> {
        self.lookup(pointer).iter().rev().find_map(|hint| match hint {
            Hint::Enum(h) => Some(h),
            _ => None,
        })
    }

    /// Iterates all pointers with their hints.
    pub fn iter(&self) -> impl Iterator<Item = (&SchemaPointer, &[Hint])> + '_ {
        self.entries
            .iter()
            .map(|(pointer, hints)| (pointer, hints.as_slice()))
    }

    /// Returns true if there are no hints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<IndexMap<String, Vec<RawHint>>> for HintDictionary {
    type Error = HintError;

    fn try_from(raw: IndexMap<String, Vec<RawHint>>) -> Result<Self, Self::Error> {
        let mut dictionary = Self::new();
        for (key, hints) in raw {
            let pointer = SchemaPointer::parse(&key);
            for hint in hints {
                dictionary.insert(pointer.clone(), Hint::from_raw(hint, &key)?);
            }
        }
        Ok(dictionary)
    }
}
