//! Schema type definitions.
//!
//! This module contains the in-memory representation of a parsed JSON Schema
//! document: a tree of [`SchemaNode`]s plus the document's [`DefinitionsTable`].
//! The shape of every node is decided once, at parse time; later stages match
//! on [`NodeKind`] and never re-inspect raw JSON.

use indexmap::IndexMap;
use serde_json::Value;

/// A parsed JSON Schema document.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Root schema node.
    pub root: SchemaNode,
    /// Definitions declared at the document root.
    pub definitions: DefinitionsTable,
}

impl SchemaDocument {
    /// Creates a document from a root node and its definitions.
    #[must_use]
    pub fn new(root: SchemaNode, definitions: DefinitionsTable) -> Self {
        Self { root, definitions }
    }
}

/// Named, reusable sub-schemas of one document.
///
/// Iteration follows declaration order in the source document.
#[derive(Debug, Clone, Default)]
pub struct DefinitionsTable {
    entries: IndexMap<String, SchemaNode>,
}

impl DefinitionsTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.entries.get(name)
    }

    /// Looks up a definition, returning the name as stored in the table.
    #[must_use]
    pub fn get_entry(&self, name: &str) -> Option<(&str, &SchemaNode)> {
        self.entries
            .get_key_value(name)
            .map(|(name, node)| (name.as_str(), node))
    }

    /// Returns true if a definition with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> + '_ {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, SchemaNode)> for DefinitionsTable {
    fn from_iter<I: IntoIterator<Item = (String, SchemaNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// Human-readable description, if any.
    pub description: Option<String>,
    /// Resolved shape of the node.
    pub kind: NodeKind,
}

impl SchemaNode {
    /// Creates a node without a description.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            description: None,
            kind,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the JSON Schema type name describing this node.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Returns true if this node is an object schema.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self.kind, NodeKind::Object(_))
    }
}

/// Shape of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// `type: "object"`, or untyped with `properties`.
    Object(ObjectSchema),
    /// `type: "array"`, or untyped with `items`.
    Array(ArraySchema),
    /// String, number, integer or boolean.
    Primitive(PrimitiveSchema),
    /// `enum` without a contradicting `type`.
    Enum(EnumSchema),
    /// `$ref`, which takes precedence over every other keyword.
    Reference(ReferenceSchema),
    /// No recognizable shape at all (`{}`).
    Any,
}

impl NodeKind {
    /// Returns the JSON Schema type name describing this kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Primitive(p) => p.kind.as_str(),
            Self::Enum(_) => "enum",
            Self::Reference(_) => "$ref",
            Self::Any => "any",
        }
    }
}

/// Object schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    /// Properties in declaration order.
    pub properties: IndexMap<String, SchemaNode>,
    /// Schema of `additionalProperties`, when it is a schema rather than a boolean.
    pub additional_properties: Option<Box<SchemaNode>>,
}

impl ObjectSchema {
    /// Creates an object schema from its properties.
    #[must_use]
    pub fn with_properties(properties: IndexMap<String, SchemaNode>) -> Self {
        Self {
            properties,
            additional_properties: None,
        }
    }
}

/// Array schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArraySchema {
    /// Item schema; absent means items of any shape.
    pub items: Option<Box<SchemaNode>>,
}

/// Primitive schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveSchema {
    /// Primitive kind.
    pub kind: PrimitiveKind,
    /// Recognized string format.
    pub format: Option<StringFormat>,
}

impl PrimitiveSchema {
    /// Creates a primitive schema without a format.
    #[must_use]
    pub const fn new(kind: PrimitiveKind) -> Self {
        Self { kind, format: None }
    }
}

/// Enum schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumSchema {
    /// Literal values in declaration order.
    pub values: Vec<Value>,
}

impl EnumSchema {
    /// Returns the values as strings if every literal is a string.
    #[must_use]
    pub fn string_values(&self) -> Option<Vec<&str>> {
        self.values.iter().map(Value::as_str).collect()
    }
}

/// Reference schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSchema {
    /// Raw `$ref` value, e.g. `#/definitions/color`.
    pub pointer: String,
}

/// Primitive JSON Schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `string`.
    String,
    /// `number`.
    Number,
    /// `integer`.
    Integer,
    /// `boolean`.
    Boolean,
}

impl PrimitiveKind {
    /// Returns the JSON Schema name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    /// Returns true if the literal is a value of this type.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// String formats with a dedicated target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StringFormat {
    /// `date-time`.
    DateTime,
    /// `uri`.
    Uri,
}

impl StringFormat {
    /// Parses a format name; unrecognized formats yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "date-time" => Some(Self::DateTime),
            "uri" => Some(Self::Uri),
            _ => None,
        }
    }

    /// Returns the JSON Schema name of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DateTime => "date-time",
            Self::Uri => "uri",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_name() {
        let node = SchemaNode::new(NodeKind::Primitive(PrimitiveSchema::new(
            PrimitiveKind::Number,
        )));
        assert_eq!(node.type_name(), "number");
        assert!(!node.is_object());

        let node = SchemaNode::new(NodeKind::Object(ObjectSchema::default()));
        assert_eq!(node.type_name(), "object");
        assert!(node.is_object());
    }

    #[test]
    fn test_primitive_kind_accepts() {
        assert!(PrimitiveKind::String.accepts(&json!("a")));
        assert!(!PrimitiveKind::String.accepts(&json!(1)));
        assert!(PrimitiveKind::Integer.accepts(&json!(3)));
        assert!(!PrimitiveKind::Integer.accepts(&json!(3.5)));
        assert!(PrimitiveKind::Number.accepts(&json!(3.5)));
        assert!(PrimitiveKind::Boolean.accepts(&json!(false)));
    }

    #[test]
    fn test_string_format_parse() {
        assert_eq!(StringFormat::parse("date-time"), Some(StringFormat::DateTime));
        assert_eq!(StringFormat::parse("uri"), Some(StringFormat::Uri));
        assert_eq!(StringFormat::parse("email"), None);
    }

    #[test]
    fn test_enum_string_values() {
        let e = EnumSchema {
            values: vec![json!("v1.0"), json!("v2.0")],
        };
        assert_eq!(e.string_values(), Some(vec!["v1.0", "v2.0"]));

        let e = EnumSchema {
            values: vec![json!("a"), json!(1)],
        };
        assert_eq!(e.string_values(), None);
    }

    #[test]
    fn test_definitions_table_order() {
        let table: DefinitionsTable = [
            ("b".to_string(), SchemaNode::new(NodeKind::Any)),
            ("a".to_string(), SchemaNode::new(NodeKind::Any)),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(table.contains("a"));
        assert_eq!(table.len(), 2);
    }
}
