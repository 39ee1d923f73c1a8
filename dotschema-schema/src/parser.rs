//! JSON Schema document parser.
//!
//! This module turns the generic JSON tree produced by `serde_json` into the
//! closed [`SchemaNode`] model. The shape of a node is decided here, once,
//! using a fixed precedence: `$ref` wins over everything, then `enum` unless a
//! declared `type` contradicts its literals, then `type`. Untyped nodes are
//! objects when they declare `properties`, arrays when they declare `items`,
//! and [`NodeKind::Any`] otherwise.

use crate::error::ParseError;
use crate::pointer::SchemaPointer;
use crate::types::{
    ArraySchema, DefinitionsTable, EnumSchema, NodeKind, ObjectSchema, PrimitiveKind,
    PrimitiveSchema, ReferenceSchema, SchemaDocument, SchemaNode, StringFormat,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Declared value of the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclaredType {
    Object,
    Array,
    Primitive(PrimitiveKind),
}

impl DeclaredType {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "string" => Some(Self::Primitive(PrimitiveKind::String)),
            "number" => Some(Self::Primitive(PrimitiveKind::Number)),
            "integer" => Some(Self::Primitive(PrimitiveKind::Integer)),
            "boolean" => Some(Self::Primitive(PrimitiveKind::Boolean)),
            _ => None,
        }
    }
}

/// Parses a JSON Schema document from a string.
///
/// # Arguments
/// * `text` - JSON Schema document content
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `ParseError` if the text is not valid JSON or a node is structurally invalid.
pub fn parse_schema(text: &str) -> Result<SchemaDocument, ParseError> {
    let value: Value = serde_json::from_str(text)?;
    parse_value(&value)
}

/// Parses a JSON Schema document from an already-parsed JSON tree.
///
/// # Errors
/// Returns `ParseError` if a node is structurally invalid.
pub fn parse_value(value: &Value) -> Result<SchemaDocument, ParseError> {
    let root_pointer = SchemaPointer::root();
    let root = parse_node(value, &root_pointer)?;

    let definitions = match as_schema_object(value, &root_pointer)?.get("definitions") {
        None => DefinitionsTable::new(),
        Some(Value::Object(defs)) => defs
            .iter()
            .map(|(name, def)| {
                parse_node(def, &SchemaPointer::definition(name)).map(|node| (name.clone(), node))
            })
            .collect::<Result<DefinitionsTable, _>>()?,
        Some(other) => {
            return Err(ParseError::invalid_structure(
                root_pointer.child("definitions").to_string(),
                other,
                "'definitions' must be an object",
            ));
        }
    };

    tracing::trace!(definitions = definitions.len(), "parsed schema document");
    Ok(SchemaDocument::new(root, definitions))
}

/// Parses one schema node.
fn parse_node(value: &Value, pointer: &SchemaPointer) -> Result<SchemaNode, ParseError> {
    let obj = as_schema_object(value, pointer)?;

    let description = match obj.get("description") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(ParseError::invalid_structure(
                pointer.child("description").to_string(),
                other,
                "'description' must be a string",
            ));
        }
    };

    Ok(SchemaNode {
        description,
        kind: parse_kind(obj, pointer)?,
    })
}

/// Decides the shape of a node.
fn parse_kind(obj: &Map<String, Value>, pointer: &SchemaPointer) -> Result<NodeKind, ParseError> {
    if let Some(reference) = obj.get("$ref") {
        let reference = reference.as_str().ok_or_else(|| {
            ParseError::invalid_structure(
                pointer.child("$ref").to_string(),
                reference,
                "'$ref' must be a string",
            )
        })?;
        return Ok(NodeKind::Reference(ReferenceSchema {
            pointer: reference.to_string(),
        }));
    }

    let declared = match obj.get("type") {
        None => None,
        Some(Value::String(s)) => Some(DeclaredType::parse(s).ok_or_else(|| {
            ParseError::UnknownType {
                pointer: pointer.to_string(),
                value: s.clone(),
            }
        })?),
        Some(other) => {
            return Err(ParseError::invalid_structure(
                pointer.child("type").to_string(),
                other,
                "'type' must be a string",
            ));
        }
    };

    if let Some(values) = obj.get("enum") {
        let values = values.as_array().ok_or_else(|| {
            ParseError::invalid_structure(
                pointer.child("enum").to_string(),
                values,
                "'enum' must be an array",
            )
        })?;
        let contradicts = match declared {
            None => false,
            Some(DeclaredType::Primitive(kind)) => !values.iter().all(|v| kind.accepts(v)),
            Some(_) => true,
        };
        if !contradicts {
            return Ok(NodeKind::Enum(EnumSchema {
                values: values.clone(),
            }));
        }
    }

    if obj.contains_key("format")
        && declared != Some(DeclaredType::Primitive(PrimitiveKind::String))
    {
        return Err(ParseError::misplaced(pointer.to_string(), "format", "string"));
    }
    if obj.contains_key("items") && declared.is_some_and(|d| d != DeclaredType::Array) {
        return Err(ParseError::misplaced(pointer.to_string(), "items", "array"));
    }
    if obj.contains_key("properties") && declared.is_some_and(|d| d != DeclaredType::Object) {
        return Err(ParseError::misplaced(pointer.to_string(), "properties", "object"));
    }

    match declared {
        Some(DeclaredType::Object) => parse_object(obj, pointer).map(NodeKind::Object),
        Some(DeclaredType::Array) => parse_array(obj, pointer).map(NodeKind::Array),
        Some(DeclaredType::Primitive(kind)) => {
            let format = if kind == PrimitiveKind::String {
                parse_format(obj, pointer)?
            } else {
                None
            };
            Ok(NodeKind::Primitive(PrimitiveSchema { kind, format }))
        }
        None if obj.contains_key("properties") => parse_object(obj, pointer).map(NodeKind::Object),
        None if obj.contains_key("items") => parse_array(obj, pointer).map(NodeKind::Array),
        None => Ok(NodeKind::Any),
    }
}

/// Parses the object-specific keywords.
fn parse_object(
    obj: &Map<String, Value>,
    pointer: &SchemaPointer,
) -> Result<ObjectSchema, ParseError> {
    let properties = match obj.get("properties") {
        None => IndexMap::new(),
        Some(Value::Object(props)) => props
            .iter()
            .map(|(name, prop)| {
                parse_node(prop, &pointer.property(name)).map(|node| (name.clone(), node))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?,
        Some(other) => {
            return Err(ParseError::invalid_structure(
                pointer.child("properties").to_string(),
                other,
                "'properties' must be an object",
            ));
        }
    };

    let additional_properties = match obj.get("additionalProperties") {
        None | Some(Value::Bool(_)) => None,
        Some(value @ Value::Object(_)) => Some(Box::new(parse_node(
            value,
            &pointer.child("additionalProperties"),
        )?)),
        Some(other) => {
            return Err(ParseError::invalid_structure(
                pointer.child("additionalProperties").to_string(),
                other,
                "'additionalProperties' must be a boolean or a schema",
            ));
        }
    };

    Ok(ObjectSchema {
        properties,
        additional_properties,
    })
}

/// Parses the array-specific keywords.
fn parse_array(
    obj: &Map<String, Value>,
    pointer: &SchemaPointer,
) -> Result<ArraySchema, ParseError> {
    let items = match obj.get("items") {
        None => None,
        Some(value @ Value::Object(_)) => Some(Box::new(parse_node(value, &pointer.items())?)),
        Some(other) => {
            return Err(ParseError::invalid_structure(
                pointer.items().to_string(),
                other,
                "'items' must be a single schema",
            ));
        }
    };
    Ok(ArraySchema { items })
}

/// Parses the `format` keyword of a string schema.
fn parse_format(
    obj: &Map<String, Value>,
    pointer: &SchemaPointer,
) -> Result<Option<StringFormat>, ParseError> {
    match obj.get("format") {
        None => Ok(None),
        Some(Value::String(s)) => {
            let format = StringFormat::parse(s);
            if format.is_none() {
                tracing::debug!(%pointer, format = %s, "ignoring unrecognized string format");
            }
            Ok(format)
        }
        Some(other) => Err(ParseError::invalid_structure(
            pointer.child("format").to_string(),
            other,
            "'format' must be a string",
        )),
    }
}

fn as_schema_object<'v>(
    value: &'v Value,
    pointer: &SchemaPointer,
) -> Result<&'v Map<String, Value>, ParseError> {
    value.as_object().ok_or_else(|| {
        ParseError::invalid_structure(pointer.to_string(), value, "schema must be a JSON object")
    })
}
