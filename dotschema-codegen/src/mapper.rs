//! Schema node to target type mapping.
//!
//! [`TypeMapper`] turns a schema node into a [`TypeReference`], following
//! `$ref` through to the target definition. Object nodes are not expanded
//! here: the mapper declares a placeholder class in the [`ModelGraph`] and
//! queues it, and the builder fills it in later. That split is what lets
//! self-referential schemas terminate.

use crate::error::{CodegenError, HintError};
use crate::hints::{ClassNameHint, DictionaryHint, EnumHint, HintDictionary};
use crate::model::{ClassModel, EnumModel, ModelGraph, ModelKey, Registration, TypeModel};
use crate::naming::to_pascal_case;
use crate::types::{ScalarKind, TypeReference};
use dotschema_schema::{
    DefinitionsTable, EnumSchema, NodeKind, PrimitiveKind, ReferenceResolver, SchemaError,
    SchemaNode, SchemaPointer,
};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};

/// A declared class whose properties have not been mapped yet.
#[derive(Debug, Clone)]
pub struct PendingClass<'a> {
    /// Graph key of the placeholder.
    pub key: ModelKey,
    /// Pointer of the object node.
    pub pointer: SchemaPointer,
    /// The object node.
    pub node: &'a SchemaNode,
}

/// Maps schema nodes to type references for one document.
#[derive(Debug)]
pub struct TypeMapper<'a> {
    resolver: ReferenceResolver<'a>,
    hints: &'a HintDictionary,
    namespace: &'a str,
    graph: ModelGraph,
    pending: VecDeque<PendingClass<'a>>,
    expanding: Vec<SchemaPointer>,
    used_hints: HashSet<(SchemaPointer, &'static str)>,
}

impl<'a> TypeMapper<'a> {
    /// Creates a mapper over a document's definitions.
    #[must_use]
    pub fn new(
        definitions: &'a DefinitionsTable,
        hints: &'a HintDictionary,
        namespace: &'a str,
    ) -> Self {
        Self {
            resolver: ReferenceResolver::new(definitions),
            hints,
            namespace,
            graph: ModelGraph::new(),
            pending: VecDeque::new(),
            expanding: Vec::new(),
            used_hints: HashSet::new(),
        }
    }

    /// Maps a node found at `pointer`.
    ///
    /// `context` names an anonymous object class reached through this node;
    /// it is the identifier of the enclosing property.
    ///
    /// # Errors
    /// Returns `CodegenError` if a reference does not resolve, a chain of
    /// references and arrays loops without passing through a class, a hint
    /// does not fit the node, or a type name is claimed twice.
    pub fn map(
        &mut self,
        node: &'a SchemaNode,
        pointer: &SchemaPointer,
        context: &str,
    ) -> Result<TypeReference, CodegenError> {
        match &node.kind {
            NodeKind::Reference(reference) => {
                let resolved = self.resolver.resolve(&reference.pointer)?;
                let target = resolved.pointer();
                if self.expanding.contains(&target) {
                    return Err(SchemaError::CircularReference {
                        pointer: target.to_string(),
                    }
                    .into());
                }

                self.expanding.push(target.clone());
                let result = self.map(resolved.node, &target, &to_pascal_case(resolved.name));
                self.expanding.pop();
                result
            }
            NodeKind::Object(obj) => {
                if self.hints.is_dictionary(pointer) {
                    self.mark_hint_used(pointer, DictionaryHint::KIND);
                    let value = match &obj.additional_properties {
                        Some(schema) => {
                            self.map(schema, &pointer.child("additionalProperties"), context)?
                        }
                        None => TypeReference::Scalar(ScalarKind::AnyObject),
                    };
                    return Ok(TypeReference::dictionary(
                        TypeReference::Scalar(ScalarKind::String),
                        value,
                    ));
                }

                if obj.properties.is_empty()
                    && pointer.definition_name().is_none()
                    && !pointer.is_root()
                {
                    return Ok(TypeReference::Scalar(ScalarKind::AnyObject));
                }

                let name = self.declare_class(pointer, node, context)?;
                Ok(TypeReference::ClassRef(name))
            }
            NodeKind::Array(arr) => {
                let item = match &arr.items {
                    Some(items) => self.map(items, &pointer.items(), context)?,
                    None => TypeReference::Scalar(ScalarKind::AnyObject),
                };
                Ok(TypeReference::array_of(item))
            }
            NodeKind::Primitive(primitive) => Ok(match (primitive.kind, primitive.format) {
                (PrimitiveKind::String, Some(format)) => {
                    TypeReference::ImportedScalar(format.into())
                }
                (kind, _) => TypeReference::Scalar(kind.into()),
            }),
            NodeKind::Enum(values) => self.map_enum(node, values, pointer),
            NodeKind::Any => Ok(TypeReference::Scalar(ScalarKind::AnyObject)),
        }
    }

    /// Declares the class for an object node and returns its name.
    ///
    /// The name comes from a `ClassNameHint` at the node, else the definition
    /// name, else `context`. A node that is already declared keeps its name.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateTypeName` if another node owns the name.
    pub fn declare_class(
        &mut self,
        pointer: &SchemaPointer,
        node: &'a SchemaNode,
        context: &str,
    ) -> Result<String, CodegenError> {
        let key = ModelKey::Node(pointer.clone());
        if let Some(name) = self.graph.name_of(&key) {
            return Ok(name.to_string());
        }

        let hints = self.hints;
        let name = match hints.class_name(pointer) {
            Some(name) => {
                self.mark_hint_used(pointer, ClassNameHint::KIND);
                name.to_string()
            }
            None => match pointer.definition_name() {
                Some(definition) => to_pascal_case(&definition),
                None => context.to_string(),
            },
        };
        self.register_class(key, pointer, node, name)
    }

    /// Registers a placeholder class under an explicit name and queues it.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateTypeName` if another node owns the name.
    pub fn register_class(
        &mut self,
        key: ModelKey,
        pointer: &SchemaPointer,
        node: &'a SchemaNode,
        name: String,
    ) -> Result<String, CodegenError> {
        let mut class = ClassModel::class(&name, self.namespace);
        class.description = node.description.clone().unwrap_or_default();

        match self.graph.register(key.clone(), TypeModel::Class(class)) {
            Registration::Added => {
                tracing::debug!(class = %name, pointer = %pointer, "declared class");
                self.pending.push_back(PendingClass {
                    key,
                    pointer: pointer.clone(),
                    node,
                });
                Ok(name)
            }
            Registration::Existing => Ok(self
                .graph
                .name_of(&key)
                .map_or(name, ToString::to_string)),
            Registration::NameTaken(owner) => Err(duplicate(name, &owner, pointer)),
        }
    }

    /// Records that the hints of `kind` at `pointer` took effect.
    pub fn mark_hint_used(&mut self, pointer: &SchemaPointer, kind: &'static str) {
        self.used_hints.insert((pointer.clone(), kind));
    }

    /// Returns true if the hints of `kind` at `pointer` took effect.
    #[must_use]
    pub fn is_hint_used(&self, pointer: &SchemaPointer, kind: &'static str) -> bool {
        self.used_hints.contains(&(pointer.clone(), kind))
    }

    /// Takes the next declared class that still needs its properties.
    pub fn next_pending(&mut self) -> Option<PendingClass<'a>> {
        self.pending.pop_front()
    }

    /// Gives access to the resolver, for callers that resolve the root.
    pub fn resolver_mut(&mut self) -> &mut ReferenceResolver<'a> {
        &mut self.resolver
    }

    /// Returns the graph built so far.
    #[must_use]
    pub fn graph(&self) -> &ModelGraph {
        &self.graph
    }

    /// Returns the graph built so far for mutation.
    pub fn graph_mut(&mut self) -> &mut ModelGraph {
        &mut self.graph
    }

    /// Consumes the mapper, returning the graph.
    #[must_use]
    pub fn into_graph(self) -> ModelGraph {
        self.graph
    }

    fn map_enum(
        &mut self,
        node: &SchemaNode,
        values: &EnumSchema,
        pointer: &SchemaPointer,
    ) -> Result<TypeReference, CodegenError> {
        let hints = self.hints;
        let Some(hint) = hints.enum_hint(pointer) else {
            return Ok(TypeReference::Scalar(literal_kind(&values.values)));
        };
        self.mark_hint_used(pointer, EnumHint::KIND);

        let key = ModelKey::Node(pointer.clone());
        if let Some(name) = self.graph.name_of(&key) {
            return Ok(TypeReference::EnumRef(name.to_string()));
        }

        let model = EnumModel {
            name: hint.type_name.clone(),
            namespace: self.namespace.to_string(),
            description: hint
                .description
                .clone()
                .or_else(|| node.description.clone())
                .unwrap_or_default(),
            members: enum_members(hint, values, pointer)?,
        };

        match self.graph.register(key, TypeModel::Enum(model)) {
            Registration::Added | Registration::Existing => {
                tracing::debug!(type_name = %hint.type_name, pointer = %pointer, "declared enum");
                Ok(TypeReference::EnumRef(hint.type_name.clone()))
            }
            Registration::NameTaken(owner) => {
                Err(duplicate(hint.type_name.clone(), &owner, pointer))
            }
        }
    }
}

fn duplicate(name: String, owner: &ModelKey, pointer: &SchemaPointer) -> CodegenError {
    CodegenError::DuplicateTypeName {
        name,
        first: owner.pointer().to_string(),
        second: pointer.to_string(),
    }
}

/// Scalar kind shared by every literal of an unhinted enum.
fn literal_kind(values: &[Value]) -> ScalarKind {
    if values.is_empty() {
        ScalarKind::AnyObject
    } else if values.iter().all(Value::is_string) {
        ScalarKind::String
    } else if values.iter().all(|v| v.is_i64() || v.is_u64()) {
        ScalarKind::Integer
    } else if values.iter().all(Value::is_number) {
        ScalarKind::Number
    } else if values.iter().all(Value::is_boolean) {
        ScalarKind::Boolean
    } else {
        ScalarKind::AnyObject
    }
}

fn enum_members(
    hint: &EnumHint,
    values: &EnumSchema,
    pointer: &SchemaPointer,
) -> Result<Vec<String>, HintError> {
    if let Some(names) = &hint.member_names {
        if names.len() != values.values.len() {
            return Err(HintError::invalid_arguments(
                "EnumHint",
                pointer.to_string(),
                format!(
                    "memberNames has {} entries but the enum has {} values",
                    names.len(),
                    values.values.len()
                ),
            ));
        }
        return Ok(names.clone());
    }

    values
        .values
        .iter()
        .map(|value| {
            value.as_str().map(to_pascal_case).ok_or_else(|| {
                HintError::invalid_arguments(
                    "EnumHint",
                    pointer.to_string(),
                    format!("enum value {value} is not a string; memberNames is required"),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::{ClassNameHint, DictionaryHint, Hint};
    use crate::types::ImportedKind;
    use dotschema_schema::parse_schema;

    fn map_root_property(
        schema: &str,
        hints: &HintDictionary,
        property: &str,
    ) -> Result<(TypeReference, ModelGraph), CodegenError> {
        let doc = parse_schema(schema).expect("Failed to parse");
        let mut mapper = TypeMapper::new(&doc.definitions, hints, "N");
        let NodeKind::Object(root) = &doc.root.kind else {
            panic!("root is not an object");
        };
        let node = &root.properties[property];
        let pointer = SchemaPointer::root().property(property);
        let ty = mapper.map(node, &pointer, &to_pascal_case(property))?;
        Ok((ty, mapper.into_graph()))
    }

    #[test]
    fn test_map_primitives() {
        let schema = r#"{
  "type": "object",
  "properties": {
    "s": { "type": "string" },
    "n": { "type": "number" },
    "i": { "type": "integer" },
    "b": { "type": "boolean" },
    "t": { "type": "string", "format": "date-time" },
    "u": { "type": "string", "format": "uri" },
    "any": {}
  }
}"#;
        let hints = HintDictionary::new();
        let cases = [
            ("s", TypeReference::Scalar(ScalarKind::String)),
            ("n", TypeReference::Scalar(ScalarKind::Number)),
            ("i", TypeReference::Scalar(ScalarKind::Integer)),
            ("b", TypeReference::Scalar(ScalarKind::Boolean)),
            ("t", TypeReference::ImportedScalar(ImportedKind::DateTime)),
            ("u", TypeReference::ImportedScalar(ImportedKind::Uri)),
            ("any", TypeReference::Scalar(ScalarKind::AnyObject)),
        ];

        for (property, expected) in cases {
            let (ty, graph) = map_root_property(schema, &hints, property).expect("Failed to map");
            assert_eq!(ty, expected, "property {property}");
            assert!(graph.is_empty());
        }
    }

    #[test]
    fn test_reference_follows_through_to_primitive() {
        let (ty, graph) = map_root_property(
            r##"{
  "type": "object",
  "properties": { "p": { "$ref": "#/definitions/d" } },
  "definitions": { "d": { "type": "integer" } }
}"##,
            &HintDictionary::new(),
            "p",
        )
        .expect("Failed to map");

        assert_eq!(ty, TypeReference::Scalar(ScalarKind::Integer));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_nested_arrays_through_references() {
        let one = r##"{
  "type": "object",
  "properties": { "p": { "type": "array", "items": { "$ref": "#/definitions/d" } } },
  "definitions": { "d": { "type": "integer" } }
}"##;
        let two = r##"{
  "type": "object",
  "properties": { "p": { "type": "array", "items": { "$ref": "#/definitions/a1" } } },
  "definitions": {
    "a1": { "type": "array", "items": { "type": "integer" } }
  }
}"##;
        let three = r##"{
  "type": "object",
  "properties": { "p": { "type": "array", "items": { "$ref": "#/definitions/a2" } } },
  "definitions": {
    "a2": { "type": "array", "items": { "$ref": "#/definitions/a1" } },
    "a1": { "type": "array", "items": { "type": "integer" } }
  }
}"##;

        let hints = HintDictionary::new();
        for (depth, schema) in [(1, one), (2, two), (3, three)] {
            let (ty, _) = map_root_property(schema, &hints, "p").expect("Failed to map");
            assert_eq!(ty.array_depth(), depth);
            assert_eq!(ty.element_type(), &TypeReference::Scalar(ScalarKind::Integer));
        }
    }

    #[test]
    fn test_array_without_items_is_object_array() {
        let (ty, _) = map_root_property(
            r#"{ "type": "object", "properties": { "p": { "type": "array" } } }"#,
            &HintDictionary::new(),
            "p",
        )
        .expect("Failed to map");

        assert_eq!(
            ty,
            TypeReference::array_of(TypeReference::Scalar(ScalarKind::AnyObject))
        );
    }

    #[test]
    fn test_empty_inline_object_is_any() {
        let (ty, graph) = map_root_property(
            r#"{ "type": "object", "properties": { "p": { "type": "object" } } }"#,
            &HintDictionary::new(),
            "p",
        )
        .expect("Failed to map");

        assert_eq!(ty, TypeReference::Scalar(ScalarKind::AnyObject));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_empty_named_object_is_class() {
        let (ty, graph) = map_root_property(
            r##"{
  "type": "object",
  "properties": { "p": { "$ref": "#/definitions/d" } },
  "definitions": { "d": { "type": "object" } }
}"##,
            &HintDictionary::new(),
            "p",
        )
        .expect("Failed to map");

        assert_eq!(ty, TypeReference::ClassRef("D".to_string()));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_inline_object_is_named_after_property() {
        let (ty, graph) = map_root_property(
            r#"{
  "type": "object",
  "properties": {
    "windowSize": { "type": "object", "properties": { "w": { "type": "integer" } } }
  }
}"#,
            &HintDictionary::new(),
            "windowSize",
        )
        .expect("Failed to map");

        assert_eq!(ty, TypeReference::ClassRef("WindowSize".to_string()));
        assert!(graph.by_name("WindowSize").is_some());
    }

    #[test]
    fn test_references_share_one_class() {
        let doc = parse_schema(
            r##"{
  "type": "object",
  "properties": {
    "a": { "$ref": "#/definitions/color" },
    "b": { "$ref": "#/definitions/color" }
  },
  "definitions": {
    "color": { "type": "object", "properties": { "red": { "type": "integer" } } }
  }
}"##,
        )
        .expect("Failed to parse");
        let hints = HintDictionary::new();
        let mut mapper = TypeMapper::new(&doc.definitions, &hints, "N");
        let NodeKind::Object(root) = &doc.root.kind else {
            panic!("root is not an object");
        };

        for name in ["a", "b"] {
            let ty = mapper
                .map(&root.properties[name], &SchemaPointer::root().property(name), name)
                .expect("Failed to map");
            assert_eq!(ty, TypeReference::ClassRef("Color".to_string()));
        }
        assert_eq!(mapper.graph().len(), 1);
        assert!(mapper.next_pending().is_some());
        assert!(mapper.next_pending().is_none());
    }

    #[test]
    fn test_reference_loop_without_class_fails() {
        let err = map_root_property(
            r##"{
  "type": "object",
  "properties": { "p": { "$ref": "#/definitions/d" } },
  "definitions": { "d": { "type": "array", "items": { "$ref": "#/definitions/d" } } }
}"##,
            &HintDictionary::new(),
            "p",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CodegenError::Schema(SchemaError::CircularReference { .. })
        ));
        assert!(err.to_string().contains("definitions/d"));
    }

    #[test]
    fn test_malformed_reference_names_pointer() {
        let err = map_root_property(
            r##"{
  "type": "object",
  "properties": { "p": { "$ref": "#/notDefinitions/p" } }
}"##,
            &HintDictionary::new(),
            "p",
        )
        .unwrap_err();

        assert!(err.to_string().contains("#/notDefinitions/p"));
    }

    #[test]
    fn test_unhinted_enum_literal_kinds() {
        assert_eq!(
            literal_kind(&[Value::from("v1.0"), Value::from("v2.0")]),
            ScalarKind::String
        );
        assert_eq!(
            literal_kind(&[Value::from(1), Value::from(2)]),
            ScalarKind::Integer
        );
        assert_eq!(
            literal_kind(&[Value::from(1), Value::from(2.5)]),
            ScalarKind::Number
        );
        assert_eq!(
            literal_kind(&[Value::from(true), Value::from(false)]),
            ScalarKind::Boolean
        );
        assert_eq!(
            literal_kind(&[Value::from(1), Value::from("x")]),
            ScalarKind::AnyObject
        );
    }

    #[test]
    fn test_enum_hint_declares_enum() {
        let hints = HintDictionary::from_json(
            r#"{
  "properties/color": [
    { "kind": "EnumHint", "arguments": { "typeName": "Color", "description": "A color." } }
  ]
}"#,
        )
        .expect("Failed to parse hints");

        let (ty, graph) = map_root_property(
            r#"{
  "type": "object",
  "properties": { "color": { "enum": ["red", "dark-green"] } }
}"#,
            &hints,
            "color",
        )
        .expect("Failed to map");

        assert_eq!(ty, TypeReference::EnumRef("Color".to_string()));
        let Some(TypeModel::Enum(model)) = graph.by_name("Color") else {
            panic!("enum not registered");
        };
        assert_eq!(model.members, vec!["Red", "DarkGreen"]);
        assert_eq!(model.description, "A color.");
    }

    #[test]
    fn test_enum_hint_member_count_mismatch() {
        let hints = HintDictionary::from_json(
            r#"{
  "properties/level": [
    { "kind": "EnumHint", "arguments": { "typeName": "Level", "memberNames": ["Low"] } }
  ]
}"#,
        )
        .expect("Failed to parse hints");

        let err = map_root_property(
            r#"{ "type": "object", "properties": { "level": { "enum": [1, 2] } } }"#,
            &hints,
            "level",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CodegenError::Hint(HintError::InvalidArguments { .. })
        ));
        assert!(err.to_string().contains("properties/level"));
    }

    #[test]
    fn test_enum_hint_requires_names_for_non_strings() {
        let hints = HintDictionary::new().with_hint(
            "properties/level",
            Hint::Enum(EnumHint {
                type_name: "Level".to_string(),
                description: None,
                member_names: None,
            }),
        );

        let err = map_root_property(
            r#"{ "type": "object", "properties": { "level": { "enum": [1, 2] } } }"#,
            &hints,
            "level",
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::Hint(_)));
    }

    #[test]
    fn test_dictionary_hint() {
        let hints =
            HintDictionary::new().with_hint("properties/tags", Hint::Dictionary(DictionaryHint {}));

        let (ty, graph) = map_root_property(
            r#"{
  "type": "object",
  "properties": {
    "tags": { "type": "object", "additionalProperties": { "type": "integer" } }
  }
}"#,
            &hints,
            "tags",
        )
        .expect("Failed to map");

        assert_eq!(
            ty,
            TypeReference::dictionary(
                TypeReference::Scalar(ScalarKind::String),
                TypeReference::Scalar(ScalarKind::Integer)
            )
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn test_class_name_hint_overrides_definition_name() {
        let hints = HintDictionary::new().with_hint(
            "definitions/color",
            Hint::ClassName(ClassNameHint {
                class_name: "Rgb".to_string(),
            }),
        );

        let (ty, _) = map_root_property(
            r##"{
  "type": "object",
  "properties": { "c": { "$ref": "#/definitions/color" } },
  "definitions": {
    "color": { "type": "object", "properties": { "red": { "type": "integer" } } }
  }
}"##,
            &hints,
            "c",
        )
        .expect("Failed to map");

        assert_eq!(ty, TypeReference::ClassRef("Rgb".to_string()));
    }

    #[test]
    fn test_duplicate_type_name() {
        let doc = parse_schema(
            r##"{
  "type": "object",
  "properties": {
    "color": { "type": "object", "properties": { "x": { "type": "integer" } } },
    "other": { "$ref": "#/definitions/color" }
  },
  "definitions": {
    "color": { "type": "object", "properties": { "red": { "type": "integer" } } }
  }
}"##,
        )
        .expect("Failed to parse");
        let hints = HintDictionary::new();
        let mut mapper = TypeMapper::new(&doc.definitions, &hints, "N");
        let NodeKind::Object(root) = &doc.root.kind else {
            panic!("root is not an object");
        };

        mapper
            .map(
                &root.properties["color"],
                &SchemaPointer::root().property("color"),
                "Color",
            )
            .expect("Failed to map");
        let err = mapper
            .map(
                &root.properties["other"],
                &SchemaPointer::root().property("other"),
                "Other",
            )
            .unwrap_err();

        assert!(matches!(err, CodegenError::DuplicateTypeName { ref name, .. } if name == "Color"));
        assert!(err.to_string().contains("#/properties/color"));
        assert!(err.to_string().contains("#/definitions/color"));
    }
}
