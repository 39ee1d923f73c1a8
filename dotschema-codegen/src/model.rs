//! Intermediate representation for code generation.
//!
//! The builder produces a [`ModelGraph`]: an arena of type models keyed by the
//! pointer of the schema node that produced them. Models refer to each other
//! only by name, so cycles in the schema are just names in the arena.

use crate::types::TypeReference;
use dotschema_schema::SchemaPointer;
use indexmap::{IndexMap, IndexSet};
use std::path::PathBuf;

/// One member of a class or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModel {
    /// Property name as written in the schema.
    pub name: String,
    /// Generated identifier.
    pub identifier: String,
    /// Mapped type.
    pub type_ref: TypeReference,
    /// Description; empty when the schema has none.
    pub description: String,
}

/// A class or interface to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassModel {
    /// Type name.
    pub name: String,
    /// Namespace the type lives in.
    pub namespace: String,
    /// Description; empty when the schema has none.
    pub description: String,
    /// Members in schema declaration order.
    pub properties: Vec<PropertyModel>,
    /// Interfaces the class declares conformance to, in the order they were added.
    pub implemented_interfaces: IndexSet<String>,
    /// Whether equality scaffolding is emitted.
    pub has_equality_support: bool,
    /// Whether this is an interface rather than a class.
    pub is_interface: bool,
}

impl ClassModel {
    /// Creates an empty class.
    #[must_use]
    pub fn class(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            description: String::new(),
            properties: Vec::new(),
            implemented_interfaces: IndexSet::new(),
            has_equality_support: true,
            is_interface: false,
        }
    }

    /// Creates an interface exposing the same members as `class`.
    #[must_use]
    pub fn interface_of(class: &ClassModel, name: impl Into<String>, description: &str) -> Self {
        Self {
            name: name.into(),
            namespace: class.namespace.clone(),
            description: description.to_string(),
            properties: class.properties.clone(),
            implemented_interfaces: IndexSet::new(),
            has_equality_support: false,
            is_interface: true,
        }
    }
}

/// An enum to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumModel {
    /// Type name.
    pub name: String,
    /// Namespace the type lives in.
    pub namespace: String,
    /// Description; empty when none was given.
    pub description: String,
    /// Member identifiers in declaration order.
    pub members: Vec<String>,
}

/// Any generated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeModel {
    /// Class or interface.
    Class(ClassModel),
    /// Enum.
    Enum(EnumModel),
}

impl TypeModel {
    /// Type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) => &c.name,
            Self::Enum(e) => &e.name,
        }
    }

    /// Returns the class model, if this is one.
    #[must_use]
    pub fn as_class(&self) -> Option<&ClassModel> {
        match self {
            Self::Class(c) => Some(c),
            Self::Enum(_) => None,
        }
    }
}

/// Identity of a model in the graph.
///
/// Classes and enums use the pointer of their schema node; an interface
/// spawned by a hint uses its class's pointer plus a marker, so one node can
/// own several models.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelKey {
    /// The type produced by the node itself.
    Node(SchemaPointer),
    /// The interface spawned for the class at this node.
    Interface(SchemaPointer),
}

impl ModelKey {
    /// Pointer of the schema node behind this model.
    #[must_use]
    pub fn pointer(&self) -> &SchemaPointer {
        match self {
            Self::Node(p) | Self::Interface(p) => p,
        }
    }
}

/// Outcome of registering a model under a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// A new model was registered.
    Added,
    /// The key was already registered; nothing changed.
    Existing,
    /// The name is already taken by another key.
    NameTaken(ModelKey),
}

/// A hint that had no effect on the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredHint {
    /// Pointer the hint is attached to.
    pub pointer: SchemaPointer,
    /// Hint kind.
    pub kind: &'static str,
}

/// Arena of generated types, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    models: IndexMap<ModelKey, TypeModel>,
    names: IndexMap<String, ModelKey>,
    ignored_hints: Vec<IgnoredHint>,
}

impl ModelGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model unless its key or name is already in use.
    pub fn register(&mut self, key: ModelKey, model: TypeModel) -> Registration {
        if self.models.contains_key(&key) {
            return Registration::Existing;
        }
        if let Some(owner) = self.names.get(model.name()) {
            return Registration::NameTaken(owner.clone());
        }
        self.names.insert(model.name().to_string(), key.clone());
        self.models.insert(key, model);
        Registration::Added
    }

    /// Looks up a model by key.
    #[must_use]
    pub fn get(&self, key: &ModelKey) -> Option<&TypeModel> {
        self.models.get(key)
    }

    /// Looks up a class by key for mutation.
    pub fn class_mut(&mut self, key: &ModelKey) -> Option<&mut ClassModel> {
        match self.models.get_mut(key) {
            Some(TypeModel::Class(c)) => Some(c),
            _ => None,
        }
    }

    /// Name of the model registered under a key.
    #[must_use]
    pub fn name_of(&self, key: &ModelKey) -> Option<&str> {
        self.models.get(key).map(TypeModel::name)
    }

    /// Looks up a model by type name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&TypeModel> {
        self.names.get(name).and_then(|key| self.models.get(key))
    }

    /// Iterates models in registration order.
    pub fn models(&self) -> impl Iterator<Item = &TypeModel> + '_ {
        self.models.values()
    }

    /// Hints that did not apply to the node they are attached to, or whose
    /// node was never reached, in hints-document order.
    #[must_use]
    pub fn ignored_hints(&self) -> &[IgnoredHint] {
        &self.ignored_hints
    }

    /// Records a hint that had no effect.
    pub fn record_ignored_hint(&mut self, hint: IgnoredHint) {
        self.ignored_hints.push(hint);
    }

    /// Number of models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns true if the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Name of the type the file declares.
    pub type_name: String,
    /// Destination path.
    pub path: PathBuf,
    /// File content.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarKind;

    fn value_property() -> PropertyModel {
        PropertyModel {
            name: "value".to_string(),
            identifier: "Value".to_string(),
            type_ref: TypeReference::Scalar(ScalarKind::Integer),
            description: "The value.".to_string(),
        }
    }

    #[test]
    fn test_interface_of_copies_members() {
        let mut class = ClassModel::class("C", "N");
        class.description = "My class.".to_string();
        class.properties.push(value_property());

        let interface = ClassModel::interface_of(&class, "IC", "My interface.");
        assert!(interface.is_interface);
        assert!(!interface.has_equality_support);
        assert_eq!(interface.description, "My interface.");
        assert_eq!(interface.namespace, "N");
        assert_eq!(interface.properties, class.properties);
    }

    #[test]
    fn test_register_is_keyed_by_pointer() {
        let mut graph = ModelGraph::new();
        let key = ModelKey::Node(SchemaPointer::definition("d"));

        assert_eq!(
            graph.register(key.clone(), TypeModel::Class(ClassModel::class("D", "N"))),
            Registration::Added
        );
        assert_eq!(
            graph.register(key.clone(), TypeModel::Class(ClassModel::class("D", "N"))),
            Registration::Existing
        );
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.name_of(&key), Some("D"));
    }

    #[test]
    fn test_register_rejects_duplicate_names() {
        let mut graph = ModelGraph::new();
        let first = ModelKey::Node(SchemaPointer::definition("color"));
        let second = ModelKey::Node(SchemaPointer::root().property("color"));

        graph.register(first.clone(), TypeModel::Class(ClassModel::class("Color", "N")));
        assert_eq!(
            graph.register(second, TypeModel::Class(ClassModel::class("Color", "N"))),
            Registration::NameTaken(first)
        );
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut graph = ModelGraph::new();
        for name in ["C", "Def1", "Def2"] {
            graph.register(
                ModelKey::Node(SchemaPointer::definition(name)),
                TypeModel::Class(ClassModel::class(name, "N")),
            );
        }
        let names: Vec<&str> = graph.models().map(TypeModel::name).collect();
        assert_eq!(names, vec!["C", "Def1", "Def2"]);
        assert!(graph.by_name("Def1").is_some());
    }
}
