//! Class model construction.
//!
//! [`ClassModelBuilder`] walks a schema document with a worklist. Every class
//! is declared before its properties are mapped, so recursive schemas name
//! their classes instead of expanding them again.

use crate::error::CodegenError;
use crate::hints::{
    ClassNameHint, DictionaryHint, Hint, InterfaceHint, PropertyNameHint,
};
use crate::mapper::{PendingClass, TypeMapper};
use crate::model::{
    ClassModel, IgnoredHint, ModelGraph, ModelKey, PropertyModel, Registration, TypeModel,
};
use crate::naming::{interface_name, to_pascal_case};
use crate::settings::GeneratorSettings;
use dotschema_schema::{NodeKind, SchemaDocument, SchemaPointer, resolve_root};

/// Builds the model graph for one document.
pub struct ClassModelBuilder<'a> {
    document: &'a SchemaDocument,
    settings: &'a GeneratorSettings,
}

impl<'a> ClassModelBuilder<'a> {
    /// Creates a builder for the given document and settings.
    #[must_use]
    pub fn new(document: &'a SchemaDocument, settings: &'a GeneratorSettings) -> Self {
        Self { document, settings }
    }

    /// Builds every class, interface and enum the document produces.
    ///
    /// The root comes first, then every object definition in document order,
    /// then whatever the properties discover.
    ///
    /// # Errors
    /// Returns `CodegenError` if the root is not an object, a reference does
    /// not resolve, a hint does not fit its node, or two nodes produce the
    /// same type name.
    pub fn build(&self) -> Result<ModelGraph, CodegenError> {
        let document = self.document;
        let settings = self.settings;
        let hints = &settings.hints;
        let mut mapper =
            TypeMapper::new(&document.definitions, hints, &settings.namespace_name);

        let (root_pointer, root) = resolve_root(document, mapper.resolver_mut())?;
        let root_key = ModelKey::Node(root_pointer.clone());
        let root_name = match root_hint_pointers(&root_pointer)
            .into_iter()
            .find_map(|pointer| hints.class_name(&pointer).map(|name| (pointer, name)))
        {
            Some((pointer, name)) => {
                mapper.mark_hint_used(&pointer, ClassNameHint::KIND);
                name.to_string()
            }
            None => to_pascal_case(&settings.root_class_name),
        };
        mapper.register_class(root_key.clone(), &root_pointer, root, root_name)?;

        for (name, definition) in document.definitions.iter() {
            let pointer = SchemaPointer::definition(name);
            match &definition.kind {
                NodeKind::Object(_) if hints.is_dictionary(&pointer) => {
                    mapper.mark_hint_used(&pointer, DictionaryHint::KIND);
                }
                NodeKind::Object(_) => {
                    mapper.declare_class(&pointer, definition, &to_pascal_case(name))?;
                }
                NodeKind::Enum(_) if hints.enum_hint(&pointer).is_some() => {
                    mapper.map(definition, &pointer, &to_pascal_case(name))?;
                }
                _ => {}
            }
        }

        while let Some(pending) = mapper.next_pending() {
            self.fill_class(&mut mapper, &pending)?;
            if pending.key == root_key {
                for pointer in root_hint_pointers(&pending.pointer) {
                    self.apply_hints(&mut mapper, &pending, &pointer)?;
                }
            } else {
                self.apply_hints(&mut mapper, &pending, &pending.pointer)?;
            }
        }

        let ignored: Vec<IgnoredHint> = hints
            .iter()
            .flat_map(|(pointer, list)| {
                list.iter().map(move |hint| IgnoredHint {
                    pointer: pointer.clone(),
                    kind: hint.kind(),
                })
            })
            .filter(|hint| !mapper.is_hint_used(&hint.pointer, hint.kind))
            .collect();

        let mut graph = mapper.into_graph();
        for hint in ignored {
            tracing::warn!(
                pointer = %hint.pointer,
                kind = hint.kind,
                "hint does not apply to its node or the node is never reached; ignoring"
            );
            graph.record_ignored_hint(hint);
        }

        tracing::debug!(types = graph.len(), "built model graph");
        Ok(graph)
    }

    /// Maps the properties of a declared class.
    fn fill_class(
        &self,
        mapper: &mut TypeMapper<'a>,
        pending: &PendingClass<'a>,
    ) -> Result<(), CodegenError> {
        let NodeKind::Object(obj) = &pending.node.kind else {
            return Ok(());
        };
        let class_name = mapper
            .graph()
            .name_of(&pending.key)
            .map(str::to_string)
            .unwrap_or_default();

        let mut properties: Vec<PropertyModel> = Vec::with_capacity(obj.properties.len());
        for (name, node) in &obj.properties {
            let pointer = pending.pointer.property(name);
            let identifier = match self.settings.hints.property_name(&pointer) {
                Some(identifier) => {
                    mapper.mark_hint_used(&pointer, PropertyNameHint::KIND);
                    identifier.to_string()
                }
                None => to_pascal_case(name),
            };

            let clashes_with = if identifier == class_name {
                Some("the class name".to_string())
            } else {
                properties
                    .iter()
                    .find(|p| p.identifier == identifier)
                    .map(|p| format!("property '{}'", p.name))
            };
            if let Some(clashes_with) = clashes_with {
                return Err(CodegenError::MemberNameCollision {
                    class: class_name,
                    identifier,
                    pointer: pointer.to_string(),
                    clashes_with,
                });
            }

            let type_ref = mapper.map(node, &pointer, &identifier)?;
            properties.push(PropertyModel {
                name: name.clone(),
                identifier,
                type_ref,
                description: node.description.clone().unwrap_or_default(),
            });
        }

        if let Some(class) = mapper.graph_mut().class_mut(&pending.key) {
            class.has_equality_support =
                !properties.is_empty() || self.settings.generate_equality_for_empty_classes;
            class.properties = properties;
        }
        Ok(())
    }

    /// Applies the interface hints found at `hint_pointer` to a filled class.
    ///
    /// Other kinds are consumed while declaring and mapping; whatever is left
    /// unused is reported once the build is done.
    fn apply_hints(
        &self,
        mapper: &mut TypeMapper<'a>,
        pending: &PendingClass<'a>,
        hint_pointer: &SchemaPointer,
    ) -> Result<(), CodegenError> {
        for hint in self.settings.hints.lookup(hint_pointer) {
            let Hint::Interface(interface) = hint else {
                continue;
            };
            let Some(class) = mapper
                .graph()
                .get(&pending.key)
                .and_then(TypeModel::as_class)
            else {
                continue;
            };
            let name = interface_name(&class.name);
            let model = ClassModel::interface_of(class, &name, &interface.description);

            mapper.mark_hint_used(hint_pointer, InterfaceHint::KIND);
            let key = ModelKey::Interface(pending.pointer.clone());
            match mapper.graph_mut().register(key, TypeModel::Class(model)) {
                Registration::Added => {
                    tracing::debug!(
                        interface = %name,
                        pointer = %pending.pointer,
                        "declared interface"
                    );
                    if let Some(class) = mapper.graph_mut().class_mut(&pending.key) {
                        class.implemented_interfaces.insert(name);
                    }
                }
                Registration::Existing => {
                    tracing::warn!(
                        pointer = %hint_pointer,
                        "duplicate InterfaceHint ignored"
                    );
                }
                Registration::NameTaken(owner) => {
                    return Err(CodegenError::DuplicateTypeName {
                        name,
                        first: owner.pointer().to_string(),
                        second: pending.pointer.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Pointers whose hints address the root class.
///
/// A root that is a `$ref` is built from its target definition, so hints at
/// the document root and at the definition both apply. The definition wins.
fn root_hint_pointers(root_pointer: &SchemaPointer) -> Vec<SchemaPointer> {
    if root_pointer.is_root() {
        vec![SchemaPointer::root()]
    } else {
        vec![root_pointer.clone(), SchemaPointer::root()]
    }
}
