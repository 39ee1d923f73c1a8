//! Schema validation utilities.
//!
//! This module checks the document-level invariants that code generation
//! relies on: the root describes an object, and every `$ref` in the document,
//! reachable or not, resolves to an existing definition.

use crate::error::SchemaError;
use crate::pointer::SchemaPointer;
use crate::resolver::ReferenceResolver;
use crate::types::{NodeKind, SchemaDocument, SchemaNode};

/// Validates a parsed document for code generation.
///
/// # Arguments
/// * `document` - The document to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if the root is not an object or any reference is invalid.
pub fn validate_document(document: &SchemaDocument) -> Result<(), SchemaError> {
    let mut resolver = ReferenceResolver::new(&document.definitions);
    resolve_root(document, &mut resolver)?;
    validate_references(&document.root, &mut resolver)?;
    for (_, definition) in document.definitions.iter() {
        validate_references(definition, &mut resolver)?;
    }
    Ok(())
}

/// Resolves the root node, following a root-level `$ref`, and checks that it is an object.
///
/// Returns the pointer of the node that actually holds the root object (the
/// root pointer, or the definition a root `$ref` points to) with the node.
///
/// # Errors
/// Returns `SchemaError::RootNotObject` naming the type actually found, or any
/// resolution error of a root-level reference.
pub fn resolve_root<'a>(
    document: &'a SchemaDocument,
    resolver: &mut ReferenceResolver<'a>,
) -> Result<(SchemaPointer, &'a SchemaNode), SchemaError> {
    let (pointer, root) = match &document.root.kind {
        NodeKind::Reference(reference) => {
            let resolved = resolver.resolve(&reference.pointer)?;
            (resolved.pointer(), resolved.node)
        }
        _ => (SchemaPointer::root(), &document.root),
    };

    if root.is_object() {
        Ok((pointer, root))
    } else {
        Err(SchemaError::RootNotObject {
            actual: root.type_name().to_string(),
        })
    }
}

/// Resolves every reference below a node.
fn validate_references<'a>(
    node: &'a SchemaNode,
    resolver: &mut ReferenceResolver<'a>,
) -> Result<(), SchemaError> {
    match &node.kind {
        NodeKind::Reference(reference) => {
            resolver.resolve(&reference.pointer)?;
        }
        NodeKind::Object(obj) => {
            for property in obj.properties.values() {
                validate_references(property, resolver)?;
            }
            if let Some(additional) = &obj.additional_properties {
                validate_references(additional, resolver)?;
            }
        }
        NodeKind::Array(arr) => {
            if let Some(items) = &arr.items {
                validate_references(items, resolver)?;
            }
        }
        NodeKind::Primitive(_) | NodeKind::Enum(_) | NodeKind::Any => {}
    }
    Ok(())
}
