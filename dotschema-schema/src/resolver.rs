//! `$ref` resolution against a document's definitions.
//!
//! Only local fragments of the form `#/definitions/<name>` are supported.
//! Resolution is memoized per reference string, so every reference to the
//! same definition yields the same [`ResolvedReference`].

use crate::error::SchemaError;
use crate::pointer::{SchemaPointer, unescape_segment};
use crate::types::{DefinitionsTable, NodeKind, SchemaNode};
use std::collections::HashMap;

/// A reference resolved to its target definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedReference<'a> {
    /// Name of the target definition, as declared in the document.
    pub name: &'a str,
    /// Target node. Never a [`NodeKind::Reference`].
    pub node: &'a SchemaNode,
}

impl ResolvedReference<'_> {
    /// Pointer of the target definition.
    #[must_use]
    pub fn pointer(&self) -> SchemaPointer {
        SchemaPointer::definition(self.name)
    }
}

/// Memoizing resolver for one document.
#[derive(Debug)]
pub struct ReferenceResolver<'a> {
    definitions: &'a DefinitionsTable,
    cache: HashMap<String, ResolvedReference<'a>>,
}

impl<'a> ReferenceResolver<'a> {
    /// Creates a resolver over the given definitions.
    #[must_use]
    pub fn new(definitions: &'a DefinitionsTable) -> Self {
        Self {
            definitions,
            cache: HashMap::new(),
        }
    }

    /// Resolves a `$ref` value to the definition it denotes.
    ///
    /// Definitions that are themselves references are followed until a
    /// non-reference node is reached.
    ///
    /// # Errors
    /// Returns `SchemaError` if the reference is not a local fragment, does not
    /// point into `definitions`, names a missing definition, or the chain of
    /// references loops.
    pub fn resolve(&mut self, reference: &str) -> Result<ResolvedReference<'a>, SchemaError> {
        if let Some(hit) = self.cache.get(reference) {
            return Ok(*hit);
        }

        let mut visited: Vec<&'a str> = Vec::new();
        let mut current = reference.to_string();
        let resolved = loop {
            let (name, node) = lookup(self.definitions, &current)?;
            if visited.contains(&name) {
                return Err(SchemaError::CircularReference {
                    pointer: SchemaPointer::definition(name).to_string(),
                });
            }
            visited.push(name);
            match &node.kind {
                NodeKind::Reference(next) => current = next.pointer.clone(),
                _ => break ResolvedReference { name, node },
            }
        };

        tracing::trace!(reference, target = resolved.name, "resolved reference");
        self.cache.insert(reference.to_string(), resolved);
        Ok(resolved)
    }

    /// Number of distinct reference strings resolved so far.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.cache.len()
    }
}

/// Resolves a single reference without following chains.
///
/// # Errors
/// Returns `SchemaError` if the reference is malformed or the definition is missing.
pub fn lookup<'a>(
    definitions: &'a DefinitionsTable,
    reference: &str,
) -> Result<(&'a str, &'a SchemaNode), SchemaError> {
    let path = reference
        .strip_prefix("#/")
        .ok_or_else(|| SchemaError::NotLocalFragment {
            reference: reference.to_string(),
        })?;

    let mut segments = path.split('/');
    let name = match (segments.next(), segments.next(), segments.next()) {
        (Some("definitions"), Some(name), None) if !name.is_empty() => {
            unescape_segment(name).into_owned()
        }
        _ => {
            return Err(SchemaError::NotADefinition {
                reference: reference.to_string(),
            });
        }
    };

    definitions
        .get_entry(&name)
        .ok_or_else(|| SchemaError::DefinitionNotFound {
            name,
            reference: reference.to_string(),
        })
}
