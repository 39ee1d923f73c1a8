//! C# spelling of type references.

use crate::model::PropertyModel;
use crate::types::{ImportedKind, ScalarKind, TypeReference};
use std::collections::BTreeSet;

const SYSTEM: &str = "System";
const COLLECTIONS: &str = "System.Collections.Generic";

/// Returns the C# type name for a type reference.
#[must_use]
pub fn type_name(ty: &TypeReference) -> String {
    match ty {
        TypeReference::Scalar(kind) => scalar_name(*kind).to_string(),
        TypeReference::ImportedScalar(kind) => imported_name(*kind).to_string(),
        TypeReference::ArrayOf(inner) => format!("{}[]", type_name(inner)),
        TypeReference::ClassRef(name) | TypeReference::EnumRef(name) => name.clone(),
        TypeReference::DictionaryRef { key, value } => {
            format!("Dictionary<{}, {}>", type_name(key), type_name(value))
        }
    }
}

const fn scalar_name(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::String => "string",
        ScalarKind::Number => "double",
        ScalarKind::Integer => "int",
        ScalarKind::Boolean => "bool",
        ScalarKind::AnyObject => "object",
    }
}

const fn imported_name(kind: ImportedKind) -> &'static str {
    match kind {
        ImportedKind::DateTime => "DateTime",
        ImportedKind::Uri => "Uri",
    }
}

/// Namespace a type needs imported, if any.
fn required_namespace(ty: &TypeReference) -> Option<&'static str> {
    match ty {
        TypeReference::ImportedScalar(ImportedKind::DateTime | ImportedKind::Uri) => Some(SYSTEM),
        TypeReference::DictionaryRef { .. } => Some(COLLECTIONS),
        _ => None,
    }
}

/// Distinct namespaces the given properties need, in ordinal order.
#[must_use]
pub fn using_namespaces(properties: &[PropertyModel]) -> BTreeSet<&'static str> {
    let mut namespaces = BTreeSet::new();
    for property in properties {
        property.type_ref.visit(&mut |ty| {
            if let Some(namespace) = required_namespace(ty) {
                namespaces.insert(namespace);
            }
        });
    }
    namespaces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(type_ref: TypeReference) -> PropertyModel {
        PropertyModel {
            name: "p".to_string(),
            identifier: "P".to_string(),
            type_ref,
            description: String::new(),
        }
    }

    #[test]
    fn test_scalar_names() {
        assert_eq!(type_name(&TypeReference::Scalar(ScalarKind::String)), "string");
        assert_eq!(type_name(&TypeReference::Scalar(ScalarKind::Number)), "double");
        assert_eq!(type_name(&TypeReference::Scalar(ScalarKind::Integer)), "int");
        assert_eq!(type_name(&TypeReference::Scalar(ScalarKind::Boolean)), "bool");
        assert_eq!(type_name(&TypeReference::Scalar(ScalarKind::AnyObject)), "object");
    }

    #[test]
    fn test_nested_array_names() {
        let ty = TypeReference::array_of(TypeReference::array_of(TypeReference::ClassRef(
            "D".to_string(),
        )));
        assert_eq!(type_name(&ty), "D[][]");
    }

    #[test]
    fn test_dictionary_name() {
        let ty = TypeReference::dictionary(
            TypeReference::Scalar(ScalarKind::String),
            TypeReference::array_of(TypeReference::ImportedScalar(ImportedKind::Uri)),
        );
        assert_eq!(type_name(&ty), "Dictionary<string, Uri[]>");
    }

    #[test]
    fn test_usings_are_deduplicated_and_sorted() {
        let properties = vec![
            property(TypeReference::dictionary(
                TypeReference::Scalar(ScalarKind::String),
                TypeReference::Scalar(ScalarKind::Integer),
            )),
            property(TypeReference::ImportedScalar(ImportedKind::Uri)),
            property(TypeReference::array_of(TypeReference::ImportedScalar(
                ImportedKind::DateTime,
            ))),
        ];

        let namespaces: Vec<&str> = using_namespaces(&properties).into_iter().collect();
        assert_eq!(namespaces, vec!["System", "System.Collections.Generic"]);
    }

    #[test]
    fn test_no_usings_for_builtins() {
        let properties = vec![property(TypeReference::Scalar(ScalarKind::Integer))];
        assert!(using_namespaces(&properties).is_empty());
    }
}
