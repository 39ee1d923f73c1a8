//! Interface code generation.

use super::types::{type_name, using_namespaces};
use super::{INDENT, push_body, push_preamble, push_summary};
use crate::model::{ClassModel, PropertyModel};

/// Generator for an interface with read-only members.
pub struct InterfaceGenerator<'a> {
    interface: &'a ClassModel,
}

impl<'a> InterfaceGenerator<'a> {
    /// Creates a new interface generator.
    #[must_use]
    pub fn new(interface: &'a ClassModel) -> Self {
        Self { interface }
    }

    /// Generates the interface file.
    #[must_use]
    pub fn generate(&self, copyright: Option<&str>) -> String {
        let mut output = String::new();
        let usings = using_namespaces(&self.interface.properties);
        push_preamble(&mut output, copyright, &usings, &self.interface.namespace);

        push_summary(&mut output, 1, &self.interface.description);
        output.push_str(&format!(
            "{INDENT}public interface {}\n",
            self.interface.name
        ));

        let members: Vec<String> = self
            .interface
            .properties
            .iter()
            .map(generate_member)
            .collect();
        push_body(&mut output, &members);

        output
    }
}

fn generate_member(property: &PropertyModel) -> String {
    let mut output = String::new();
    push_summary(&mut output, 2, &property.description);
    output.push_str(&format!(
        "        {} {} {{ get; }}\n",
        type_name(&property.type_ref),
        property.identifier
    ));
    output
}
