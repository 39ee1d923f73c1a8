//! Class code generation.

use super::types::{type_name, using_namespaces};
use super::{INDENT, push_body, push_preamble, push_summary};
use crate::model::{ClassModel, PropertyModel};

/// Generator for a partial class with auto-properties.
pub struct ClassGenerator<'a> {
    class: &'a ClassModel,
}

impl<'a> ClassGenerator<'a> {
    /// Creates a new class generator.
    #[must_use]
    pub fn new(class: &'a ClassModel) -> Self {
        Self { class }
    }

    /// Generates the class file.
    #[must_use]
    pub fn generate(&self, copyright: Option<&str>) -> String {
        let mut output = String::new();
        let usings = using_namespaces(&self.class.properties);
        push_preamble(&mut output, copyright, &usings, &self.class.namespace);

        push_summary(&mut output, 1, &self.class.description);
        output.push_str(&format!(
            "{INDENT}public partial class {}{}\n",
            self.class.name,
            self.base_list()
        ));

        let mut members: Vec<String> = self
            .class
            .properties
            .iter()
            .map(generate_property)
            .collect();
        if self.class.has_equality_support {
            members.push(self.generate_equals());
        }
        push_body(&mut output, &members);

        output
    }

    /// Conformance list, e.g. ` : IC, ID`; empty when there is none.
    fn base_list(&self) -> String {
        if self.class.implemented_interfaces.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = self
            .class
            .implemented_interfaces
            .iter()
            .map(String::as_str)
            .collect();
        format!(" : {}", names.join(", "))
    }

    /// Generates the equality stub.
    ///
    /// Only the null check is emitted; member comparison is left to the
    /// partial class.
    fn generate_equals(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "        public bool Equals({} other)\n",
            self.class.name
        ));
        output.push_str("        {\n");
        output.push_str("            if (other == null)\n");
        output.push_str("            {\n");
        output.push_str("                return false;\n");
        output.push_str("            }\n");
        output.push_str("        }\n");
        output
    }
}

/// Generates one read-write auto-property.
fn generate_property(property: &PropertyModel) -> String {
    let mut output = String::new();
    push_summary(&mut output, 2, &property.description);
    output.push_str(&format!(
        "        public {} {} {{ get; set; }}\n",
        type_name(&property.type_ref),
        property.identifier
    ));
    output
}
