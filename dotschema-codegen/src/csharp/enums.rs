//! Enum code generation.

use super::{INDENT, push_preamble, push_summary};
use crate::model::EnumModel;
use std::collections::BTreeSet;

/// Generator for hint-driven enum definitions.
pub struct EnumGenerator<'a> {
    model: &'a EnumModel,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(model: &'a EnumModel) -> Self {
        Self { model }
    }

    /// Generates the enum file.
    #[must_use]
    pub fn generate(&self, copyright: Option<&str>) -> String {
        let mut output = String::new();
        push_preamble(&mut output, copyright, &BTreeSet::new(), &self.model.namespace);

        push_summary(&mut output, 1, &self.model.description);
        output.push_str(&format!("{INDENT}public enum {}\n", self.model.name));
        output.push_str(&format!("{INDENT}{{\n"));

        let members: Vec<String> = self
            .model
            .members
            .iter()
            .map(|member| format!("{INDENT}{INDENT}{member}"))
            .collect();
        if !members.is_empty() {
            output.push_str(&members.join(",\n"));
            output.push('\n');
        }

        output.push_str(&format!("{INDENT}}}\n}}"));
        output
    }
}
