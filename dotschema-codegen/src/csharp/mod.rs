//! C# code generation modules.
//!
//! Every generated file has the same frame: an optional copyright header,
//! the `using` lines its members need, and a namespace block holding exactly
//! one declaration.

pub mod classes;
pub mod enums;
pub mod interfaces;
pub mod types;

pub use classes::ClassGenerator;
pub use enums::EnumGenerator;
pub use interfaces::InterfaceGenerator;

use crate::model::TypeModel;
use std::collections::BTreeSet;

/// File extension of generated C# files.
pub const EXTENSION: &str = "cs";

const INDENT: &str = "    ";

/// Renders type models as C# source files.
#[derive(Debug, Clone, Default)]
pub struct CSharpEmitter<'a> {
    copyright: Option<&'a str>,
}

impl<'a> CSharpEmitter<'a> {
    /// Creates an emitter; `copyright` is emitted at the top of every file.
    #[must_use]
    pub fn new(copyright: Option<&'a str>) -> Self {
        Self { copyright }
    }

    /// File extension of the generated files.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        EXTENSION
    }

    /// Renders one type as a complete file.
    #[must_use]
    pub fn emit(&self, model: &TypeModel) -> String {
        match model {
            TypeModel::Class(class) if class.is_interface => {
                InterfaceGenerator::new(class).generate(self.copyright)
            }
            TypeModel::Class(class) => ClassGenerator::new(class).generate(self.copyright),
            TypeModel::Enum(model) => EnumGenerator::new(model).generate(self.copyright),
        }
    }
}

/// Writes the header, `using` lines and namespace opening of a file.
fn push_preamble(
    output: &mut String,
    copyright: Option<&str>,
    usings: &BTreeSet<&str>,
    namespace: &str,
) {
    if let Some(text) = copyright {
        output.push_str(text.trim_end_matches(['\r', '\n']));
        output.push_str("\n\n");
    }

    if !usings.is_empty() {
        for namespace in usings {
            output.push_str(&format!("using {namespace};\n"));
        }
        output.push('\n');
    }

    output.push_str(&format!("namespace {namespace}\n{{\n"));
}

/// Writes a `<summary>` doc comment at the given nesting depth.
fn push_summary(output: &mut String, depth: usize, description: &str) {
    let indent = INDENT.repeat(depth);
    output.push_str(&format!("{indent}/// <summary>\n"));
    if description.is_empty() {
        output.push_str(&format!("{indent}/// \n"));
    } else {
        for line in description.lines() {
            output.push_str(&format!("{indent}/// {line}\n"));
        }
    }
    output.push_str(&format!("{indent}/// </summary>\n"));
}

/// Writes a declaration body: members separated by one blank line, then the
/// closing braces of the declaration and the namespace.
fn push_body(output: &mut String, members: &[String]) {
    output.push_str(&format!("{INDENT}{{\n"));
    output.push_str(&members.join("\n"));
    output.push_str(&format!("{INDENT}}}\n}}"));
}
