//! Identifier normalization for generated C# names.

/// Converts a schema name to a PascalCase C# identifier.
///
/// Every character that cannot appear in an identifier is treated as a word
/// separator and dropped; the first character and every character after a
/// separator is upper-cased; everything else is kept as written. A result
/// that would start with a digit, or be empty, gets a leading `_`.
/// Applying it to its own output is a no-op.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 1);
    let mut capitalize_next = true;

    for c in s.chars() {
        if !c.is_alphanumeric() {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    if result.chars().next().is_none_or(|c| c.is_numeric()) {
        result.insert(0, '_');
    }
    result
}

/// Name of the interface generated for a class.
#[must_use]
pub fn interface_name(class_name: &str) -> String {
    format!("I{class_name}")
}
