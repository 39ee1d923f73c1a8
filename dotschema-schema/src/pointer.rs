//! Local schema pointers.
//!
//! A [`SchemaPointer`] addresses a node inside one document using the same
//! segments as a `$ref` fragment, without the leading `#/`: the root is the
//! empty pointer, a definition is `definitions/<name>`, a property of the root
//! is `properties/<name>`, and array items append `items`.
//!
//! Segments are stored escaped as in RFC 6901 (`~` as `~0`, `/` as `~1`), so a
//! name containing a slash is still one segment.

use std::borrow::Cow;
use std::fmt;

const DEFINITIONS: &str = "definitions";

/// Location of a node within a schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaPointer(String);

impl SchemaPointer {
    /// The pointer to the document root.
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// The pointer to a named definition.
    #[must_use]
    pub fn definition(name: &str) -> Self {
        Self::root().child(DEFINITIONS).child(name)
    }

    /// Parses a pointer, tolerating a leading `#` and leading slashes.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let s = s.strip_prefix('#').unwrap_or(s);
        Self(s.trim_start_matches('/').to_string())
    }

    /// Returns a pointer to a child segment of this node.
    ///
    /// `segment` is the unescaped name; it is escaped on the way in.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let segment = escape_segment(segment);
        if self.0.is_empty() {
            Self(segment.into_owned())
        } else {
            Self(format!("{}/{}", self.0, segment))
        }
    }

    /// Returns a pointer to a named property of this node.
    #[must_use]
    pub fn property(&self, name: &str) -> Self {
        self.child("properties").child(name)
    }

    /// Returns a pointer to the items schema of this node.
    #[must_use]
    pub fn items(&self) -> Self {
        self.child("items")
    }

    /// Returns the definition name if this pointer addresses a top-level definition.
    #[must_use]
    pub fn definition_name(&self) -> Option<Cow<'_, str>> {
        let mut segments = self.segments();
        match (segments.next(), segments.next(), segments.next()) {
            (Some(DEFINITIONS), Some(name), None) => Some(unescape_segment(name)),
            _ => None,
        }
    }

    /// Returns true if this is the root pointer.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the pointer text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates the path segments, still escaped.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

/// Escapes one segment: `~` becomes `~0` and `/` becomes `~1`.
fn escape_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains(['~', '/']) {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Decodes the escapes of one segment.
pub(crate) fn unescape_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') {
        Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(segment)
    }
}

impl fmt::Display for SchemaPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("#")
        } else {
            write!(f, "#/{}", self.0)
        }
    }
}

impl From<&str> for SchemaPointer {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pointer() {
        let root = SchemaPointer::root();
        assert!(root.is_root());
        assert_eq!(root.as_str(), "");
        assert_eq!(root.to_string(), "#");
    }

    #[test]
    fn test_definition_pointer() {
        let ptr = SchemaPointer::definition("color");
        assert_eq!(ptr.as_str(), "definitions/color");
        assert_eq!(ptr.definition_name().as_deref(), Some("color"));
        assert_eq!(ptr.to_string(), "#/definitions/color");
    }

    #[test]
    fn test_property_and_items() {
        let ptr = SchemaPointer::root().property("points").items();
        assert_eq!(ptr.as_str(), "properties/points/items");
        assert_eq!(ptr.definition_name(), None);

        let nested = SchemaPointer::definition("d").property("p");
        assert_eq!(nested.as_str(), "definitions/d/properties/p");
        assert_eq!(nested.definition_name(), None);
    }

    #[test]
    fn test_parse_normalizes_prefixes() {
        assert_eq!(SchemaPointer::parse(""), SchemaPointer::root());
        assert_eq!(SchemaPointer::parse("#"), SchemaPointer::root());
        assert_eq!(
            SchemaPointer::parse("#/definitions/d"),
            SchemaPointer::definition("d")
        );
        assert_eq!(
            SchemaPointer::parse("/definitions/d"),
            SchemaPointer::definition("d")
        );
        assert_eq!(
            SchemaPointer::parse("definitions/d"),
            SchemaPointer::definition("d")
        );
    }

    #[test]
    fn test_slash_in_name_stays_one_segment() {
        let literal = SchemaPointer::root().property("x/properties/y");
        let nested = SchemaPointer::root().property("x").property("y");
        assert_eq!(literal.as_str(), "properties/x~1properties~1y");
        assert_ne!(literal, nested);

        let ptr = SchemaPointer::definition("a/b~c");
        assert_eq!(ptr.as_str(), "definitions/a~1b~0c");
        assert_eq!(ptr.definition_name().as_deref(), Some("a/b~c"));
        assert_eq!(ptr.to_string(), "#/definitions/a~1b~0c");
    }

    #[test]
    fn test_escape_round_trip() {
        for name in ["plain", "a/b", "~1", "x~/y"] {
            assert_eq!(unescape_segment(&escape_segment(name)), name);
        }
    }
}
