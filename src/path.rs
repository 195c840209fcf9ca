//! JSON Pointer paths from the schema root

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// A single step into a JSON document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // RFC 6901: '~' must be escaped before '/'
            Self::Key(key) => write!(f, "{}", key.replace('~', "~0").replace('/', "~1")),
            Self::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Location of a node relative to the schema root.
///
/// Paths are immutable; [`SchemaPath::key`] and [`SchemaPath::index`] return
/// extended copies so that sibling keywords never observe each other's steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaPath {
    segments: Vec<PathSegment>,
}

impl SchemaPath {
    /// The root of the document
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend with an object key
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(PathSegment::Key(key.into()))
    }

    /// Extend with an array index
    pub fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    fn child(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of steps from the root
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render as a JSON Pointer (`""` for the root)
    pub fn to_pointer(&self) -> String {
        self.to_string()
    }

    /// Navigate `document` to the node this path identifies
    pub fn resolve<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments.iter().try_fold(document, |node, segment| match (segment, node) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key),
            (PathSegment::Index(index), Value::Array(items)) => items.get(*index),
            _ => None,
        })
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for SchemaPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_renders_empty() {
        assert_eq!(SchemaPath::root().to_pointer(), "");
        assert!(SchemaPath::root().is_root());
    }

    #[test]
    fn test_pointer_rendering() {
        let path = SchemaPath::root().key("properties").key("name").key("type");
        assert_eq!(path.to_pointer(), "/properties/name/type");

        let path = SchemaPath::root().key("allOf").index(2);
        assert_eq!(path.to_string(), "/allOf/2");
    }

    #[test]
    fn test_pointer_escaping() {
        let path = SchemaPath::root().key("patternProperties").key("a/b~c");
        assert_eq!(path.to_pointer(), "/patternProperties/a~1b~0c");
    }

    #[test]
    fn test_resolve_matches_value_pointer() {
        let doc = json!({
            "properties": { "a/b": { "type": ["string", 3] } }
        });
        let path = SchemaPath::root()
            .key("properties")
            .key("a/b")
            .key("type")
            .index(1);

        assert_eq!(path.resolve(&doc), Some(&json!(3)));
        assert_eq!(doc.pointer(&path.to_pointer()), Some(&json!(3)));
    }

    #[test]
    fn test_resolve_missing() {
        let doc = json!({ "items": true });
        assert!(SchemaPath::root().key("items").key("x").resolve(&doc).is_none());
        assert!(SchemaPath::root().index(0).resolve(&doc).is_none());
    }

    #[test]
    fn test_serializes_as_pointer() {
        let path = SchemaPath::root().key("required").index(0);
        assert_eq!(serde_json::to_value(&path).unwrap(), json!("/required/0"));
    }
}
