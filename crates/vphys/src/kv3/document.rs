//! Parsed KV3 document

use super::node::Node;
use super::parser::parse_document;
use super::path::PathExpr;

/// An immutable parsed document and its query surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Parse document text; never fails
    pub fn parse(text: &str) -> Self {
        Self { root: parse_document(text) }
    }

    /// Root object
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Scalar or blob text at `path`, `None` when absent
    pub fn resolve(&self, path: &PathExpr) -> Option<&str> {
        path.resolve(&self.root)
    }

    /// [`Document::resolve`] with path text
    pub fn value(&self, path: &str) -> Option<&str> {
        self.resolve(&PathExpr::parse(path))
    }

    /// Node of any kind at `path`
    pub fn node(&self, path: &PathExpr) -> Option<&Node> {
        path.lookup(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_by_path_text() {
        let doc = Document::parse("{ m_collisionAttributes = [ { m_CollisionGroupString = \"default\" } ] }");
        assert_eq!(
            doc.value("m_collisionAttributes[0].m_CollisionGroupString"),
            Some("default")
        );
        assert_eq!(doc.value("m_collisionAttributes[1].m_CollisionGroupString"), None);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::parse("");
        assert_eq!(doc.root(), &Node::empty_object());
        assert_eq!(doc.value("m_parts[0]"), None);
        assert!(doc.node(&PathExpr::parse("m_parts")).is_none());
    }
}
