//! Path expressions and the query walk
//!
//! A path is a dot-separated list of segments, each a key with an optional
//! `[index]`: `m_parts[0].m_rnShape.m_hulls[3].m_nCollisionAttributeIndex`.

use std::fmt;

use super::node::Node;

/// One step of a path: a key, optionally followed by an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Object key to look up
    pub key: String,
    /// Index into the array found under `key`
    pub index: Option<usize>,
}

impl Segment {
    /// Parse `key` or `key[index]`
    ///
    /// Text that does not match the indexed form is taken as a plain key.
    pub fn parse(text: &str) -> Self {
        if let Some(open) = text.find('[') {
            let key = &text[..open];
            let rest = &text[open + 1..];
            if let Some(close) = rest.find(']') {
                let digits = &rest[..close];
                let all_digits = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
                if !key.is_empty() && all_digits {
                    if let Ok(index) = digits.parse() {
                        return Self { key: key.to_string(), index: Some(index) };
                    }
                }
            }
        }
        Self { key: text.to_string(), index: None }
    }
}

/// A sequence of segments resolved from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<Segment>,
}

impl PathExpr {
    /// Parse dotted path text
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text.split('.').map(Segment::parse).collect(),
        }
    }

    /// Append a plain key segment
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment { key: key.into(), index: None });
        self
    }

    /// Append a `key[index]` segment
    #[must_use]
    pub fn indexed(mut self, key: impl Into<String>, index: usize) -> Self {
        self.segments.push(Segment { key: key.into(), index: Some(index) });
        self
    }

    /// Copy of this path with a plain key segment appended
    #[must_use]
    pub fn join(&self, key: impl Into<String>) -> Self {
        self.clone().key(key)
    }

    /// Segments in walk order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Walk the path from `root`
    ///
    /// Every lookup goes through an object; an indexed segment additionally
    /// requires an array under its key. Any mismatch is `None`.
    pub fn lookup<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        self.segments.iter().try_fold(root, |current, segment| {
            let child = match current {
                Node::Object(fields) => fields.get(&segment.key)?,
                Node::Array(_) | Node::Scalar(_) | Node::Bytes(_) => return None,
            };
            match (segment.index, child) {
                (None, _) => Some(child),
                (Some(index), Node::Array(items)) => items.get(index),
                (Some(_), Node::Object(_) | Node::Scalar(_) | Node::Bytes(_)) => None,
            }
        })
    }

    /// Resolve the path to the text of a scalar or byte blob
    ///
    /// One enclosing pair of double quotes is stripped. Containers at the end
    /// of the path and empty text both count as absent, so `None` is the only
    /// "not there" signal callers need to check.
    pub fn resolve<'a>(&self, root: &'a Node) -> Option<&'a str> {
        let text = self.lookup(root)?.as_text()?;
        let text = strip_one_quote_pair(text);
        (!text.is_empty()).then_some(text)
    }
}

impl From<&str> for PathExpr {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.key)?;
            if let Some(index) = segment.index {
                write!(f, "[{index}]")?;
            }
        }
        Ok(())
    }
}

fn strip_one_quote_pair(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
