//! Value tree produced by the KV3 parser

use std::collections::HashMap;

/// A node in a parsed KV3 document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Keyed children; key order is not preserved
    Object(HashMap<String, Node>),
    /// Ordered children
    Array(Vec<Node>),
    /// Bare token or quoted string (without its enclosing quotes)
    Scalar(String),
    /// Interior of a `#[ .. ]` literal, kept verbatim
    Bytes(String),
}

impl Node {
    /// An object with no fields
    pub fn empty_object() -> Self {
        Self::Object(HashMap::new())
    }

    /// Field lookup; `None` for missing keys and non-objects
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Object(fields) => fields.get(key),
            Self::Array(_) | Self::Scalar(_) | Self::Bytes(_) => None,
        }
    }

    /// Element lookup; `None` for out-of-range indices and non-arrays
    pub fn at(&self, index: usize) -> Option<&Node> {
        match self {
            Self::Array(items) => items.get(index),
            Self::Object(_) | Self::Scalar(_) | Self::Bytes(_) => None,
        }
    }

    /// Text of a scalar or byte-blob node
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) | Self::Bytes(text) => Some(text),
            Self::Object(_) | Self::Array(_) => None,
        }
    }

    /// Fields of an object node
    pub fn as_object(&self) -> Option<&HashMap<String, Node>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Elements of an array node
    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}
