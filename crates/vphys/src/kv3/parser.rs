//! Recursive-descent builder for the KV3 value tree
//!
//! ```text
//! document := object
//! object   := '{' (key '=' value ','?)* '}'
//! array    := '[' (value ','?)* ']'
//! value    := object | array | quoted-string | byte-blob | bare-token
//! ```
//!
//! The builder never fails. Unbalanced or stray tokens end the current
//! container early or are skipped, and whatever was built from the consumed
//! prefix is returned.

use std::collections::HashMap;

use super::lexer::{strip_comments_and_header, tokenize, Token};
use super::node::Node;
use crate::limits::MAX_NESTING_DEPTH;

/// Parse document text into its root node
///
/// The root is always an object. Text without an opening brace yields an
/// empty one.
pub fn parse_document(text: &str) -> Node {
    let cleaned = strip_comments_and_header(text);
    let tokens = tokenize(&cleaned);
    Parser::new(&tokens).parse_root()
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn parse_root(&mut self) -> Node {
        match self.peek() {
            Some(Token::LBrace) => self.parse_object(0),
            _ => Node::empty_object(),
        }
    }

    /// Expects the current token to be `{`
    fn parse_object(&mut self, depth: usize) -> Node {
        self.advance();
        let mut fields = HashMap::new();

        while let Some(token) = self.peek() {
            match token {
                Token::RBrace => {
                    self.advance();
                    break;
                }
                Token::Comma | Token::Equals | Token::RBracket => self.advance(),
                // A container where a key belongs; consume it to stay aligned
                Token::LBrace | Token::LBracket => {
                    let _ = self.parse_value(depth);
                }
                Token::Quoted(_) | Token::Blob(_) | Token::Bare(_) => {
                    let key = token.key_text().unwrap_or_default().to_string();
                    self.advance();

                    if self.peek() == Some(&Token::Equals) {
                        self.advance();
                    }

                    if let Some(value) = self.parse_value(depth) {
                        fields.insert(key, value);
                    }
                }
            }
        }

        Node::Object(fields)
    }

    /// Expects the current token to be `[`
    fn parse_array(&mut self, depth: usize) -> Node {
        self.advance();
        let mut items = Vec::new();

        while let Some(token) = self.peek() {
            match token {
                Token::RBracket => {
                    self.advance();
                    break;
                }
                Token::Comma | Token::Equals => self.advance(),
                _ => match self.parse_value(depth) {
                    Some(value) => items.push(value),
                    // stray `}`: leave it for the enclosing object
                    None => break,
                },
            }
        }

        Node::Array(items)
    }

    /// `depth` is the nesting of the container the value sits in
    fn parse_value(&mut self, depth: usize) -> Option<Node> {
        let token = self.peek()?;

        match token {
            Token::LBrace | Token::LBracket if depth >= MAX_NESTING_DEPTH => {
                log::warn!("KV3 nesting exceeds {MAX_NESTING_DEPTH} levels, keeping partial tree");
                self.pos = self.tokens.len();
                None
            }
            Token::LBrace => Some(self.parse_object(depth + 1)),
            Token::LBracket => Some(self.parse_array(depth + 1)),
            Token::Quoted(text) | Token::Bare(text) => {
                self.advance();
                Some(Node::Scalar(text.clone()))
            }
            Token::Blob(text) => {
                self.advance();
                Some(Node::Bytes(text.clone()))
            }
            Token::RBrace | Token::RBracket | Token::Equals | Token::Comma => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(text: &str) -> Node {
        Node::Scalar(text.to_string())
    }

    #[test]
    fn test_parse_nested_document() {
        let text = r#"<!-- kv3 encoding:text:version{e21c7f3c-8a33-41c5-9977-a76d3a32aa0d} -->
{
    m_nFlags = 0
    m_name = "world"
    m_parts =
    [
        {
            m_rnShape =
            {
                m_hulls = [ ]
                m_data = #[ 00 01 02 ]
            }
        },
    ]
}
"#;
        let root = parse_document(text);

        assert_eq!(root.get("m_nFlags"), Some(&scalar("0")));
        assert_eq!(root.get("m_name"), Some(&scalar("world")));

        let shape = root
            .get("m_parts")
            .and_then(|parts| parts.at(0))
            .and_then(|part| part.get("m_rnShape"))
            .expect("shape object");
        assert_eq!(shape.get("m_hulls"), Some(&Node::Array(Vec::new())));
        assert_eq!(shape.get("m_data"), Some(&Node::Bytes(" 00 01 02 ".to_string())));
    }

    #[test]
    fn test_comma_and_newline_separators_are_equivalent() {
        let commas = parse_document("{ a = 1, b = [1, 2, 3], c = { d = x, }, }");
        let newlines = parse_document("{\n a = 1\n b = [\n1\n2\n3\n]\n c = {\n d = x\n }\n}");
        assert_eq!(commas, newlines);
    }

    #[test]
    fn test_quoted_keys_are_trimmed() {
        let root = parse_document(r#"{ "m_key" = "value" }"#);
        assert_eq!(root.get("m_key"), Some(&scalar("value")));
    }

    #[test]
    fn test_missing_closing_brace_keeps_prefix() {
        let root = parse_document("{ a = 1\n b = { c = 2\n");
        assert_eq!(root.get("a"), Some(&scalar("1")));
        assert_eq!(root.get("b").and_then(|b| b.get("c")), Some(&scalar("2")));
    }

    #[test]
    fn test_stray_closing_tokens_are_tolerated() {
        let root = parse_document("{ a = ] b = 2 c = [ 1 } d = 3 }");
        assert_eq!(root.get("b"), Some(&scalar("2")));
        assert_eq!(root.get("c"), Some(&Node::Array(vec![scalar("1")])));
        // the stray `}` closed the root early
        assert!(root.get("d").is_none());
    }

    #[test]
    fn test_key_without_value_is_omitted() {
        let root = parse_document("{ a = }");
        assert_eq!(root, Node::empty_object());
    }

    #[test]
    fn test_text_without_object_is_empty() {
        assert_eq!(parse_document(""), Node::empty_object());
        assert_eq!(parse_document("[ 1 2 3 ]"), Node::empty_object());
    }

    #[test]
    fn test_nesting_limit_keeps_partial_tree() {
        let mut text = String::from("{ first = 1 deep = ");
        for _ in 0..(MAX_NESTING_DEPTH + 10) {
            text.push_str("{ x = ");
        }
        text.push_str("1 }");

        let root = parse_document(&text);
        assert_eq!(root.get("first"), Some(&scalar("1")));

        let mut depth = 0;
        let mut current = root.get("deep");
        while let Some(node) = current {
            depth += 1;
            current = node.get("x");
        }
        assert!(depth <= MAX_NESTING_DEPTH);
    }
}
