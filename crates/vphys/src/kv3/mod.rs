//! KV3 text documents
//!
//! Reads the textual rendering of a physics block: objects, arrays, quoted
//! strings, bare tokens and `#[ .. ]` byte-blob literals. Anything else the
//! full KV3 format supports is out of reach here.
//!
//! Parsing never fails. Malformed input produces a partial tree, and queries
//! report missing data as `None` so callers can use absence as the end of an
//! index scan.

pub mod node;
pub mod lexer;
pub mod parser;
pub mod path;
pub mod document;

pub use node::Node;
pub use lexer::{Token, tokenize, strip_comments_and_header};
pub use parser::parse_document;
pub use path::{PathExpr, Segment};
pub use document::Document;
