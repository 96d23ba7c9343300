//! KV3 tokenizer
//!
//! Works on text that has already been through [`strip_comments_and_header`].
//! The characters `{ } [ ] = ,` are always tokens of their own; whitespace
//! only separates. Quoted strings and `#[ .. ]` blobs are read whole.

use std::iter::Peekable;
use std::str::Chars;

/// A lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `=`
    Equals,
    /// `,`
    Comma,
    /// Contents of a terminated `"..."` string, escapes left as written
    Quoted(String),
    /// Interior of a `#[ .. ]` literal
    Blob(String),
    /// Any other run of non-separator characters
    Bare(String),
}

impl Token {
    /// Text usable as an object key
    pub fn key_text(&self) -> Option<&str> {
        match self {
            Self::Quoted(text) | Self::Blob(text) => Some(text),
            Self::Bare(text) => Some(text.trim_matches('"')),
            _ => None,
        }
    }
}

/// Drop the metadata header and `//` comments
///
/// Every line before the first one whose trimmed text starts with `{` is
/// discarded. The KV3 header (`<!-- kv3 encoding:text:version{..} -->`)
/// contains braces itself, so this has to work line by line.
pub fn strip_comments_and_header(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut in_body = false;

    for line in content.split('\n') {
        let trimmed = line.trim();

        if !in_body {
            if !trimmed.starts_with('{') {
                continue;
            }
            in_body = true;
        } else if trimmed.starts_with("//") {
            continue;
        }

        let code = line.find("//").map_or(line, |at| &line[..at]);
        result.push_str(code);
        result.push('\n');
    }

    result
}

/// Split cleaned document text into tokens
pub fn tokenize(content: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pending = String::new();
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                flush_bare(&mut pending, &mut tokens);
                tokens.push(read_quoted(&mut chars));
            }
            '#' if chars.peek() == Some(&'[') => {
                flush_bare(&mut pending, &mut tokens);
                chars.next();
                tokens.push(read_blob(&mut chars));
            }
            '{' | '}' | '[' | ']' | '=' | ',' => {
                flush_bare(&mut pending, &mut tokens);
                tokens.push(match c {
                    '{' => Token::LBrace,
                    '}' => Token::RBrace,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    '=' => Token::Equals,
                    _ => Token::Comma,
                });
            }
            c if c.is_whitespace() => flush_bare(&mut pending, &mut tokens),
            _ => pending.push(c),
        }
    }

    flush_bare(&mut pending, &mut tokens);
    tokens
}

fn flush_bare(pending: &mut String, tokens: &mut Vec<Token>) {
    if !pending.is_empty() {
        tokens.push(Token::Bare(std::mem::take(pending)));
    }
}

/// Read up to a `"` that is not preceded by a backslash
///
/// An unterminated string becomes a bare token that keeps its opening quote.
fn read_quoted(chars: &mut Peekable<Chars<'_>>) -> Token {
    let mut text = String::new();
    let mut prev = '"';

    for c in chars.by_ref() {
        if c == '"' && prev != '\\' {
            return Token::Quoted(text);
        }
        text.push(c);
        prev = c;
    }

    Token::Bare(format!("\"{text}"))
}

/// Read up to the first `]`; the interior is not tokenized further
fn read_blob(chars: &mut Peekable<Chars<'_>>) -> Token {
    let mut text = String::new();

    for c in chars.by_ref() {
        if c == ']' {
            break;
        }
        text.push(c);
    }

    Token::Blob(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(text: &str) -> Token {
        Token::Bare(text.to_string())
    }

    #[test]
    fn test_punctuation_splits_bare_tokens() {
        let tokens = tokenize("{a=1,b=[x,y]}");
        assert_eq!(
            tokens,
            vec![
                Token::LBrace,
                bare("a"),
                Token::Equals,
                bare("1"),
                Token::Comma,
                bare("b"),
                Token::Equals,
                Token::LBracket,
                bare("x"),
                Token::Comma,
                bare("y"),
                Token::RBracket,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn test_quoted_string_keeps_spaces_and_escapes() {
        let tokens = tokenize(r#"name = "a \"b\" c""#);
        assert_eq!(
            tokens,
            vec![bare("name"), Token::Equals, Token::Quoted(r#"a \"b\" c"#.to_string())]
        );
    }

    #[test]
    fn test_empty_quoted_string() {
        assert_eq!(tokenize(r#""""#), vec![Token::Quoted(String::new())]);
    }

    #[test]
    fn test_blob_interior_is_verbatim() {
        let tokens = tokenize("data = #[ 00 0A\n ff ]");
        assert_eq!(
            tokens,
            vec![bare("data"), Token::Equals, Token::Blob(" 00 0A\n ff ".to_string())]
        );
    }

    #[test]
    fn test_hash_without_bracket_is_bare() {
        assert_eq!(tokenize("#tag"), vec![bare("#tag")]);
    }

    #[test]
    fn test_unterminated_string_becomes_bare() {
        assert_eq!(tokenize(r#"key = "open"#), vec![bare("key"), Token::Equals, bare("\"open")]);
    }

    #[test]
    fn test_header_and_comments_are_stripped() {
        let text = "<!-- kv3 encoding:text:version{e21c7f3c} format:generic:version{7412167c} -->\n\
                    {\n\
                    // full line comment\n\
                    a = 1 // trailing comment\n\
                    }\n";
        let cleaned = strip_comments_and_header(text);
        assert!(!cleaned.contains("kv3"));
        assert!(!cleaned.contains("comment"));
        assert_eq!(
            tokenize(&cleaned),
            vec![Token::LBrace, bare("a"), Token::Equals, bare("1"), Token::RBrace]
        );
    }

    #[test]
    fn test_no_opening_brace_yields_nothing() {
        assert!(strip_comments_and_header("just a header\nno body").is_empty());
    }

    #[test]
    fn test_key_text_trims_quotes() {
        assert_eq!(bare("\"m_key\"").key_text(), Some("m_key"));
        assert_eq!(Token::Quoted("m_key".to_string()).key_text(), Some("m_key"));
        assert_eq!(Token::Comma.key_text(), None);
    }
}
