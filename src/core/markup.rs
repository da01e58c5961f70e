// src/core/markup.rs
//
// Node tree and fragment parser for portal markup.
//
// The extraction specs work on a parsed tree rather than raw text: the
// timetable encodes its data positionally (cell N of row, child N of cell),
// so the specs need real child lists to index into. The parser is
// scraper-grade, not a browser: it accepts the markup the portal actually
// serves (unquoted attributes, void tags, comments, a few entities) and
// reports anything structurally broken as a `MarkupError`.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use super::sanitize::{decode_entities, normalize_ws};

/// One node of the parsed tree. Only elements carry children; text nodes
/// are leaves holding page content.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Tag name, lowercased.
    pub tag: String,
    /// Attribute keys lowercased; values entity-decoded.
    pub attributes: HashMap<String, String>,
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    /// Entity-decoded, whitespace-collapsed content.
    pub content: String,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// The i-th child, or None for text nodes and out-of-range indices.
    pub fn child(&self, i: usize) -> Option<&Node> {
        self.as_element()?.children.get(i)
    }

    /// Text content, or None for element nodes.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(&text.content),
            Node::Element(_) => None,
        }
    }

    /// Follow a chain of child indices, giving up on the first absent step.
    pub fn descend(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self;
        for &i in path {
            node = node.child(i)?;
        }
        Some(node)
    }

    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|element| element.tag.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MarkupError {
    /// Input ended inside an unterminated tag, comment, or element.
    UnexpectedEof,
    /// A closing tag didn't match the innermost open element
    /// (`expected` is None when nothing was open at all).
    MismatchedClose {
        expected: Option<String>,
        found: String,
    },
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupError::UnexpectedEof => {
                write!(f, "markup ended inside an unterminated construct")
            }
            MarkupError::MismatchedClose { expected: Some(tag), found } => {
                write!(f, "closing tag </{found}> where </{tag}> was expected")
            }
            MarkupError::MismatchedClose { expected: None, found } => {
                write!(f, "closing tag </{found}> with no matching opener")
            }
        }
    }
}

impl Error for MarkupError {}

/// Elements that never have children or closing tags.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Parse a markup fragment (e.g. the inner content of a tbody) into an
/// ordered node sequence. Whitespace-only text is dropped, so child indices
/// count markup the page author can see.
pub fn parse_fragment(input: &str) -> Result<Vec<Node>, MarkupError> {
    let mut parser = Parser { input, pos: 0 };
    let (nodes, stray_close) = parser.parse_nodes()?;
    match stray_close {
        Some(found) => Err(MarkupError::MismatchedClose { expected: None, found }),
        None => Ok(nodes),
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn starts_with(&self, pat: &str) -> bool {
        self.input[self.pos..].starts_with(pat)
    }

    /// Does the '<' at `pos` open a tag, closer, or declaration
    /// (as opposed to being literal text)?
    fn construct_follows(&self) -> bool {
        match self.input.as_bytes().get(self.pos + 1) {
            Some(b'/') | Some(b'!') => true,
            Some(c) => c.is_ascii_alphabetic(),
            None => false,
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Sibling nodes until end of input or a closing tag. A closing tag is
    /// consumed and its name handed back for the caller to match.
    fn parse_nodes(&mut self) -> Result<(Vec<Node>, Option<String>), MarkupError> {
        let mut nodes = Vec::new();
        while !self.eof() {
            if self.starts_with("</") {
                return Ok((nodes, Some(self.read_close_tag()?)));
            }
            if self.starts_with("<!--") {
                self.skip_comment()?;
            } else if self.starts_with("<!") {
                self.skip_declaration()?;
            } else if self.peek() == Some(b'<') && self.construct_follows() {
                nodes.push(self.parse_element()?);
            } else if let Some(content) = self.read_text() {
                nodes.push(Node::Text(Text { content }));
            }
        }
        Ok((nodes, None))
    }

    fn parse_element(&mut self) -> Result<Node, MarkupError> {
        self.pos += 1; // '<'
        let (tag, attributes, self_closing) = self.read_open_tag()?;
        let mut element = Element { tag, attributes, children: Vec::new() };

        if self_closing || VOID_TAGS.contains(&element.tag.as_str()) {
            return Ok(Node::Element(element));
        }

        let (children, close) = self.parse_nodes()?;
        element.children = children;
        match close {
            Some(name) if name == element.tag => Ok(Node::Element(element)),
            Some(name) => Err(MarkupError::MismatchedClose {
                expected: Some(element.tag),
                found: name,
            }),
            None => Err(MarkupError::UnexpectedEof),
        }
    }

    /// Tag name, attributes and self-closing flag. `pos` starts on the first
    /// name character and ends just past '>'.
    fn read_open_tag(&mut self) -> Result<(String, HashMap<String, String>, bool), MarkupError> {
        let tag = self.read_name();
        let mut attributes = HashMap::new();
        let mut self_closing = false;
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(MarkupError::UnexpectedEof),
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                    self_closing = true;
                }
                Some(_) => {
                    let (key, value) = self.read_attribute();
                    attributes.entry(key).or_insert(value);
                }
            }
        }
        Ok((tag, attributes, self_closing))
    }

    fn read_close_tag(&mut self) -> Result<String, MarkupError> {
        self.pos += 2; // "</"
        let name = self.read_name();
        self.skip_ws();
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == b'>' {
                return Ok(name);
            }
        }
        Err(MarkupError::UnexpectedEof)
    }

    /// ASCII tag/attribute name, lowercased. Stops at the first delimiter.
    fn read_name(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'-') {
            self.pos += 1;
        }
        self.input[start..self.pos].to_ascii_lowercase()
    }

    /// One `key`, `key=value`, `key="value"` or `key='value'` attribute.
    fn read_attribute(&mut self) -> (String, String) {
        let key_start = self.pos;
        while let Some(c) = self.peek() {
            if c == b'=' || c == b'>' || c == b'/' || c.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        let key = self.input[key_start..self.pos].to_ascii_lowercase();
        if self.peek() != Some(b'=') {
            return (key, s!());
        }
        self.pos += 1; // '='

        let value = match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c != quote) {
                    self.pos += 1;
                }
                let raw = &self.input[start..self.pos];
                if !self.eof() {
                    self.pos += 1; // closing quote
                }
                raw
            }
            _ => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c != b'>' && !c.is_ascii_whitespace()) {
                    self.pos += 1;
                }
                &self.input[start..self.pos]
            }
        };
        (key, decode_entities(value))
    }

    /// Literal text up to the next tag-like '<'. None if it collapses to
    /// nothing (inter-tag whitespace).
    fn read_text(&mut self) -> Option<String> {
        let start = self.pos;
        loop {
            match self.peek() {
                None => break,
                Some(b'<') if self.pos > start && self.construct_follows() => break,
                Some(_) => self.pos += 1,
            }
        }
        let content = normalize_ws(&decode_entities(&self.input[start..self.pos]));
        if content.is_empty() { None } else { Some(content) }
    }

    fn skip_comment(&mut self) -> Result<(), MarkupError> {
        match self.input[self.pos..].find("-->") {
            Some(off) => {
                self.pos += off + 3;
                Ok(())
            }
            None => Err(MarkupError::UnexpectedEof),
        }
    }

    fn skip_declaration(&mut self) -> Result<(), MarkupError> {
        match self.input[self.pos..].find('>') {
            Some(off) => {
                self.pos += off + 1;
                Ok(())
            }
            None => Err(MarkupError::UnexpectedEof),
        }
    }
}
