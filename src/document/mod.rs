//! Parsed document tree.

mod array;
mod object;

pub use crate::document::array::{Array, ElementIter};
pub use crate::document::object::{MemberIter, Object};

use crate::parse::{ParseOptions, ParseResult, Parser};
use crate::reader::{read_all, Reader};
use crate::NodeKind;

/// One parsed value.
///
/// Every scalar (string, number, `true`, `false`, `null`) is kept as its literal text, conversion
/// happens when the value is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Object(Object),
    Array(Array),
}

impl Node {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text(_) => NodeKind::Text,
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
        }
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// If the node is a scalar, returns its raw text.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }
}

/// The root of a document, which is always a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Root {
    Object(Object),
    Array(Array),
}

impl Root {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            Root::Object(_) => NodeKind::Object,
            Root::Array(_) => NodeKind::Array,
        }
    }
}

/// An immutable parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Root,
}

impl Document {
    #[inline]
    pub(crate) fn new(root: Root) -> Self {
        Document { root }
    }

    /// Parses `text` with the default options.
    #[inline]
    pub fn parse<T: AsRef<str>>(text: T) -> ParseResult<Self> {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parses `text` with the given options.
    #[inline]
    pub fn parse_with<T: AsRef<str>>(text: T, options: &ParseOptions) -> ParseResult<Self> {
        Parser::new(text.as_ref(), options).parse()
    }

    /// Parses `text`, returning `None` if it is not a well-formed document.
    #[inline]
    pub fn load<T: AsRef<str>>(text: T) -> Option<Self> {
        Self::parse(text).ok()
    }

    /// Drains `reader` and parses everything it produced.
    #[inline]
    pub fn from_reader<R: Reader + ?Sized>(reader: &mut R) -> ParseResult<Self> {
        Self::from_reader_with(reader, &ParseOptions::default())
    }

    #[inline]
    pub fn from_reader_with<R: Reader + ?Sized>(reader: &mut R, options: &ParseOptions) -> ParseResult<Self> {
        let text = read_all(reader)?;
        Self::parse_with(text, options)
    }

    #[inline]
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// If the root is an `Object`, returns it.
    #[inline]
    pub fn object(&self) -> Option<&Object> {
        match &self.root {
            Root::Object(object) => Some(object),
            Root::Array(_) => None,
        }
    }

    /// If the root is an `Array`, returns it.
    #[inline]
    pub fn array(&self) -> Option<&Array> {
        match &self.root {
            Root::Array(array) => Some(array),
            Root::Object(_) => None,
        }
    }
}
