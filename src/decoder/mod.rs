//! Imperative cursor over a parsed document.

mod iter;

pub use crate::decoder::iter::ArrayIter;

use crate::convert::FromText;
use crate::document::{Document, Object, Root};
use crate::{NodeKind, Number};
use std::error::Error;
use std::fmt;

/// Possible errors that can arise during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    InvalidDocument,
    ProtocolViolation { expected: NodeKind, found: Option<NodeKind> },
}

impl fmt::Display for DecodeError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidDocument => write!(f, "decoder has no valid document"),
            DecodeError::ProtocolViolation { expected, found: Some(found) } => {
                write!(f, "cannot end {} scope, innermost open scope is {}", expected, found)
            }
            DecodeError::ProtocolViolation { expected, found: None } => {
                write!(f, "cannot end {} scope, no scope is open", expected)
            }
        }
    }
}

impl Error for DecodeError {}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// One open scope. The innermost scope decides how the cursor navigates.
#[derive(Debug)]
enum Scope<'a> {
    Object(&'a Object),
    Array(ArrayIter<'a>),
}

impl Scope<'_> {
    #[inline]
    fn kind(&self) -> NodeKind {
        match self {
            Scope::Object(_) => NodeKind::Object,
            Scope::Array(_) => NodeKind::Array,
        }
    }
}

/// A decoding session over one document.
///
/// Objects and arrays are entered by name with [`begin_object`](Self::begin_object) and
/// [`begin_array`](Self::begin_array) and left with the matching `end_*` call. While an array
/// scope is innermost, `begin_object` descends into the element under the array cursor instead of
/// looking up a name.
///
/// All navigation and reads on a decoder without a valid document fail.
///
/// ```rust
/// use textdoc::{Decoder, Document};
///
/// let doc = Document::load(r#"{"name": "abc", "items": [{"id": 1}, {"id": 2}]}"#);
/// let mut decoder = Decoder::new(doc.as_ref());
/// assert!(decoder.is_valid());
///
/// assert!(decoder.begin_object("root"));
/// assert_eq!(decoder.read_text_field("name"), Some("abc"));
///
/// let mut ids = Vec::new();
/// let mut it = decoder.begin_array("items").unwrap();
/// while !it.is_end() {
///     assert!(decoder.begin_object(""));
///     ids.push(decoder.read_int_field("id").unwrap());
///     decoder.end_object().unwrap();
///     it.advance();
/// }
/// decoder.end_array().unwrap();
/// decoder.end_object().unwrap();
/// assert_eq!(ids, [1, 2]);
/// ```
///
/// Text and [`Reader`](crate::Reader)s are turned into a [`Document`] first. A reader that does
/// not yield a well-formed document gives an invalid decoder:
///
/// ```rust
/// use textdoc::{Decoder, Document, StringReader};
///
/// let mut reader = StringReader::new(r#"{"id": 1}"#);
/// let doc = Document::from_reader(&mut reader).ok();
/// let mut decoder = Decoder::new(doc.as_ref());
/// assert!(decoder.begin_object(""));
/// assert_eq!(decoder.read_int_field("id"), Some(1));
///
/// let mut reader = StringReader::new("[1,2,3,4,]");
/// let doc = Document::from_reader(&mut reader).ok();
/// assert!(!Decoder::new(doc.as_ref()).is_valid());
/// ```
#[derive(Debug)]
pub struct Decoder<'a> {
    doc: Option<&'a Document>,
    scopes: Vec<Scope<'a>>,
}

impl<'a> Decoder<'a> {
    /// Starts a session over `doc`. Passing `None` creates an invalid decoder.
    #[inline]
    pub fn new<D: Into<Option<&'a Document>>>(doc: D) -> Self {
        Self {
            doc: doc.into(),
            scopes: Vec::new(),
        }
    }

    /// Restarts the session over `doc`, dropping every open scope.
    #[inline]
    pub fn begin<D: Into<Option<&'a Document>>>(&mut self, doc: D) {
        self.doc = doc.into();
        self.scopes.clear();
    }

    /// Returns true if the decoder has a document to navigate.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.doc.is_some()
    }

    #[inline]
    pub fn document(&self) -> Option<&'a Document> {
        self.doc
    }

    /// Returns the number of open scopes.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Returns true if the innermost open scope is an array.
    #[inline]
    pub fn in_array(&self) -> bool {
        matches!(self.scopes.last(), Some(Scope::Array(_)))
    }

    /// Enters an object.
    ///
    /// - Inside an array scope, `name` is ignored and the element under the array cursor is
    ///   entered, if it is an object.
    /// - On the first call of a session, `name` is ignored and the root is entered, if it is an
    ///   object.
    /// - Otherwise the innermost object itself matches if it carries `name`, else its first member
    ///   named `name` that is an object.
    ///
    /// Returns false and leaves the scopes untouched when nothing matches.
    pub fn begin_object(&mut self, name: &str) -> bool {
        let doc = match self.doc {
            Some(doc) => doc,
            None => return false,
        };

        let found = match self.scopes.last() {
            Some(Scope::Array(iter)) => iter.current().and_then(|node| node.as_object()),
            _ => match self.top_object() {
                Some(object) => object.find_object(name),
                None => doc.object(),
            },
        };

        match found {
            Some(object) => {
                self.scopes.push(Scope::Object(object));
                true
            }
            None => false,
        }
    }

    /// Leaves the innermost object scope.
    pub fn end_object(&mut self) -> DecodeResult<()> {
        self.end_scope(NodeKind::Object)
    }

    /// Returns true if [`begin_object`](Self::begin_object) would find `name` in the innermost
    /// object. Always false inside an array scope or before any object is entered.
    #[inline]
    pub fn has_object(&self, name: &str) -> bool {
        if self.in_array() {
            return false;
        }
        self.top_object().map_or(false, |object| object.find_object(name).is_some())
    }

    /// Enters an array and returns a cursor over its elements.
    ///
    /// Before any object is entered the root is used, otherwise the member `name` of the innermost
    /// object. If that is not an array the scope is still opened, with a cursor that is already at
    /// its end, and must be closed with [`end_array`](Self::end_array) as usual.
    ///
    /// Returns `None` without opening a scope inside an array scope, nested arrays cannot be
    /// entered from there.
    pub fn begin_array(&mut self, name: &str) -> Option<ArrayIter<'a>> {
        let doc = self.doc?;
        if self.in_array() {
            return None;
        }

        let array = match self.top_object() {
            Some(object) => object.array(name),
            None => doc.array(),
        };
        let iter = match array {
            Some(array) => ArrayIter::new(array),
            None => ArrayIter::ended(),
        };

        self.scopes.push(Scope::Array(iter.share()));
        Some(iter)
    }

    /// Leaves the innermost array scope.
    pub fn end_array(&mut self) -> DecodeResult<()> {
        self.end_scope(NodeKind::Array)
    }

    /// Reads the member `name` of the innermost object and converts its raw text.
    ///
    /// Returns `None` if no object is open, the member does not exist or is not a scalar, or the
    /// conversion fails. Reading never changes the decoder.
    #[inline]
    pub fn read_field<T: FromText<'a>>(&self, name: &str) -> Option<T> {
        self.top_object()
            .and_then(|object| object.text(name))
            .and_then(T::from_text)
    }

    #[inline]
    pub fn read_bool_field(&self, name: &str) -> Option<bool> {
        self.read_field(name)
    }

    #[inline]
    pub fn read_int_field(&self, name: &str) -> Option<i32> {
        self.read_field(name)
    }

    #[inline]
    pub fn read_int64_field(&self, name: &str) -> Option<i64> {
        self.read_field(name)
    }

    #[inline]
    pub fn read_float_field(&self, name: &str) -> Option<f32> {
        self.read_field(name)
    }

    #[inline]
    pub fn read_double_field(&self, name: &str) -> Option<f64> {
        self.read_field(name)
    }

    #[inline]
    pub fn read_number_field(&self, name: &str) -> Option<Number> {
        self.read_field(name)
    }

    #[inline]
    pub fn read_text_field(&self, name: &str) -> Option<&'a str> {
        self.read_field(name)
    }
}

impl<'a> Decoder<'a> {
    /// The innermost open object, which may sit below the innermost array scope.
    #[inline]
    fn top_object(&self) -> Option<&'a Object> {
        self.scopes.iter().rev().find_map(|scope| match scope {
            Scope::Object(object) => Some(*object),
            Scope::Array(_) => None,
        })
    }

    #[inline]
    fn end_scope(&mut self, expected: NodeKind) -> DecodeResult<()> {
        let found = self.scopes.last().map(Scope::kind);
        if found == Some(expected) {
            self.scopes.pop();
            return Ok(());
        }

        tracing::warn!(%expected, ?found, "unbalanced end of scope");
        Err(DecodeError::ProtocolViolation { expected, found })
    }

    #[inline]
    pub(crate) fn root(&self) -> DecodeResult<&'a Root> {
        self.doc.map(Document::root).ok_or(DecodeError::InvalidDocument)
    }
}
