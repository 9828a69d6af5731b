//! Text document parsing, cursor navigation and visitor driven unmarshalling in Rust.
//!
//! A [`Document`] is parsed once and never changes. It can then be read two ways: with the
//! imperative cursor of a [`Decoder`], entering and leaving objects and arrays by name, or in one
//! call with [`Decoder::unmarshal`], which walks the whole tree and fills any type implementing
//! [`Unmarshal`].
//!
//! ## Optional features
//!
//! ### `serde`
//!
//! When this optional dependency is enabled, `Document` implements the `serde::Serialize` and
//! `serde::Deserialize` traits.
//!
//! ## Text format
//!
//! ```BNF
//! document ::= ws (object | array) ws
//!
//! value ::=
//!     object |
//!     array |
//!     string |
//!     number |
//!     'true' |
//!     'false' |
//!     'null'
//!
//! object ::= '{' ws '}' | '{' member (',' member)* '}'
//! member ::= ws string ws ':' ws value ws
//!
//! array ::= '[' ws ']' | '[' element (',' element)* ']'
//! element ::= ws value ws
//!
//! string ::=
//!     '"' (char | escape)* '"' |
//!     "'" (char | escape | "\'")* "'"     // only if single quotes are enabled
//!
//! escape ::= '\' ('"' | '\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u' hex hex hex hex)
//!
//! number ::= '-'? ('0' | [1-9] [0-9]*) ('.' [0-9]+)? (('e' | 'E') ('+' | '-')? [0-9]+)?
//!
//! ws ::= (' ' | '\t' | '\n' | '\r' | '\x0C')*
//! ```
//!
//! Every scalar is stored as its literal text (string contents are unescaped) and only converted
//! when it is read, so `1`, `"1"` and `'1'` all read back as the integer `1`.
//!
//! ## Usage
//!
//! ### `Document`
//!
//! ```rust
//! use textdoc::{Document, Node};
//!
//! let doc = Document::load(r#"{"num": 1, "string": "value", "bool": true}"#).unwrap();
//! let object = doc.object().unwrap();
//! assert!(object.contains_key("num"));
//! assert_eq!(object.get("string"), Some(&Node::Text("value".to_string())));
//! assert_eq!(object.text("bool"), Some("true"));
//!
//! assert!(Document::load("[1,2,3,4,]").is_none());
//! ```
//!
//! ### `Unmarshal`
//!
//! ```rust
//! use textdoc::{Decoder, Document, Unmarshal};
//!
//! #[derive(Default)]
//! struct Item {
//!     field: i32,
//!     child: Option<Box<Item>>,
//! }
//!
//! impl Unmarshal for Item {
//!     fn set_field(&mut self, name: &str, value: &str) -> bool {
//!         match name {
//!             "field" => value.parse().map(|v| self.field = v).is_ok(),
//!             _ => false,
//!         }
//!     }
//!
//!     fn unmarshal_for_field(&mut self, name: &str) -> Option<&mut dyn Unmarshal> {
//!         match name {
//!             "Object" => Some(&mut **self.child.insert(Box::default())),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let doc = Document::parse(r#"{"field": 123, "Object": {"field": 345}}"#).unwrap();
//! let mut item = Item::default();
//! Decoder::new(&doc).unmarshal(&mut item).unwrap();
//! assert_eq!(item.field, 123);
//! assert_eq!(item.child.unwrap().field, 345);
//! ```
//!

#![cfg_attr(docsrs, feature(doc_cfg))]

mod convert;
mod decoder;
mod document;
mod json;
mod node_kind;
mod parse;
mod reader;
mod unmarshal;

#[cfg(feature = "serde")]
mod serde;

pub use self::{
    convert::FromText,
    decoder::{ArrayIter, DecodeError, DecodeResult, Decoder},
    document::{Array, Document, ElementIter, MemberIter, Node, Object, Root},
    node_kind::NodeKind,
    parse::{ParseError, ParseErrorKind, ParseOptions, ParseResult},
    reader::{Reader, StringReader},
    unmarshal::Unmarshal,
};
pub use decimal_rs::Decimal as Number;
