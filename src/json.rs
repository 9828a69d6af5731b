//! Json value to Document

use crate::document::{Array, Document, Node, Object, Root};
use crate::parse::{ParseError, ParseErrorKind, ParseOptions, ParseResult};
use serde_json::{Map, Value};

impl TryFrom<&serde_json::Value> for Document {
    type Error = ParseError;

    /// Builds a document from an already parsed json value. Scalars keep their text form and
    /// number digits are kept exactly, but serde_json normalizes exponents, so `1e10` is stored as
    /// `1e+10` and `1E5` as `1e+5`.
    #[inline]
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        let mut builder = TreeBuilder::new(ParseOptions::default().max_depth());
        let root = match value {
            Value::Object(val) => Root::Object(builder.build_object(None, val)?),
            Value::Array(val) => Root::Array(builder.build_array(None, val)?),
            _ => return Err(ParseError::new(ParseErrorKind::RootNotContainer, 0)),
        };
        Ok(Document::new(root))
    }
}

struct TreeBuilder {
    depth: usize,
    max_depth: usize,
}

impl TreeBuilder {
    #[inline]
    fn new(max_depth: usize) -> Self {
        Self { depth: 0, max_depth }
    }

    fn build_object(&mut self, name: Option<&str>, object: &Map<String, serde_json::Value>) -> ParseResult<Object> {
        self.enter()?;
        let mut res = Object::new(name.map(str::to_owned));
        for (key, value) in object {
            let node = self.build_node(Some(key), value)?;
            push(res.members_mut(), (key.clone(), node))?;
        }
        self.depth -= 1;
        Ok(res)
    }

    fn build_array(&mut self, name: Option<&str>, array: &[serde_json::Value]) -> ParseResult<Array> {
        self.enter()?;
        let mut res = Array::new(name.map(str::to_owned));
        for value in array {
            let node = self.build_node(name, value)?;
            push(res.values_mut(), node)?;
        }
        self.depth -= 1;
        Ok(res)
    }

    #[inline]
    fn build_node(&mut self, name: Option<&str>, value: &serde_json::Value) -> ParseResult<Node> {
        let node = match value {
            Value::Null => Node::Text("null".to_owned()),
            Value::Bool(val) => Node::Text(val.to_string()),
            Value::Number(val) => Node::Text(val.to_string()),
            Value::String(val) => Node::Text(val.clone()),
            Value::Array(val) => Node::Array(self.build_array(name, val)?),
            Value::Object(val) => Node::Object(self.build_object(name, val)?),
        };
        Ok(node)
    }

    #[inline]
    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::new(ParseErrorKind::DepthLimitExceeded, 0));
        }
        Ok(())
    }
}

#[inline]
fn push<T>(values: &mut Vec<T>, value: T) -> ParseResult<()> {
    values
        .try_reserve(1)
        .map_err(|e| ParseError::new(ParseErrorKind::TryReserveError(e), 0))?;
    values.push(value);
    Ok(())
}
