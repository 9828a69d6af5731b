//! Node kind.

use std::fmt::{Display, Formatter};

/// The kind of a parsed [`Node`](crate::Node).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum NodeKind {
    Object = 1,
    Array = 2,
    Text = 3,
}

impl Display for NodeKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            NodeKind::Object => write!(f, "object"),
            NodeKind::Array => write!(f, "array"),
            NodeKind::Text => write!(f, "text"),
        }
    }
}
