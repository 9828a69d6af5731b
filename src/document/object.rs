//! Object manipulation.

use crate::document::{Array, Node};
use std::slice;

/// An ordered list of named members.
///
/// Member names need not be unique. Lookups return the first match and iteration follows
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    name: Option<String>,
    members: Vec<(String, Node)>,
}

impl Object {
    #[inline]
    pub(crate) fn new(name: Option<String>) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn members_mut(&mut self) -> &mut Vec<(String, Node)> {
        &mut self.members
    }

    /// Returns the name this object was declared under, the root object has none.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the number of members in the object.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the object contains no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns true if the object contains a member with the specified name.
    #[inline]
    pub fn contains_key<T: AsRef<str>>(&self, name: T) -> bool {
        self.get(name).is_some()
    }

    /// Returns the value of the first member with the specified name, if it exists.
    #[inline]
    pub fn get<T: AsRef<str>>(&self, name: T) -> Option<&Node> {
        let name = name.as_ref();
        self.members.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    /// Gets the raw text of a scalar member, returns `None` if the member does not exist or is
    /// not a scalar.
    #[inline]
    pub fn text<T: AsRef<str>>(&self, name: T) -> Option<&str> {
        self.get(name).and_then(Node::as_text)
    }

    /// Gets a nested object member, returns `None` if the member does not exist or is not an object.
    #[inline]
    pub fn object<T: AsRef<str>>(&self, name: T) -> Option<&Object> {
        self.get(name).and_then(Node::as_object)
    }

    /// Gets an array member, returns `None` if the member does not exist or is not an array.
    #[inline]
    pub fn array<T: AsRef<str>>(&self, name: T) -> Option<&Array> {
        self.get(name).and_then(Node::as_array)
    }

    /// Finds the object a cursor descends into for `name`.
    ///
    /// The object itself matches first when it carries that name, otherwise the first member with
    /// that name whose value is an object.
    #[inline]
    pub(crate) fn find_object(&self, name: &str) -> Option<&Object> {
        if self.name() == Some(name) {
            return Some(self);
        }

        self.members.iter().find_map(|(key, value)| match value {
            Node::Object(object) if key == name => Some(object),
            _ => None,
        })
    }

    /// Gets an iterator over the members of the object.
    #[inline]
    pub fn iter(&self) -> MemberIter {
        MemberIter {
            inner: self.members.iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a str, &'a Node);
    type IntoIter = MemberIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the object's members.
pub struct MemberIter<'a> {
    inner: slice::Iter<'a, (String, Node)>,
}

impl<'a> Iterator for MemberIter<'a> {
    type Item = (&'a str, &'a Node);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for MemberIter<'_> {}
