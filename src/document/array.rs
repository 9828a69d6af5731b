//! Array manipulation.

use crate::document::{Node, Object};
use std::slice;

/// An ordered list of unnamed elements.
///
/// Elements have no name of their own, so the array keeps the name of the field it was declared
/// under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Array {
    name: Option<String>,
    values: Vec<Node>,
}

impl Array {
    #[inline]
    pub(crate) fn new(name: Option<String>) -> Self {
        Self {
            name,
            values: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut Vec<Node> {
        &mut self.values
    }

    /// Returns the name of the field this array was declared under, the root array has none.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the number of elements in the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets the element at the given index, returns `None` when the index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.values.get(index)
    }

    #[inline]
    pub fn text(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Node::as_text)
    }

    #[inline]
    pub fn object(&self, index: usize) -> Option<&Object> {
        self.get(index).and_then(Node::as_object)
    }

    #[inline]
    pub fn array(&self, index: usize) -> Option<&Array> {
        self.get(index).and_then(Node::as_array)
    }

    /// Gets an iterator over the elements of the array.
    #[inline]
    pub fn iter(&self) -> ElementIter {
        ElementIter {
            inner: self.values.iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Node;
    type IntoIter = ElementIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the array's elements.
pub struct ElementIter<'a> {
    inner: slice::Iter<'a, Node>,
}

impl<'a> Iterator for ElementIter<'a> {
    type Item = &'a Node;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ElementIter<'_> {}
