//! Visitor driven unmarshalling.

use crate::decoder::DecodeResult;
use crate::document::{Array, Document, Node, Object, Root};
use crate::Decoder;

/// Capabilities an object implements to be populated by [`Decoder::unmarshal`].
///
/// Every method has a no-op default, so a type only overrides what it cares about.
///
/// Child visitors are owned by the parent: [`unmarshal_for_field`](Self::unmarshal_for_field)
/// hands out a borrow into storage the parent owns (a field, a slot in a list) and the walk never
/// keeps it past the call that fills it.
pub trait Unmarshal {
    /// Consumes one scalar member, or one scalar element of an array, given as raw text. Returns
    /// whether the field was recognized.
    #[inline]
    fn set_field(&mut self, _name: &str, _value: &str) -> bool {
        false
    }

    /// Returns the visitor to fill from the nested object or array named `name`, `None` skips it.
    ///
    /// For array elements this is called once per element and must hand out a fresh child each
    /// time, otherwise every element lands in the same child.
    #[inline]
    fn unmarshal_for_field(&mut self, _name: &str) -> Option<&mut dyn Unmarshal> {
        None
    }

    /// Called after the child returned for an array element has been filled.
    ///
    /// The child is not passed back: it already lives in storage `self` owns, handed out by the
    /// preceding [`unmarshal_for_field`](Self::unmarshal_for_field) call, so `self` can reach it
    /// directly (for a list, its last entry).
    #[inline]
    fn push_to_array(&mut self, _name: &str) -> bool {
        false
    }
}

/// Collects the object and array elements of an array into fresh `T`s. `name` is ignored and
/// scalar elements are dropped, `set_field` keeps its no-op default.
impl<T: Unmarshal + Default> Unmarshal for Vec<T> {
    #[inline]
    fn unmarshal_for_field(&mut self, _name: &str) -> Option<&mut dyn Unmarshal> {
        self.push(T::default());
        self.last_mut().map(|child| child as &mut dyn Unmarshal)
    }

    #[inline]
    fn push_to_array(&mut self, _name: &str) -> bool {
        true
    }
}

impl Document {
    /// Walks the whole document and populates `visitor` from it.
    #[inline]
    pub fn unmarshal<V: Unmarshal + ?Sized>(&self, visitor: &mut V) {
        unmarshal_root(visitor, self.root())
    }
}

impl Decoder<'_> {
    /// Walks the whole document and populates `visitor` from it. The cursor is not used or moved.
    #[inline]
    pub fn unmarshal<V: Unmarshal + ?Sized>(&self, visitor: &mut V) -> DecodeResult<()> {
        unmarshal_root(visitor, self.root()?);
        Ok(())
    }
}

#[inline]
fn unmarshal_root<V: Unmarshal + ?Sized>(visitor: &mut V, root: &Root) {
    match root {
        Root::Object(object) => unmarshal_object(visitor, object),
        Root::Array(array) => unmarshal_array(visitor, array),
    }
}

/// Members are visited in declaration order. Nested objects go to a child visitor, nested arrays
/// to `visitor` itself since the array carries the field name.
fn unmarshal_object<V: Unmarshal + ?Sized>(visitor: &mut V, object: &Object) {
    for (name, value) in object {
        match value {
            Node::Text(text) => set_field(visitor, name, text),
            Node::Object(child) => match visitor.unmarshal_for_field(name) {
                Some(child_visitor) => unmarshal_object(child_visitor, child),
                None => tracing::trace!(field = name, "object skipped"),
            },
            Node::Array(array) => unmarshal_array(visitor, array),
        }
    }
}

/// Scalars are handed to `visitor` one at a time under the array's name, containers each get a
/// fresh child that is pushed back once filled.
fn unmarshal_array<V: Unmarshal + ?Sized>(visitor: &mut V, array: &Array) {
    let name = array.name().unwrap_or_default();
    for value in array {
        match value {
            Node::Text(text) => set_field(visitor, name, text),
            Node::Object(child) => match visitor.unmarshal_for_field(name) {
                Some(child_visitor) => {
                    unmarshal_object(child_visitor, child);
                    visitor.push_to_array(name);
                }
                None => tracing::trace!(field = name, "array element skipped"),
            },
            Node::Array(child) => match visitor.unmarshal_for_field(name) {
                Some(child_visitor) => {
                    unmarshal_array(child_visitor, child);
                    visitor.push_to_array(name);
                }
                None => tracing::trace!(field = name, "array element skipped"),
            },
        }
    }
}

#[inline]
fn set_field<V: Unmarshal + ?Sized>(visitor: &mut V, name: &str, text: &str) {
    if !visitor.set_field(name, text) {
        tracing::trace!(field = name, "field not recognized");
    }
}
