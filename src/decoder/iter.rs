//! Positional cursor over an array.

use crate::convert::FromText;
use crate::document::{Array, Node};
use crate::Number;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A positional cursor over one array's elements, handed out by
/// [`Decoder::begin_array`](crate::Decoder::begin_array).
///
/// The decoder keeps a handle on the same position, so moving the cursor also moves the element
/// that [`Decoder::begin_object`](crate::Decoder::begin_object) descends into while the array
/// scope is open.
///
/// A cursor created for a missing array is always at its end.
pub struct ArrayIter<'a> {
    array: Option<&'a Array>,
    position: Rc<Cell<usize>>,
}

impl<'a> ArrayIter<'a> {
    #[inline]
    pub(crate) fn new(array: &'a Array) -> Self {
        Self {
            array: Some(array),
            position: Rc::new(Cell::new(0)),
        }
    }

    #[inline]
    pub(crate) fn ended() -> Self {
        Self {
            array: None,
            position: Rc::new(Cell::new(0)),
        }
    }

    /// Creates a second handle sharing this cursor's position.
    #[inline]
    pub(crate) fn share(&self) -> Self {
        Self {
            array: self.array,
            position: Rc::clone(&self.position),
        }
    }

    /// Moves to the next element. There is no bounds check, use [`is_end`](Self::is_end).
    #[inline]
    pub fn advance(&mut self) {
        self.position.set(self.position.get().wrapping_add(1));
    }

    /// Moves to the previous element. Moving before the first element leaves the cursor on no
    /// element at all.
    #[inline]
    pub fn retreat(&mut self) {
        self.position.set(self.position.get().wrapping_sub(1));
    }

    /// Returns true when the cursor is one past the last element, or if there is no array.
    #[inline]
    pub fn is_end(&self) -> bool {
        match self.array {
            Some(array) => self.position.get() == array.len(),
            None => true,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position.get()
    }

    /// Returns the array this cursor walks, `None` for a cursor over a missing array.
    #[inline]
    pub fn array(&self) -> Option<&'a Array> {
        self.array
    }

    /// Returns the element under the cursor.
    #[inline]
    pub fn current(&self) -> Option<&'a Node> {
        self.array.and_then(|array| array.get(self.position.get()))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.current().map_or(false, Node::is_array)
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        self.current().map_or(false, Node::is_object)
    }

    /// Converts the current element's raw text, returns `None` if there is no current element,
    /// it is not a scalar, or the conversion fails.
    #[inline]
    pub fn read<T: FromText<'a>>(&self) -> Option<T> {
        self.current().and_then(Node::as_text).and_then(T::from_text)
    }

    #[inline]
    pub fn read_bool(&self) -> Option<bool> {
        self.read()
    }

    #[inline]
    pub fn read_int(&self) -> Option<i32> {
        self.read()
    }

    #[inline]
    pub fn read_int64(&self) -> Option<i64> {
        self.read()
    }

    #[inline]
    pub fn read_float(&self) -> Option<f32> {
        self.read()
    }

    #[inline]
    pub fn read_double(&self) -> Option<f64> {
        self.read()
    }

    #[inline]
    pub fn read_number(&self) -> Option<Number> {
        self.read()
    }

    #[inline]
    pub fn read_text(&self) -> Option<&'a str> {
        self.read()
    }
}

/// Cursors are equal when they stand on the same position. Comparing cursors over different
/// arrays is meaningless.
impl PartialEq for ArrayIter<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.position.get() == other.position.get()
    }
}

impl fmt::Debug for ArrayIter<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayIter")
            .field("len", &self.array.map(Array::len))
            .field("position", &self.position.get())
            .finish()
    }
}
