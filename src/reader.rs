//! Pull based byte sources.

use crate::parse::{ParseError, ParseErrorKind, ParseResult};

const READ_CHUNK_SIZE: usize = 4096;

/// A pull based source of bytes.
pub trait Reader {
    /// Copies up to `out.len()` bytes into `out` and returns how many were copied. Fewer bytes are
    /// copied at the end of the data, never more than what remains.
    fn read(&mut self, out: &mut [u8]) -> usize;

    /// Returns true while unread bytes remain.
    fn available(&self) -> bool;
}

/// A [`Reader`] over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct StringReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> StringReader<'a> {
    #[inline]
    pub fn new<B: AsRef<[u8]> + ?Sized>(data: &'a B) -> Self {
        Self {
            data: data.as_ref(),
            pos: 0,
        }
    }

    /// Returns the number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl Reader for StringReader<'_> {
    #[inline]
    fn read(&mut self, out: &mut [u8]) -> usize {
        let count = out.len().min(self.remaining());
        out[..count].copy_from_slice(&self.data[self.pos..self.pos + count]);
        self.pos += count;
        count
    }

    #[inline]
    fn available(&self) -> bool {
        self.pos < self.data.len()
    }
}

/// Drains `reader` into a string.
pub(crate) fn read_all<R: Reader + ?Sized>(reader: &mut R) -> ParseResult<String> {
    let mut bytes = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    while reader.available() {
        let count = reader.read(&mut chunk);
        if count == 0 {
            break;
        }
        bytes
            .try_reserve(count)
            .map_err(|e| ParseError::new(ParseErrorKind::TryReserveError(e), bytes.len()))?;
        bytes.extend_from_slice(&chunk[..count]);
    }

    String::from_utf8(bytes).map_err(|e| {
        let pos = e.utf8_error().valid_up_to();
        ParseError::new(ParseErrorKind::InvalidUtf8, pos)
    })
}
