//! Conversions from raw scalar text.

use crate::Number;
use std::str::FromStr;

/// Returns the length of the number literal at the start of `bytes`, or `None` if `bytes` does not
/// start with a complete one.
///
/// ```BNF
/// number ::= '-'? int frac? exp?
/// int ::= '0' | [1-9] [0-9]*
/// frac ::= '.' [0-9]+
/// exp ::= ('e' | 'E') ('+' | '-')? [0-9]+
/// ```
pub(crate) fn scan_number(bytes: &[u8]) -> Option<usize> {
    let digits_from = |pos: usize| bytes[pos.min(bytes.len())..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut pos = 0;
    if bytes.first() == Some(&b'-') {
        pos += 1;
    }

    match bytes.get(pos) {
        Some(b'0') => pos += 1,
        Some(b'1'..=b'9') => pos += digits_from(pos),
        _ => return None,
    }

    if bytes.get(pos) == Some(&b'.') {
        let count = digits_from(pos + 1);
        if count == 0 {
            return None;
        }
        pos += 1 + count;
    }

    if let Some(b'e') | Some(b'E') = bytes.get(pos) {
        pos += 1;
        if let Some(b'+') | Some(b'-') = bytes.get(pos) {
            pos += 1;
        }
        let count = digits_from(pos);
        if count == 0 {
            return None;
        }
        pos += count;
    }

    Some(pos)
}

/// Returns true if `text` is exactly one number literal.
#[inline]
pub(crate) fn is_number(text: &str) -> bool {
    scan_number(text.as_bytes()) == Some(text.len())
}

/// A type that can be read from the raw text of a scalar.
pub trait FromText<'a>: Sized {
    fn from_text(text: &'a str) -> Option<Self>;
}

impl<'a> FromText<'a> for bool {
    #[inline]
    fn from_text(text: &'a str) -> Option<Self> {
        match text {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

macro_rules! impl_from_text_for_integer {
    ($($ty:ty),*) => {
        $(
            impl<'a> FromText<'a> for $ty {
                #[inline]
                fn from_text(text: &'a str) -> Option<Self> {
                    if !is_number(text) {
                        return None;
                    }
                    <$ty>::from_str(text).ok()
                }
            }
        )*
    };
}

impl_from_text_for_integer!(i32, i64, u32, u64);

macro_rules! impl_from_text_for_float {
    ($($ty:ty),*) => {
        $(
            impl<'a> FromText<'a> for $ty {
                #[inline]
                fn from_text(text: &'a str) -> Option<Self> {
                    if !is_number(text) {
                        return None;
                    }
                    <$ty>::from_str(text).ok().filter(|v| v.is_finite())
                }
            }
        )*
    };
}

impl_from_text_for_float!(f32, f64);

impl<'a> FromText<'a> for Number {
    #[inline]
    fn from_text(text: &'a str) -> Option<Self> {
        if !is_number(text) {
            return None;
        }
        Number::from_str(text).ok()
    }
}

impl<'a> FromText<'a> for &'a str {
    #[inline]
    fn from_text(text: &'a str) -> Option<Self> {
        Some(text)
    }
}

impl<'a> FromText<'a> for String {
    #[inline]
    fn from_text(text: &'a str) -> Option<Self> {
        Some(text.to_owned())
    }
}
