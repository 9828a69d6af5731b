//! Document parser.

use crate::convert::scan_number;
use crate::document::{Array, Document, Node, Object, Root};
use std::collections::TryReserveError;
use std::error::Error;
use std::fmt::{Display, Formatter};

const BEGIN_OBJECT: u8 = b'{';
const END_OBJECT: u8 = b'}';
const BEGIN_ARRAY: u8 = b'[';
const END_ARRAY: u8 = b']';
const COLON: u8 = b':';
const COMMA: u8 = b',';
const DOUBLE_QUOTE: u8 = b'"';
const SINGLE_QUOTE: u8 = b'\'';
const BACKSLASH: u8 = b'\\';
const MINUS: u8 = b'-';
const CTRL_CHAR_LEN: usize = 1;
const HEX_ESCAPE_LEN: usize = 4;

const TRUE: &[u8] = b"true";
const FALSE: &[u8] = b"false";
const NULL: &[u8] = b"null";
const UNICODE_ESCAPE: &[u8] = b"\\u";

const DEFAULT_MAX_DEPTH: usize = 128;

/// Options controlling how text is parsed into a [`Document`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: usize,
    single_quotes: bool,
}

impl Default for ParseOptions {
    #[inline]
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            single_quotes: true,
        }
    }
}

impl ParseOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deepest container nesting accepted. Deeper documents are rejected with
    /// [`ParseErrorKind::DepthLimitExceeded`].
    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether strings and names may be enclosed in single quotes.
    #[inline]
    pub fn with_single_quotes(mut self, single_quotes: bool) -> Self {
        self.single_quotes = single_quotes;
        self
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn single_quotes(&self) -> bool {
        self.single_quotes
    }
}

/// This type represents error that can arise during parsing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    pos: usize,
}

impl ParseError {
    #[inline]
    pub(crate) fn new(kind: ParseErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }

    #[inline]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Returns the byte offset where the error was detected.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Display for ParseError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at position {}", self.kind, self.pos)
    }
}

impl Error for ParseError {}

/// Possible errors that can arise during parsing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedEnd,
    UnexpectedCharacter,
    ExpectedKey,
    ExpectedColon,
    ExpectedCommaOrEnd,
    TrailingComma,
    UnterminatedString,
    InvalidEscapeSequence,
    ControlCharacterInString,
    InvalidNumber,
    InvalidLiteral,
    RootNotContainer,
    TrailingCharacters,
    DepthLimitExceeded,
    InvalidUtf8,
    TryReserveError(TryReserveError),
}

impl Display for ParseErrorKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::UnexpectedEnd => write!(f, "unexpected end of input"),
            ParseErrorKind::UnexpectedCharacter => write!(f, "unexpected character"),
            ParseErrorKind::ExpectedKey => write!(f, "expected a quoted member name"),
            ParseErrorKind::ExpectedColon => write!(f, "expected ':' after member name"),
            ParseErrorKind::ExpectedCommaOrEnd => write!(f, "expected ',' or end of container"),
            ParseErrorKind::TrailingComma => write!(f, "trailing comma before end of container"),
            ParseErrorKind::UnterminatedString => write!(f, "unterminated string"),
            ParseErrorKind::InvalidEscapeSequence => write!(f, "invalid escape sequence"),
            ParseErrorKind::ControlCharacterInString => write!(f, "control character in string"),
            ParseErrorKind::InvalidNumber => write!(f, "invalid number"),
            ParseErrorKind::InvalidLiteral => write!(f, "invalid literal"),
            ParseErrorKind::RootNotContainer => write!(f, "root value must be an object or an array"),
            ParseErrorKind::TrailingCharacters => write!(f, "unexpected characters after end of document"),
            ParseErrorKind::DepthLimitExceeded => write!(f, "nesting depth limit exceeded"),
            ParseErrorKind::InvalidUtf8 => write!(f, "input is not valid utf-8"),
            ParseErrorKind::TryReserveError(e) => write!(f, "{}", e),
        }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Single pass recursive descent parser, nesting is bounded by [`ParseOptions::max_depth`].
pub(crate) struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    #[inline]
    pub fn new(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            options: *options,
        }
    }

    #[inline]
    pub fn parse(mut self) -> ParseResult<Document> {
        let res = self.parse_document();
        if let Err(e) = &res {
            tracing::debug!(kind = %e.kind, pos = e.pos, "document rejected");
        }
        res
    }

    fn parse_document(&mut self) -> ParseResult<Document> {
        self.eat_whitespaces();
        let root = match self.peek() {
            Some(BEGIN_OBJECT) => Root::Object(self.parse_object(None)?),
            Some(BEGIN_ARRAY) => Root::Array(self.parse_array(None)?),
            None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
            _ => return Err(self.error(ParseErrorKind::RootNotContainer)),
        };

        // only whitespace may follow the root
        self.eat_whitespaces();
        if !self.exhausted() {
            return Err(self.error(ParseErrorKind::TrailingCharacters));
        }
        Ok(Document::new(root))
    }

    fn parse_object(&mut self, name: Option<String>) -> ParseResult<Object> {
        debug_assert!(self.peek() == Some(BEGIN_OBJECT));
        self.advance(CTRL_CHAR_LEN);
        self.enter()?;

        let mut object = Object::new(name);
        self.eat_whitespaces();
        if self.peek() == Some(END_OBJECT) {
            self.advance(CTRL_CHAR_LEN);
            self.leave();
            return Ok(object);
        }

        loop {
            self.eat_whitespaces();
            let key = match self.peek() {
                Some(c) if self.is_quote(c) => self.parse_string()?,
                Some(END_OBJECT) => return Err(self.error(ParseErrorKind::TrailingComma)),
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                _ => return Err(self.error(ParseErrorKind::ExpectedKey)),
            };

            self.eat_whitespaces();
            self.expect(COLON, ParseErrorKind::ExpectedColon)?;
            self.eat_whitespaces();

            let value = self.parse_value(Some(&key))?;
            self.push(object.members_mut(), (key, value))?;

            self.eat_whitespaces();
            match self.peek() {
                Some(COMMA) => self.advance(CTRL_CHAR_LEN),
                Some(END_OBJECT) => {
                    self.advance(CTRL_CHAR_LEN);
                    break;
                }
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                _ => return Err(self.error(ParseErrorKind::ExpectedCommaOrEnd)),
            }
        }

        self.leave();
        Ok(object)
    }

    fn parse_array(&mut self, name: Option<String>) -> ParseResult<Array> {
        debug_assert!(self.peek() == Some(BEGIN_ARRAY));
        self.advance(CTRL_CHAR_LEN);
        self.enter()?;

        let mut array = Array::new(name);
        self.eat_whitespaces();
        if self.peek() == Some(END_ARRAY) {
            self.advance(CTRL_CHAR_LEN);
            self.leave();
            return Ok(array);
        }

        loop {
            self.eat_whitespaces();
            if self.peek() == Some(END_ARRAY) {
                return Err(self.error(ParseErrorKind::TrailingComma));
            }

            // elements are unnamed, nested containers take the array's name
            let value = self.parse_value(array.name())?;
            self.push(array.values_mut(), value)?;

            self.eat_whitespaces();
            match self.peek() {
                Some(COMMA) => self.advance(CTRL_CHAR_LEN),
                Some(END_ARRAY) => {
                    self.advance(CTRL_CHAR_LEN);
                    break;
                }
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                _ => return Err(self.error(ParseErrorKind::ExpectedCommaOrEnd)),
            }
        }

        self.leave();
        Ok(array)
    }

    fn parse_value(&mut self, name: Option<&str>) -> ParseResult<Node> {
        let node = match self.peek() {
            Some(BEGIN_OBJECT) => Node::Object(self.parse_object(name.map(str::to_owned))?),
            Some(BEGIN_ARRAY) => Node::Array(self.parse_array(name.map(str::to_owned))?),
            Some(c) if self.is_quote(c) => Node::Text(self.parse_string()?),
            Some(c) if c == MINUS || c.is_ascii_digit() => Node::Text(self.parse_number()?),
            Some(b't') => Node::Text(self.parse_literal(TRUE)?),
            Some(b'f') => Node::Text(self.parse_literal(FALSE)?),
            Some(b'n') => Node::Text(self.parse_literal(NULL)?),
            None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
            _ => return Err(self.error(ParseErrorKind::UnexpectedCharacter)),
        };
        Ok(node)
    }

    #[inline]
    fn parse_number(&mut self) -> ParseResult<String> {
        let begin = self.pos;
        let len = scan_number(&self.input.as_bytes()[begin..])
            .ok_or_else(|| self.error(ParseErrorKind::InvalidNumber))?;
        self.advance(len);
        self.create_text(begin, self.pos)
    }

    #[inline]
    fn parse_literal(&mut self, literal: &[u8]) -> ParseResult<String> {
        if !self.has_keyword(literal) {
            return Err(self.error(ParseErrorKind::InvalidLiteral));
        }
        let begin = self.pos;
        self.advance(literal.len());
        self.create_text(begin, self.pos)
    }

    fn parse_string(&mut self) -> ParseResult<String> {
        let quote = self.pop().ok_or_else(|| self.error(ParseErrorKind::UnexpectedEnd))?;
        debug_assert!(self.is_quote(quote));

        let mut text = String::new();
        let mut run = self.pos;
        loop {
            match self.peek() {
                None => return Err(self.error(ParseErrorKind::UnterminatedString)),
                Some(c) if c == quote => {
                    self.push_str(&mut text, run, self.pos)?;
                    self.advance(CTRL_CHAR_LEN);
                    return Ok(text);
                }
                Some(BACKSLASH) => {
                    self.push_str(&mut text, run, self.pos)?;
                    let escape_pos = self.pos;
                    self.advance(CTRL_CHAR_LEN);
                    let c = self.parse_escape(quote, escape_pos)?;
                    text.push(c);
                    run = self.pos;
                }
                Some(c) if c < 0x20 => return Err(self.error(ParseErrorKind::ControlCharacterInString)),
                // multi-byte characters are copied with the surrounding run
                Some(_) => self.advance(CTRL_CHAR_LEN),
            }
        }
    }

    #[inline]
    fn parse_escape(&mut self, quote: u8, escape_pos: usize) -> ParseResult<char> {
        let c = match self.pop() {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{8}',
            Some(b'f') => '\u{c}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(SINGLE_QUOTE) if quote == SINGLE_QUOTE => '\'',
            Some(b'u') => return self.parse_unicode_escape(escape_pos),
            None => return Err(self.error(ParseErrorKind::UnterminatedString)),
            _ => return Err(ParseError::new(ParseErrorKind::InvalidEscapeSequence, escape_pos)),
        };
        Ok(c)
    }

    fn parse_unicode_escape(&mut self, escape_pos: usize) -> ParseResult<char> {
        let invalid = || ParseError::new(ParseErrorKind::InvalidEscapeSequence, escape_pos);

        let high = self.parse_hex4().ok_or_else(invalid)?;
        let code = if (0xD800..0xDC00).contains(&high) {
            // a high surrogate must be followed by an escaped low surrogate
            if !self.has_keyword(UNICODE_ESCAPE) {
                return Err(invalid());
            }
            self.advance(UNICODE_ESCAPE.len());
            let low = self.parse_hex4().ok_or_else(invalid)?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(invalid());
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };

        char::from_u32(code).ok_or_else(invalid)
    }

    #[inline]
    fn parse_hex4(&mut self) -> Option<u32> {
        let digits = self.input.as_bytes().get(self.pos..self.pos + HEX_ESCAPE_LEN)?;
        let mut res = 0u32;
        for &d in digits {
            res = res * 16 + (d as char).to_digit(16)?;
        }
        self.advance(HEX_ESCAPE_LEN);
        Some(res)
    }

    #[inline]
    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.error(ParseErrorKind::DepthLimitExceeded));
        }
        Ok(())
    }

    #[inline]
    fn leave(&mut self) {
        debug_assert!(self.depth > 0);
        self.depth -= 1;
    }

    #[inline]
    fn is_quote(&self, c: u8) -> bool {
        c == DOUBLE_QUOTE || (self.options.single_quotes && c == SINGLE_QUOTE)
    }

    #[inline]
    fn expect(&mut self, expected: u8, kind: ParseErrorKind) -> ParseResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance(CTRL_CHAR_LEN);
                Ok(())
            }
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
            _ => Err(self.error(kind)),
        }
    }

    #[inline]
    fn has_keyword(&self, keyword: &[u8]) -> bool {
        self.remain().map_or(false, |bytes| bytes.starts_with(keyword))
    }

    #[inline]
    fn remain(&self) -> Option<&[u8]> {
        self.input.as_bytes().get(self.pos..).filter(|rem| !rem.is_empty())
    }

    #[inline]
    fn eat_whitespaces(&mut self) {
        let count = self
            .remain()
            .map_or(0, |rem| rem.iter().take_while(|&i| i.is_ascii_whitespace()).count());
        self.advance(count);
    }

    #[inline]
    fn exhausted(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    fn pop(&mut self) -> Option<u8> {
        let val = self.peek()?;
        self.pos += 1;
        Some(val)
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn advance(&mut self, step: usize) {
        self.pos += step;
    }

    #[inline]
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.pos)
    }

    #[inline]
    fn push<T>(&self, values: &mut Vec<T>, value: T) -> ParseResult<()> {
        values
            .try_reserve(1)
            .map_err(|e| self.error(ParseErrorKind::TryReserveError(e)))?;
        values.push(value);
        Ok(())
    }

    #[inline]
    fn push_str(&self, text: &mut String, begin: usize, end: usize) -> ParseResult<()> {
        // `begin` and `end` always sit on ASCII delimiters, so both are char boundaries
        let run = &self.input[begin..end];
        text.try_reserve(run.len())
            .map_err(|e| self.error(ParseErrorKind::TryReserveError(e)))?;
        text.push_str(run);
        Ok(())
    }

    #[inline]
    fn create_text(&self, begin: usize, end: usize) -> ParseResult<String> {
        let mut text = String::new();
        self.push_str(&mut text, begin, end)?;
        Ok(text)
    }
}
