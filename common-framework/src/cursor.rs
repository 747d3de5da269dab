use crate::{Position, TextSlice};
use std::sync::Arc;

/// An immutable view over the source text plus a position.
///
/// Every consuming operation returns a new cursor; the buffer is shared
/// through an `Arc<str>`, so cloning a cursor is cheap. Because a cursor is
/// never mutated in place, holding on to an old cursor is all it takes to
/// backtrack.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Arc<str>,
    position: Position,
}

impl Cursor {
    /// Creates a new cursor from the input string.
    pub fn new<S: Into<String>>(input: S) -> Self {
        let owned = input.into();
        let buffer = Arc::<str>::from(owned);
        Self::with_arc(buffer)
    }

    /// Creates a cursor from an existing shared buffer.
    pub fn with_arc(buffer: Arc<str>) -> Self {
        Self {
            position: Position::new(),
            buffer,
        }
    }

    /// Returns the shared source buffer.
    pub fn source(&self) -> &Arc<str> {
        &self.buffer
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.position.offset >= self.buffer.len()
    }

    /// Returns the next character without advancing the cursor.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns a cursor advanced by one character.
    ///
    /// At the end of input the cursor is returned unchanged.
    pub fn advance(&self) -> Cursor {
        let mut chars = self.rest().chars();
        match chars.next() {
            Some(ch) => Self {
                buffer: Arc::clone(&self.buffer),
                position: self.position.advance(ch, chars.next()),
            },
            None => self.clone(),
        }
    }

    /// Returns a cursor advanced by up to `n` characters.
    pub fn advance_by(&self, n: usize) -> Cursor {
        let mut position = self.position;
        let mut chars = self.rest().chars().peekable();
        for _ in 0..n {
            let Some(ch) = chars.next() else {
                break;
            };
            position = position.advance(ch, chars.peek().copied());
        }
        Self {
            buffer: Arc::clone(&self.buffer),
            position,
        }
    }

    /// Returns true if the remaining input starts with `text`.
    pub fn starts_with(&self, text: &str) -> bool {
        self.rest().starts_with(text)
    }

    /// Returns the remaining input from the current position.
    pub fn remaining(&self) -> TextSlice {
        TextSlice::new(Arc::clone(&self.buffer), self.offset(), self.buffer.len())
    }

    /// Returns the source text between two byte offsets.
    ///
    /// Offsets are clamped to the buffer; `from > to` yields an empty slice.
    pub fn slice(&self, from: usize, to: usize) -> TextSlice {
        let end = to.min(self.buffer.len());
        let start = from.min(end);
        TextSlice::new(Arc::clone(&self.buffer), start, end)
    }

    /// Returns the text consumed between this cursor and a later one.
    pub fn slice_to(&self, end: &Cursor) -> TextSlice {
        self.slice(self.offset(), end.offset())
    }

    fn rest(&self) -> &str {
        self.buffer.get(self.position.offset..).unwrap_or("")
    }
}

/// Two cursors over the same parse run are equal iff their positions are.
impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Cursor {}
