use std::fmt;

/// Number of columns a tab character occupies.
///
/// Indentation comparisons only look at relative columns, so a tab is
/// counted as a single column, the same as any other character.
pub const TAB_WIDTH: usize = 1;

/// Represents a location in the source text.
///
/// Positions are shared by the cursor, parse errors and the indentation
/// combinators, which compare `column` values against a reference column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in characters)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Returns the position after consuming `ch`.
    ///
    /// `next` is the character following `ch`, if any. A `'\r'` directly
    /// followed by `'\n'` does not move the column, so `"\r\n"` counts as a
    /// single line break. A lone `'\r'` is an ordinary character.
    pub fn advance(self, ch: char, next: Option<char>) -> Self {
        let offset = self.offset + ch.len_utf8();
        match ch {
            '\n' => Self {
                line: self.line + 1,
                column: 1,
                offset,
            },
            '\r' if next == Some('\n') => Self { offset, ..self },
            '\t' => Self {
                column: self.column + TAB_WIDTH,
                offset,
                ..self
            },
            _ => Self {
                column: self.column + 1,
                offset,
                ..self
            },
        }
    }

    /// Derives the position of a byte offset by scanning `source` from the
    /// start. Offsets past the end (or inside a multi-byte character) stop at
    /// the last character boundary not exceeding `offset`.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut position = Self::new();
        let mut chars = source.char_indices().peekable();
        while let Some((index, ch)) = chars.next() {
            if index + ch.len_utf8() > offset {
                break;
            }
            let next = chars.peek().map(|&(_, c)| c);
            position = position.advance(ch, next);
        }
        position
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
