use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable slice referencing a shared text buffer.
///
/// Text-producing parsers return a `TextSlice` so the matched text can be
/// cloned and moved around without borrowing the input. It implements
/// `Deref<Target = str>` and compares by content.
#[derive(Clone)]
pub struct TextSlice {
    buffer: Arc<str>,
    start: usize,
    end: usize,
}

impl TextSlice {
    /// Creates a new slice from the given shared buffer and byte range.
    pub fn new(buffer: Arc<str>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= buffer.len());
        Self { buffer, start, end }
    }

    /// Creates a slice that covers the entire buffer.
    pub fn from_arc(buffer: Arc<str>) -> Self {
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
        }
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the slice is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the start offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end offset.
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn as_str(&self) -> &str {
        self
    }
}

impl fmt::Debug for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}..{}", self.as_str(), self.start, self.end)
    }
}

impl fmt::Display for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl Deref for TextSlice {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.buffer[self.start..self.end]
    }
}

impl AsRef<str> for TextSlice {
    fn as_ref(&self) -> &str {
        self
    }
}

impl From<TextSlice> for String {
    fn from(slice: TextSlice) -> Self {
        slice.as_str().to_owned()
    }
}

impl PartialEq<&str> for TextSlice {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for TextSlice {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<TextSlice> for &str {
    fn eq(&self, other: &TextSlice) -> bool {
        *self == other.as_str()
    }
}

impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TextSlice {}
