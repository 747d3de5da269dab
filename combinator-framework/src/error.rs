use common_framework::Position;
use std::collections::BTreeSet;
use std::fmt;

/// What went wrong at the reported position.
///
/// The kind is diagnostic only: whether a failure commits the enclosing
/// alternative is decided by the reply's `consumed` flag, never by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A primitive saw input it did not accept.
    UnexpectedInput,
    /// A primitive needed more input.
    UnexpectedEndOfInput,
    /// An indentation guard's relation did not hold.
    IndentationViolation,
    /// Produced by `fail`.
    UserLabeledFailure,
    /// A whole-input parse stopped before the end.
    UnexpectedTrailingInput,
    /// A repetition's element succeeded without consuming input.
    InfiniteRepetition,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorKind::UnexpectedInput => "unexpected token",
            ErrorKind::UnexpectedEndOfInput => "unexpected end of input",
            ErrorKind::IndentationViolation => "incorrect indentation",
            ErrorKind::UserLabeledFailure => "parse failure",
            ErrorKind::UnexpectedTrailingInput => "unexpected trailing input",
            ErrorKind::InfiniteRepetition => "repetition without progress",
        };
        f.write_str(text)
    }
}

/// A parse failure: where it happened and what would have been accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}{}", .position.line, .position.column, ExpectedList(.expected))]
pub struct ParseError {
    pub kind: ErrorKind,
    pub position: Position,
    pub expected: BTreeSet<String>,
}

impl ParseError {
    pub fn new<I, S>(kind: ErrorKind, position: Position, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            position,
            expected: expected.into_iter().map(Into::into).collect(),
        }
    }

    /// An error expecting exactly one label.
    pub fn expecting(kind: ErrorKind, position: Position, label: impl Into<String>) -> Self {
        Self::new(kind, position, [label.into()])
    }

    /// An error without any expectation (the identity of `merge` at its position).
    pub fn bare(kind: ErrorKind, position: Position) -> Self {
        Self::new(kind, position, std::iter::empty::<String>())
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// Longest-failure-wins merge.
    ///
    /// The error at the strictly further offset is kept; at equal offsets
    /// the expected sets are unioned and `self`'s kind is kept.
    pub fn merge(self, other: ParseError) -> ParseError {
        match self.position.offset.cmp(&other.position.offset) {
            std::cmp::Ordering::Greater => self,
            std::cmp::Ordering::Less => other,
            std::cmp::Ordering::Equal => {
                let mut merged = self;
                merged.expected.extend(other.expected);
                merged
            }
        }
    }

    /// Replaces the expected set with a single label.
    pub fn relabel(mut self, label: impl Into<String>) -> ParseError {
        self.expected.clear();
        self.expected.insert(label.into());
        self
    }
}

/// Merges two optional errors; `None` is the identity.
pub fn merge_opt(a: Option<ParseError>, b: Option<ParseError>) -> Option<ParseError> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.merge(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

struct ExpectedList<'a>(&'a BTreeSet<String>);

impl fmt::Display for ExpectedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        f.write_str("; expected one of: {")?;
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(label)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset: usize) -> Position {
        Position::at(1, offset + 1, offset)
    }

    #[test]
    fn test_merge_keeps_further_error() {
        let near = ParseError::expecting(ErrorKind::UnexpectedInput, at(1), "a");
        let far = ParseError::expecting(ErrorKind::IndentationViolation, at(4), "b");
        assert_eq!(near.clone().merge(far.clone()), far);
        assert_eq!(far.clone().merge(near), far);
    }

    #[test]
    fn test_merge_unions_at_same_position() {
        let a = ParseError::expecting(ErrorKind::UnexpectedInput, at(2), "a");
        let b = ParseError::expecting(ErrorKind::UserLabeledFailure, at(2), "b");
        let merged = a.merge(b);
        assert_eq!(merged.kind, ErrorKind::UnexpectedInput);
        assert_eq!(
            merged.expected.into_iter().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_merge_opt_identity() {
        let e = ParseError::expecting(ErrorKind::UnexpectedInput, at(0), "x");
        assert_eq!(merge_opt(None, Some(e.clone())), Some(e.clone()));
        assert_eq!(merge_opt(Some(e.clone()), None), Some(e));
        assert_eq!(merge_opt(None, None), None);
    }

    #[test]
    fn test_relabel() {
        let e = ParseError::new(ErrorKind::UnexpectedInput, at(0), ["a", "b"]).relabel("thing");
        assert_eq!(e.expected.len(), 1);
        assert!(e.expected.contains("thing"));
    }

    #[test]
    fn test_display() {
        let e = ParseError::new(ErrorKind::UnexpectedInput, Position::at(2, 5, 9), ["then", "else"]);
        assert_eq!(
            e.to_string(),
            "unexpected token at line 2, column 5; expected one of: {else, then}"
        );
    }

    #[test]
    fn test_display_without_expectation() {
        let e = ParseError::bare(ErrorKind::InfiniteRepetition, Position::new());
        assert_eq!(e.to_string(), "repetition without progress at line 1, column 1");
    }
}
