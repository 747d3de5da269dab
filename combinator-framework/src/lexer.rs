//! Lexeme-level helpers: white space with comments, and tokens that eat the
//! space after them.
//!
//! There is no separate tokenizer. A grammar builds one space consumer with
//! [`space`] and wraps every token in [`lexeme`] or [`symbol`].

use crate::combinators::{stalled, Skip};
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::primitives::{literal, Literal};
use crate::reply::Reply;
use common_framework::Cursor;

/// White space interleaved with line and block comments.
#[derive(Debug, Clone)]
pub struct SpaceConsumer<S, L, B> {
    space: S,
    line_comment: L,
    block_comment: B,
}

/// Builds a space consumer from a white space parser and two comment
/// parsers.
///
/// The three are tried in that order, repeatedly, until none matches. Each
/// must consume input when it succeeds; pass [`fail`](crate::fail) for a
/// kind of comment the language does not have. The consumer never reports
/// what it stopped on.
pub fn space<S, L, B>(space: S, line_comment: L, block_comment: B) -> SpaceConsumer<S, L, B>
where
    S: Parser,
    L: Parser,
    B: Parser,
{
    SpaceConsumer {
        space,
        line_comment,
        block_comment,
    }
}

/// Runs one piece of a space consumer. `Ok(None)` means it did not match.
fn skip_with<P: Parser>(parser: &P, cursor: &Cursor) -> Result<Option<(Cursor, bool)>, Reply<()>> {
    match parser.parse(cursor) {
        Reply::Success { rest, consumed, .. } => Ok(Some((rest, consumed))),
        Reply::Failure {
            consumed: false, ..
        } => Ok(None),
        Reply::Failure { error, .. } => Err(Reply::Failure {
            error,
            consumed: true,
        }),
    }
}

impl<S, L, B> SpaceConsumer<S, L, B>
where
    S: Parser,
    L: Parser,
    B: Parser,
{
    fn skip_once(&self, cursor: &Cursor) -> Result<Option<(Cursor, bool)>, Reply<()>> {
        if let Some(step) = skip_with(&self.space, cursor)? {
            return Ok(Some(step));
        }
        if let Some(step) = skip_with(&self.line_comment, cursor)? {
            return Ok(Some(step));
        }
        skip_with(&self.block_comment, cursor)
    }
}

impl<S, L, B> Parser for SpaceConsumer<S, L, B>
where
    S: Parser,
    L: Parser,
    B: Parser,
{
    type Output = ();

    fn parse(&self, input: &Cursor) -> Reply<()> {
        let mut cursor = input.clone();
        loop {
            match self.skip_once(&cursor) {
                Ok(Some((rest, true))) => cursor = rest,
                Ok(Some((_, false))) => {
                    return Reply::Failure {
                        error: stalled(&cursor),
                        consumed: true,
                    }
                }
                Ok(None) => return Reply::success((), input, cursor),
                Err(failure) => return failure,
            }
        }
    }
}

/// `parser` followed by the space consumer `sc`.
pub fn lexeme<S, P>(sc: S, parser: P) -> Skip<P, S>
where
    S: Parser,
    P: Parser,
{
    parser.skip(sc)
}

/// The exact text `text` followed by the space consumer `sc`.
pub fn symbol<S: Parser>(sc: S, text: impl Into<String>) -> Skip<Literal, S> {
    literal(text).skip(sc)
}

/// Skips a comment that runs to the end of the line.
#[derive(Debug, Clone)]
pub struct LineComment {
    prefix: Literal,
}

/// Skips `prefix` and everything after it up to, but not including, the
/// next newline.
pub fn skip_line_comment(prefix: impl Into<String>) -> LineComment {
    LineComment {
        prefix: literal(prefix),
    }
}

impl Parser for LineComment {
    type Output = ();

    fn parse(&self, input: &Cursor) -> Reply<()> {
        match self.prefix.parse(input) {
            Reply::Success { rest, .. } => {
                let body = rest.remaining().chars().take_while(|ch| *ch != '\n').count();
                Reply::success((), input, rest.advance_by(body))
            }
            Reply::Failure { error, consumed } => Reply::Failure { error, consumed },
        }
    }
}

/// Skips a delimited comment, optionally allowing nesting.
#[derive(Debug, Clone)]
pub struct BlockComment {
    start: String,
    end: String,
    nested: bool,
}

/// Skips from `start` to the first `end` after it.
pub fn skip_block_comment(start: impl Into<String>, end: impl Into<String>) -> BlockComment {
    BlockComment {
        start: start.into(),
        end: end.into(),
        nested: false,
    }
}

/// Like [`skip_block_comment`], but every inner `start` needs its own `end`.
pub fn skip_block_comment_nested(
    start: impl Into<String>,
    end: impl Into<String>,
) -> BlockComment {
    BlockComment {
        start: start.into(),
        end: end.into(),
        nested: true,
    }
}

impl BlockComment {
    /// Byte length of the comment body plus its closing delimiter, if closed.
    fn closing(&self, body: &str) -> Option<usize> {
        let mut depth = 1usize;
        let mut index = 0;
        while index < body.len() {
            let rest = body.get(index..)?;
            if rest.starts_with(self.end.as_str()) {
                depth -= 1;
                index += self.end.len();
                if depth == 0 {
                    return Some(index);
                }
            } else if self.nested && rest.starts_with(self.start.as_str()) {
                depth += 1;
                index += self.start.len();
            } else {
                index += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
        None
    }
}

impl Parser for BlockComment {
    type Output = ();

    fn parse(&self, input: &Cursor) -> Reply<()> {
        if !input.starts_with(&self.start) {
            return Reply::error(ParseError::expecting(
                if input.is_eof() {
                    ErrorKind::UnexpectedEndOfInput
                } else {
                    ErrorKind::UnexpectedInput
                },
                input.position(),
                self.start.as_str(),
            ));
        }
        let body_start = input.advance_by(self.start.chars().count());
        let body = body_start.remaining();
        match self.closing(&body) {
            Some(len) => {
                let chars = body.get(..len).map_or(0, |text| text.chars().count());
                Reply::success((), input, body_start.advance_by(chars))
            }
            None => {
                let end = body_start.advance_by(body.chars().count());
                Reply::Failure {
                    error: ParseError::expecting(
                        ErrorKind::UnexpectedEndOfInput,
                        end.position(),
                        self.end.as_str(),
                    ),
                    consumed: true,
                }
            }
        }
    }
}
