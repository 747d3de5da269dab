//! Single-character and whitespace parsers.

use crate::combinators::{Alternative, Label};
use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::primitives::{literal, satisfy, Literal, Satisfy};
use crate::reply::Reply;
use common_framework::Cursor;

pub fn newline() -> Literal {
    literal("\n")
}

pub fn crlf() -> Literal {
    literal("\r\n")
}

/// A Unix or Windows line ending.
pub fn eol() -> Label<Alternative<Literal, Literal>> {
    newline().or(crlf()).label("end of line")
}

pub fn tab() -> Literal {
    literal("\t")
}

/// Skips a run of white space.
///
/// Never carries a hint: stopping at a non-space character is not worth
/// reporting in the enclosing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Whitespace {
    newlines: bool,
    required: bool,
}

/// Zero or more white space characters, newlines included.
pub fn space() -> Whitespace {
    Whitespace {
        newlines: true,
        required: false,
    }
}

pub fn space1() -> Whitespace {
    Whitespace {
        newlines: true,
        required: true,
    }
}

/// Zero or more spaces and tabs (no line breaks).
pub fn hspace() -> Whitespace {
    Whitespace {
        newlines: false,
        required: false,
    }
}

pub fn hspace1() -> Whitespace {
    Whitespace {
        newlines: false,
        required: true,
    }
}

impl Whitespace {
    fn accepts(&self, ch: char) -> bool {
        if self.newlines {
            ch.is_whitespace()
        } else {
            ch.is_whitespace() && ch != '\n' && ch != '\r'
        }
    }
}

impl Parser for Whitespace {
    type Output = ();

    fn parse(&self, input: &Cursor) -> Reply<()> {
        let count = input
            .remaining()
            .chars()
            .take_while(|ch| self.accepts(*ch))
            .count();
        if count == 0 && self.required {
            let kind = if input.is_eof() {
                ErrorKind::UnexpectedEndOfInput
            } else {
                ErrorKind::UnexpectedInput
            };
            return Reply::error(ParseError::expecting(kind, input.position(), "white space"));
        }
        Reply::success((), input, input.advance_by(count))
    }
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_letter(ch: char) -> bool {
    ch.is_alphabetic()
}

fn is_alphanumeric(ch: char) -> bool {
    ch.is_alphanumeric()
}

pub fn digit() -> Satisfy<fn(char) -> bool> {
    satisfy(is_digit as fn(char) -> bool, "digit")
}

pub fn letter() -> Satisfy<fn(char) -> bool> {
    satisfy(is_letter as fn(char) -> bool, "letter")
}

pub fn alphanumeric() -> Satisfy<fn(char) -> bool> {
    satisfy(is_alphanumeric as fn(char) -> bool, "alphanumeric character")
}
