//! Primitive parsers: the leaves every grammar is built from.
//!
//! A primitive that fails never consumes input, and its error sits exactly
//! at the cursor it was given.

use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::reply::Reply;
use common_framework::{Cursor, Position, TextSlice};
use std::marker::PhantomData;

fn mismatch(input: &Cursor) -> ErrorKind {
    if input.is_eof() {
        ErrorKind::UnexpectedEndOfInput
    } else {
        ErrorKind::UnexpectedInput
    }
}

/// Matches an exact piece of text.
#[derive(Debug, Clone)]
pub struct Literal {
    text: String,
}

/// Consumes exactly `text` and returns the matched slice.
///
/// Matching is by prefix only: `literal("if")` accepts the start of
/// `"iffy"`. Guard word boundaries with a following combinator.
pub fn literal(text: impl Into<String>) -> Literal {
    Literal { text: text.into() }
}

impl Parser for Literal {
    type Output = TextSlice;

    fn parse(&self, input: &Cursor) -> Reply<TextSlice> {
        if input.starts_with(&self.text) {
            let rest = input.advance_by(self.text.chars().count());
            Reply::success(input.slice_to(&rest), input, rest)
        } else {
            Reply::error(ParseError::expecting(
                mismatch(input),
                input.position(),
                self.text.as_str(),
            ))
        }
    }
}

/// Matches one character accepted by a predicate.
#[derive(Debug, Clone)]
pub struct Satisfy<F> {
    predicate: F,
    label: String,
}

pub fn satisfy<F>(predicate: F, label: impl Into<String>) -> Satisfy<F>
where
    F: Fn(char) -> bool,
{
    Satisfy {
        predicate,
        label: label.into(),
    }
}

impl<F> Parser for Satisfy<F>
where
    F: Fn(char) -> bool,
{
    type Output = char;

    fn parse(&self, input: &Cursor) -> Reply<char> {
        match input.peek() {
            Some(ch) if (self.predicate)(ch) => Reply::success(ch, input, input.advance()),
            _ => Reply::error(ParseError::expecting(
                mismatch(input),
                input.position(),
                self.label.as_str(),
            )),
        }
    }
}

fn anything(_: char) -> bool {
    true
}

pub fn any_char() -> Satisfy<fn(char) -> bool> {
    satisfy(anything as fn(char) -> bool, "any character")
}

/// Matches the single character `expected`.
pub fn char(expected: char) -> Satisfy<impl Fn(char) -> bool + Clone + Send + Sync> {
    satisfy(move |ch| ch == expected, expected.to_string())
}

/// One character out of (or not in) a fixed set.
#[derive(Debug, Clone)]
pub struct OneOf {
    chars: String,
    negate: bool,
}

/// Matches any character of `chars`; each one is reported as expected.
pub fn one_of(chars: impl Into<String>) -> OneOf {
    OneOf {
        chars: chars.into(),
        negate: false,
    }
}

/// Matches any character not in `chars`.
pub fn none_of(chars: impl Into<String>) -> OneOf {
    OneOf {
        chars: chars.into(),
        negate: true,
    }
}

impl Parser for OneOf {
    type Output = char;

    fn parse(&self, input: &Cursor) -> Reply<char> {
        match input.peek() {
            Some(ch) if self.chars.contains(ch) != self.negate => {
                Reply::success(ch, input, input.advance())
            }
            _ if self.negate => Reply::error(ParseError::expecting(
                mismatch(input),
                input.position(),
                format!("none of {:?}", self.chars),
            )),
            _ => Reply::error(ParseError::new(
                mismatch(input),
                input.position(),
                self.chars.chars().map(String::from),
            )),
        }
    }
}

/// The longest run of characters accepted by a predicate.
#[derive(Debug, Clone)]
pub struct TakeWhile<F> {
    predicate: F,
    label: Option<String>,
}

/// Consumes characters while `predicate` holds; never fails.
pub fn take_while<F>(predicate: F) -> TakeWhile<F>
where
    F: Fn(char) -> bool,
{
    TakeWhile {
        predicate,
        label: None,
    }
}

/// Like [`take_while`] but needs at least one character.
pub fn take_while1<F>(predicate: F, label: impl Into<String>) -> TakeWhile<F>
where
    F: Fn(char) -> bool,
{
    TakeWhile {
        predicate,
        label: Some(label.into()),
    }
}

impl<F> Parser for TakeWhile<F>
where
    F: Fn(char) -> bool,
{
    type Output = TextSlice;

    fn parse(&self, input: &Cursor) -> Reply<TextSlice> {
        let count = input
            .remaining()
            .chars()
            .take_while(|ch| (self.predicate)(*ch))
            .count();
        match (&self.label, count) {
            (Some(label), 0) => Reply::error(ParseError::expecting(
                mismatch(input),
                input.position(),
                label.as_str(),
            )),
            _ => {
                let rest = input.advance_by(count);
                Reply::success(input.slice_to(&rest), input, rest)
            }
        }
    }
}

/// Succeeds without consuming, only at the end of input.
#[derive(Debug, Clone, Copy)]
pub struct EndOfInput;

pub fn end_of_input() -> EndOfInput {
    EndOfInput
}

impl Parser for EndOfInput {
    type Output = ();

    fn parse(&self, input: &Cursor) -> Reply<()> {
        if input.is_eof() {
            Reply::empty((), input)
        } else {
            Reply::error(ParseError::expecting(
                ErrorKind::UnexpectedInput,
                input.position(),
                "end of input",
            ))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pure<T> {
    value: T,
}

/// Succeeds with a clone of `value` without consuming anything.
pub fn pure<T: Clone>(value: T) -> Pure<T> {
    Pure { value }
}

impl<T: Clone> Parser for Pure<T> {
    type Output = T;

    fn parse(&self, input: &Cursor) -> Reply<T> {
        Reply::empty(self.value.clone(), input)
    }
}

/// Always fails without consuming.
pub struct Fail<T> {
    label: Option<String>,
    _output: PhantomData<fn() -> T>,
}

impl<T> Clone for Fail<T> {
    fn clone(&self) -> Self {
        Fail {
            label: self.label.clone(),
            _output: PhantomData,
        }
    }
}

/// Fails with kind [`ErrorKind::UserLabeledFailure`], expecting `label`.
pub fn fail<T>(label: impl Into<String>) -> Fail<T> {
    Fail {
        label: Some(label.into()),
        _output: PhantomData,
    }
}

/// Fails with no expectation at all; the identity of alternation.
pub fn empty<T>() -> Fail<T> {
    Fail {
        label: None,
        _output: PhantomData,
    }
}

impl<T> Parser for Fail<T> {
    type Output = T;

    fn parse(&self, input: &Cursor) -> Reply<T> {
        let error = match &self.label {
            Some(label) => ParseError::expecting(
                ErrorKind::UserLabeledFailure,
                input.position(),
                label.as_str(),
            ),
            None => ParseError::bare(ErrorKind::UnexpectedInput, input.position()),
        };
        Reply::error(error)
    }
}

/// Returns the current position without consuming.
#[derive(Debug, Clone, Copy)]
pub struct CurrentPosition;

pub fn position() -> CurrentPosition {
    CurrentPosition
}

impl Parser for CurrentPosition {
    type Output = Position;

    fn parse(&self, input: &Cursor) -> Reply<Position> {
        Reply::empty(input.position(), input)
    }
}

/// Returns the current column without consuming.
#[derive(Debug, Clone, Copy)]
pub struct CurrentColumn;

pub fn current_column() -> CurrentColumn {
    CurrentColumn
}

/// Alias of [`current_column`].
pub fn indent_level() -> CurrentColumn {
    CurrentColumn
}

impl Parser for CurrentColumn {
    type Output = usize;

    fn parse(&self, input: &Cursor) -> Reply<usize> {
        Reply::empty(input.column(), input)
    }
}
