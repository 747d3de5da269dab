use crate::error::{merge_opt, ParseError};
use crate::parser::Parser;
use common_framework::Cursor;

/// The outcome of running a parser on a cursor.
///
/// `consumed` records whether the attempt consumed any input; it is the only
/// thing backtracking decisions look at. A success carries the failures it
/// suppressed on the way (for instance the element `many` stopped on) as a
/// `hint`, so a later failure at the same or a nearer position can still
/// report them.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Success {
        value: T,
        rest: Cursor,
        consumed: bool,
        hint: Option<ParseError>,
    },
    Failure {
        error: ParseError,
        consumed: bool,
    },
}

impl<T> Reply<T> {
    /// A success that consumed input iff `rest` moved past `input`.
    pub fn success(value: T, input: &Cursor, rest: Cursor) -> Self {
        let consumed = rest.offset() > input.offset();
        Reply::Success {
            value,
            rest,
            consumed,
            hint: None,
        }
    }

    /// A success that consumed nothing.
    pub fn empty(value: T, input: &Cursor) -> Self {
        Reply::Success {
            value,
            rest: input.clone(),
            consumed: false,
            hint: None,
        }
    }

    /// A failure that consumed nothing.
    pub fn error(error: ParseError) -> Self {
        Reply::Failure {
            error,
            consumed: false,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn consumed(&self) -> bool {
        match self {
            Reply::Success { consumed, .. } | Reply::Failure { consumed, .. } => *consumed,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Reply::Success { value, .. } => Some(value),
            Reply::Failure { .. } => None,
        }
    }

    pub fn rest(&self) -> Option<&Cursor> {
        match self {
            Reply::Success { rest, .. } => Some(rest),
            Reply::Failure { .. } => None,
        }
    }

    /// The failure, or the hint of a success.
    pub fn error_ref(&self) -> Option<&ParseError> {
        match self {
            Reply::Success { hint, .. } => hint.as_ref(),
            Reply::Failure { error, .. } => Some(error),
        }
    }

    pub fn map<U, F>(self, f: F) -> Reply<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Reply::Success {
                value,
                rest,
                consumed,
                hint,
            } => Reply::Success {
                value: f(value),
                rest,
                consumed,
                hint,
            },
            Reply::Failure { error, consumed } => Reply::Failure { error, consumed },
        }
    }

    /// Folds an earlier, suppressed failure into this reply.
    ///
    /// A failure keeps its own kind when the positions tie.
    pub fn merge_hint(self, earlier: Option<ParseError>) -> Self {
        if earlier.is_none() {
            return self;
        }
        match self {
            Reply::Success {
                value,
                rest,
                consumed,
                hint,
            } => Reply::Success {
                value,
                rest,
                consumed,
                hint: merge_opt(earlier, hint),
            },
            Reply::Failure { error, consumed } => Reply::Failure {
                error: match earlier {
                    Some(earlier) => error.merge(earlier),
                    None => error,
                },
                consumed,
            },
        }
    }

    /// Marks the reply as consuming when an earlier step already consumed.
    pub fn after(self, consumed_before: bool) -> Self {
        match self {
            Reply::Success {
                value,
                rest,
                consumed,
                hint,
            } => Reply::Success {
                value,
                rest,
                consumed: consumed || consumed_before,
                hint,
            },
            Reply::Failure { error, consumed } => Reply::Failure {
                error,
                consumed: consumed || consumed_before,
            },
        }
    }

    pub fn into_result(self) -> Result<(T, Cursor), ParseError> {
        match self {
            Reply::Success { value, rest, .. } => Ok((value, rest)),
            Reply::Failure { error, .. } => Err(error),
        }
    }
}

/// A failure on its way out of a multi-step parser.
///
/// Helpers return `Result<_, Halt>` so `?` can carry a failure out; the
/// parser turns it back into a reply at the end.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Halt {
    error: ParseError,
    consumed: bool,
}

impl Halt {
    /// Marks the failure as having consumed input.
    pub(crate) fn committed(mut self) -> Self {
        self.consumed = true;
        self
    }

    pub(crate) fn into_reply<T>(self) -> Reply<T> {
        Reply::Failure {
            error: self.error,
            consumed: self.consumed,
        }
    }
}

/// Bookkeeping for parsers that run several steps in a row.
///
/// Tracks the cursor, whether any step consumed input, and the failures
/// suppressed so far. A failing step becomes a [`Halt`] that carries all of
/// it.
#[derive(Debug, Clone)]
pub(crate) struct Progress {
    cursor: Cursor,
    consumed: bool,
    hint: Option<ParseError>,
}

impl Progress {
    pub(crate) fn new(input: &Cursor) -> Self {
        Self {
            cursor: input.clone(),
            consumed: false,
            hint: None,
        }
    }

    pub(crate) fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub(crate) fn consumed(&self) -> bool {
        self.consumed
    }

    /// Runs `parser` at the current cursor and absorbs its reply.
    pub(crate) fn step<P>(&mut self, parser: &P) -> Result<P::Output, Halt>
    where
        P: Parser + ?Sized,
    {
        let reply = parser.parse(&self.cursor);
        self.absorb(reply)
    }

    /// Moves past a success, or turns a failure into a [`Halt`].
    pub(crate) fn absorb<U>(&mut self, reply: Reply<U>) -> Result<U, Halt> {
        match reply {
            Reply::Success {
                value,
                rest,
                consumed,
                hint,
            } => {
                self.cursor = rest;
                self.consumed |= consumed;
                self.hint = merge_opt(self.hint.take(), hint);
                Ok(value)
            }
            Reply::Failure { error, consumed } => Err(self.carry(Halt { error, consumed })),
        }
    }

    /// Remembers a failure that did not stop the parse.
    pub(crate) fn suppress(&mut self, error: ParseError) {
        self.hint = merge_opt(self.hint.take(), Some(error));
    }

    /// Continues from a sub-parse that started at this state's cursor.
    pub(crate) fn join(&mut self, other: Progress) {
        self.cursor = other.cursor;
        self.consumed |= other.consumed;
        self.hint = merge_opt(self.hint.take(), other.hint);
    }

    /// Adds this state's flags and hints to a failure from a sub-parse.
    pub(crate) fn carry(&mut self, halt: Halt) -> Halt {
        let error = match self.hint.take() {
            Some(hint) => halt.error.merge(hint),
            None => halt.error,
        };
        Halt {
            error,
            consumed: halt.consumed || self.consumed,
        }
    }

    pub(crate) fn fail(&mut self, error: ParseError) -> Halt {
        self.carry(Halt {
            error,
            consumed: false,
        })
    }

    pub(crate) fn finish<T>(self, value: T) -> Reply<T> {
        Reply::Success {
            value,
            rest: self.cursor,
            consumed: self.consumed,
            hint: self.hint,
        }
    }
}
