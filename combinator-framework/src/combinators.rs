//! Combinators: structs that wrap other parsers, in the style of iterator
//! adaptors. Each one is usually reached through a [`Parser`] method; the
//! free functions here are the same combinators in prefix form.

use crate::error::{merge_opt, ErrorKind, ParseError};
use crate::parser::Parser;
use crate::reply::Reply;
use common_framework::Cursor;

/// Runs `first`, then `second` from where it stopped, and combines the values.
///
/// The pair consumed input if either half did. Failures suppressed by
/// `first` are folded into whatever `second` reports.
fn chain<P, Q, U, F>(first: &P, second: &Q, input: &Cursor, combine: F) -> Reply<U>
where
    P: Parser,
    Q: Parser,
    F: FnOnce(P::Output, Q::Output) -> U,
{
    match first.parse(input) {
        Reply::Success {
            value,
            rest,
            consumed,
            hint,
        } => second
            .parse(&rest)
            .map(|other| combine(value, other))
            .merge_hint(hint)
            .after(consumed),
        Reply::Failure { error, consumed } => Reply::Failure { error, consumed },
    }
}

/// Reports a repeated parser that succeeded without consuming input.
pub(crate) fn stalled(cursor: &Cursor) -> ParseError {
    tracing::warn!(
        line = cursor.line(),
        column = cursor.column(),
        offset = cursor.offset(),
        "repeated parser succeeded without consuming input"
    );
    ParseError::bare(ErrorKind::InfiniteRepetition, cursor.position())
}

/// Always committed: no alternative may recover from a stalled repetition.
fn no_progress<T>(cursor: &Cursor, hint: Option<ParseError>) -> Reply<T> {
    Reply::Failure {
        error: stalled(cursor),
        consumed: true,
    }
    .merge_hint(hint)
}

/// Shared loop behind the repetition combinators.
///
/// Stops at the first failure that consumed nothing. Needs at least `min`
/// elements; an element that succeeds without consuming is reported as
/// [`ErrorKind::InfiniteRepetition`].
fn repeat<P, A>(
    parser: &P,
    input: &Cursor,
    min: usize,
    mut acc: A,
    push: impl Fn(&mut A, P::Output),
) -> Reply<A>
where
    P: Parser,
{
    let mut cursor = input.clone();
    let mut consumed = false;
    let mut hint: Option<ParseError> = None;
    let mut count = 0usize;

    loop {
        match parser.parse(&cursor) {
            Reply::Success {
                value,
                rest,
                consumed: true,
                hint: element_hint,
            } => {
                push(&mut acc, value);
                count += 1;
                cursor = rest;
                consumed = true;
                hint = merge_opt(hint, element_hint);
            }
            Reply::Success { .. } => return no_progress(&cursor, hint),
            Reply::Failure {
                error,
                consumed: true,
            } => {
                return Reply::Failure {
                    error,
                    consumed: true,
                }
                .merge_hint(hint)
            }
            Reply::Failure {
                error,
                consumed: false,
            } => {
                if count < min {
                    return Reply::Failure { error, consumed }.merge_hint(hint);
                }
                return Reply::Success {
                    value: acc,
                    rest: cursor,
                    consumed,
                    hint: merge_opt(hint, Some(error)),
                };
            }
        }
    }
}

// === Value transformers ===

#[derive(Debug, Clone)]
pub struct Map<P, F> {
    parser: P,
    f: F,
}

impl<P, F> Map<P, F> {
    pub fn new(parser: P, f: F) -> Self {
        Self { parser, f }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn parse(&self, input: &Cursor) -> Reply<U> {
        self.parser.parse(input).map(&self.f)
    }
}

#[derive(Debug, Clone)]
pub struct To<P, U> {
    parser: P,
    value: U,
}

impl<P, U> To<P, U> {
    pub fn new(parser: P, value: U) -> Self {
        Self { parser, value }
    }
}

impl<P: Parser, U: Clone> Parser for To<P, U> {
    type Output = U;

    fn parse(&self, input: &Cursor) -> Reply<U> {
        self.parser.parse(input).map(|_| self.value.clone())
    }
}

// === Sequencing ===

#[derive(Debug, Clone)]
pub struct Seq<P, Q> {
    first: P,
    second: Q,
}

impl<P, Q> Seq<P, Q> {
    pub fn new(first: P, second: Q) -> Self {
        Self { first, second }
    }
}

impl<P: Parser, Q: Parser> Parser for Seq<P, Q> {
    type Output = (P::Output, Q::Output);

    fn parse(&self, input: &Cursor) -> Reply<Self::Output> {
        chain(&self.first, &self.second, input, |a, b| (a, b))
    }
}

#[derive(Debug, Clone)]
pub struct Skip<P, Q> {
    first: P,
    second: Q,
}

impl<P, Q> Skip<P, Q> {
    pub fn new(first: P, second: Q) -> Self {
        Self { first, second }
    }
}

impl<P: Parser, Q: Parser> Parser for Skip<P, Q> {
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        chain(&self.first, &self.second, input, |a, _| a)
    }
}

#[derive(Debug, Clone)]
pub struct SkipLeft<P, Q> {
    first: P,
    second: Q,
}

impl<P, Q> SkipLeft<P, Q> {
    pub fn new(first: P, second: Q) -> Self {
        Self { first, second }
    }
}

impl<P: Parser, Q: Parser> Parser for SkipLeft<P, Q> {
    type Output = Q::Output;

    fn parse(&self, input: &Cursor) -> Reply<Q::Output> {
        chain(&self.first, &self.second, input, |_, b| b)
    }
}

/// Two parsers in order, values merged by a function.
#[derive(Debug, Clone)]
pub struct Sequence<P, Q, F> {
    first: P,
    second: Q,
    combine: F,
}

impl<P, Q, F, U> Parser for Sequence<P, Q, F>
where
    P: Parser,
    Q: Parser,
    F: Fn(P::Output, Q::Output) -> U,
{
    type Output = U;

    fn parse(&self, input: &Cursor) -> Reply<U> {
        chain(&self.first, &self.second, input, &self.combine)
    }
}

#[derive(Debug, Clone)]
pub struct Bind<P, F> {
    parser: P,
    f: F,
}

impl<P, F> Bind<P, F> {
    pub fn new(parser: P, f: F) -> Self {
        Self { parser, f }
    }
}

impl<P, F, Q> Parser for Bind<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Q,
    Q: Parser,
{
    type Output = Q::Output;

    fn parse(&self, input: &Cursor) -> Reply<Q::Output> {
        match self.parser.parse(input) {
            Reply::Success {
                value,
                rest,
                consumed,
                hint,
            } => (self.f)(value)
                .parse(&rest)
                .merge_hint(hint)
                .after(consumed),
            Reply::Failure { error, consumed } => Reply::Failure { error, consumed },
        }
    }
}

// === Choice and backtracking ===

/// Ordered choice with the commit rule.
///
/// The second branch runs only if the first failed without consuming input.
/// A failure that consumed input is returned as is.
#[derive(Debug, Clone)]
pub struct Alternative<P, Q> {
    first: P,
    second: Q,
}

impl<P, Q> Alternative<P, Q> {
    pub fn new(first: P, second: Q) -> Self {
        Self { first, second }
    }
}

impl<P, Q> Parser for Alternative<P, Q>
where
    P: Parser,
    Q: Parser<Output = P::Output>,
{
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        match self.first.parse(input) {
            Reply::Failure {
                error,
                consumed: false,
            } => self.second.parse(input).merge_hint(Some(error)),
            reply => reply,
        }
    }
}

/// Ordered choice over any number of parsers of one type.
#[derive(Debug, Clone)]
pub struct Choice<P> {
    parsers: Vec<P>,
}

impl<P: Parser> Parser for Choice<P> {
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        let mut error: Option<ParseError> = None;
        for parser in &self.parsers {
            match parser.parse(input) {
                Reply::Failure {
                    error: e,
                    consumed: false,
                } => error = merge_opt(error, Some(e)),
                reply => return reply.merge_hint(error),
            }
        }
        Reply::error(
            error.unwrap_or_else(|| ParseError::bare(ErrorKind::UnexpectedInput, input.position())),
        )
    }
}

/// Makes every failure of the inner parser non-consuming.
///
/// The failure is moved back to where the attempt started, keeping what the
/// inner parser expected. A stalled repetition stays committed.
#[derive(Debug, Clone)]
pub struct Attempt<P> {
    parser: P,
}

impl<P> Attempt<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: Parser> Parser for Attempt<P> {
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        match self.parser.parse(input) {
            Reply::Failure { error, consumed } if error.kind == ErrorKind::InfiniteRepetition => {
                Reply::Failure { error, consumed }
            }
            Reply::Failure { error, .. } => Reply::error(ParseError {
                position: input.position(),
                ..error
            }),
            reply => reply,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Optional<P> {
    parser: P,
}

impl<P> Optional<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: Parser> Parser for Optional<P> {
    type Output = Option<P::Output>;

    fn parse(&self, input: &Cursor) -> Reply<Self::Output> {
        match self.parser.parse(input) {
            Reply::Failure {
                error,
                consumed: false,
            } => Reply::Success {
                value: None,
                rest: input.clone(),
                consumed: false,
                hint: Some(error),
            },
            reply => reply.map(Some),
        }
    }
}

/// Runs the inner parser without moving the cursor on success.
#[derive(Debug, Clone)]
pub struct LookAhead<P> {
    parser: P,
}

impl<P> LookAhead<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: Parser> Parser for LookAhead<P> {
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        match self.parser.parse(input) {
            Reply::Success { value, .. } => Reply::empty(value, input),
            failure => failure,
        }
    }
}

/// Succeeds, consuming nothing, exactly when the inner parser fails.
#[derive(Debug, Clone)]
pub struct NotFollowedBy<P> {
    parser: P,
}

impl<P> NotFollowedBy<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: Parser> Parser for NotFollowedBy<P> {
    type Output = ();

    fn parse(&self, input: &Cursor) -> Reply<()> {
        match self.parser.parse(input) {
            Reply::Success { .. } => Reply::error(ParseError::bare(
                ErrorKind::UnexpectedInput,
                input.position(),
            )),
            Reply::Failure { .. } => Reply::empty((), input),
        }
    }
}

// === Repetition ===

#[derive(Debug, Clone)]
pub struct Many<P> {
    parser: P,
}

impl<P> Many<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: Parser> Parser for Many<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, input: &Cursor) -> Reply<Self::Output> {
        repeat(&self.parser, input, 0, Vec::new(), Vec::push)
    }
}

#[derive(Debug, Clone)]
pub struct Many1<P> {
    parser: P,
}

impl<P> Many1<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: Parser> Parser for Many1<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, input: &Cursor) -> Reply<Self::Output> {
        repeat(&self.parser, input, 1, Vec::new(), Vec::push)
    }
}

/// Repetition that drops the values; `min` is 0 or 1.
#[derive(Debug, Clone)]
pub struct SkipMany<P> {
    parser: P,
    min: usize,
}

impl<P> SkipMany<P> {
    pub fn new(parser: P, min: usize) -> Self {
        Self { parser, min }
    }
}

impl<P: Parser> Parser for SkipMany<P> {
    type Output = ();

    fn parse(&self, input: &Cursor) -> Reply<()> {
        repeat(&self.parser, input, self.min, (), |_, _| {})
    }
}

/// Elements separated by `separator`, at least `min` of them.
///
/// A trailing separator that is not followed by an element is an error if
/// the separator consumed input.
#[derive(Debug, Clone)]
pub struct SepBy<P, S> {
    parser: P,
    separator: S,
    min: usize,
}

impl<P, S> SepBy<P, S> {
    pub fn new(parser: P, separator: S, min: usize) -> Self {
        Self {
            parser,
            separator,
            min,
        }
    }
}

impl<P: Parser, S: Parser> Parser for SepBy<P, S> {
    type Output = Vec<P::Output>;

    fn parse(&self, input: &Cursor) -> Reply<Self::Output> {
        let (mut items, mut cursor, mut consumed, mut hint) = match self.parser.parse(input) {
            Reply::Success {
                value,
                rest,
                consumed,
                hint,
            } => (vec![value], rest, consumed, hint),
            Reply::Failure {
                error,
                consumed: false,
            } if self.min == 0 => {
                return Reply::Success {
                    value: Vec::new(),
                    rest: input.clone(),
                    consumed: false,
                    hint: Some(error),
                }
            }
            Reply::Failure { error, consumed } => return Reply::Failure { error, consumed },
        };

        loop {
            let (after_sep, sep_consumed, sep_hint) = match self.separator.parse(&cursor) {
                Reply::Success {
                    rest,
                    consumed,
                    hint,
                    ..
                } => (rest, consumed, hint),
                Reply::Failure {
                    error,
                    consumed: false,
                } => {
                    return Reply::Success {
                        value: items,
                        rest: cursor,
                        consumed,
                        hint: merge_opt(hint, Some(error)),
                    }
                }
                Reply::Failure { error, .. } => {
                    return Reply::Failure {
                        error,
                        consumed: true,
                    }
                    .merge_hint(hint)
                }
            };
            hint = merge_opt(hint, sep_hint);

            match self.parser.parse(&after_sep) {
                Reply::Success {
                    value,
                    rest,
                    consumed: item_consumed,
                    hint: item_hint,
                } => {
                    if !sep_consumed && !item_consumed {
                        return no_progress(&cursor, hint);
                    }
                    items.push(value);
                    cursor = rest;
                    consumed = true;
                    hint = merge_opt(hint, item_hint);
                }
                Reply::Failure {
                    error,
                    consumed: item_consumed,
                } => {
                    if sep_consumed || item_consumed {
                        return Reply::Failure {
                            error,
                            consumed: true,
                        }
                        .merge_hint(hint);
                    }
                    return Reply::Success {
                        value: items,
                        rest: cursor,
                        consumed,
                        hint: merge_opt(hint, Some(error)),
                    };
                }
            }
        }
    }
}

/// Exactly `n` repetitions.
#[derive(Debug, Clone)]
pub struct Count<P> {
    parser: P,
    n: usize,
}

impl<P: Parser> Parser for Count<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, input: &Cursor) -> Reply<Self::Output> {
        let mut items = Vec::with_capacity(self.n);
        let mut cursor = input.clone();
        let mut consumed = false;
        let mut hint: Option<ParseError> = None;
        for _ in 0..self.n {
            match self.parser.parse(&cursor) {
                Reply::Success {
                    value,
                    rest,
                    consumed: c,
                    hint: h,
                } => {
                    items.push(value);
                    cursor = rest;
                    consumed |= c;
                    hint = merge_opt(hint, h);
                }
                Reply::Failure { error, consumed: c } => {
                    return Reply::Failure {
                        error,
                        consumed: consumed || c,
                    }
                    .merge_hint(hint)
                }
            }
        }
        Reply::Success {
            value: items,
            rest: cursor,
            consumed,
            hint,
        }
    }
}

// === Diagnostics ===

/// Names what the inner parser expects.
///
/// A failure's expected set becomes `{name}`; so does the hint of a success
/// that consumed nothing. Control flow is unchanged.
#[derive(Debug, Clone)]
pub struct Label<P> {
    parser: P,
    name: String,
}

impl<P> Label<P> {
    pub fn new(parser: P, name: String) -> Self {
        Self { parser, name }
    }
}

impl<P: Parser> Parser for Label<P> {
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        match self.parser.parse(input) {
            Reply::Failure { error, consumed } => Reply::Failure {
                error: error.relabel(self.name.as_str()),
                consumed,
            },
            Reply::Success {
                value,
                rest,
                consumed: false,
                hint,
            } => Reply::Success {
                value,
                rest,
                consumed: false,
                hint: hint.map(|h| h.relabel(self.name.as_str())),
            },
            reply => reply,
        }
    }
}

// === Prefix forms ===

pub fn map<P, F, U>(parser: P, f: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    Map::new(parser, f)
}

/// Runs `first` then `second` and combines their values with `combine`.
pub fn sequence<P, Q, F, U>(first: P, second: Q, combine: F) -> Sequence<P, Q, F>
where
    P: Parser,
    Q: Parser,
    F: Fn(P::Output, Q::Output) -> U,
{
    Sequence {
        first,
        second,
        combine,
    }
}

pub fn alternative<P, Q>(first: P, second: Q) -> Alternative<P, Q>
where
    P: Parser,
    Q: Parser<Output = P::Output>,
{
    Alternative::new(first, second)
}

pub fn choice<P: Parser>(parsers: impl IntoIterator<Item = P>) -> Choice<P> {
    Choice {
        parsers: parsers.into_iter().collect(),
    }
}

pub fn attempt<P: Parser>(parser: P) -> Attempt<P> {
    Attempt::new(parser)
}

pub fn optional<P: Parser>(parser: P) -> Optional<P> {
    Optional::new(parser)
}

pub fn many<P: Parser>(parser: P) -> Many<P> {
    Many::new(parser)
}

pub fn many1<P: Parser>(parser: P) -> Many1<P> {
    Many1::new(parser)
}

pub fn count<P: Parser>(n: usize, parser: P) -> Count<P> {
    Count { parser, n }
}

/// `open`, then `parser`, then `close`; keeps the middle value.
pub fn between<O, C, P>(open: O, close: C, parser: P) -> Skip<SkipLeft<O, P>, C>
where
    O: Parser,
    C: Parser,
    P: Parser,
{
    Skip::new(SkipLeft::new(open, parser), close)
}

pub fn label<P: Parser>(parser: P, name: impl Into<String>) -> Label<P> {
    Label::new(parser, name.into())
}

pub fn look_ahead<P: Parser>(parser: P) -> LookAhead<P> {
    LookAhead::new(parser)
}

pub fn not_followed_by<P: Parser>(parser: P) -> NotFollowedBy<P> {
    NotFollowedBy::new(parser)
}
