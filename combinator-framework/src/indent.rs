//! Indentation-sensitive parsing.
//!
//! Block structure is decided by the column of the first token on a line.
//! The reference column is always an explicit value: a guard is built with
//! it, a block captures it from its first item and hands it to the guard on
//! every later line. Nothing here keeps state between parses.
//!
//! Every combinator in this module first runs a space consumer, so blank
//! and comment-only lines never take part in a comparison.

use crate::character::{eol, space, Whitespace};
use crate::combinators::stalled;
use crate::error::{ErrorKind, ParseError};
use crate::parser::{BoxedParser, Parser};
use crate::reply::{Halt, Progress, Reply};
use common_framework::Cursor;
use std::fmt;

/// How a token's column must compare with the reference column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Equal,
    GreaterThan,
    GreaterThanOrEqual,
}

impl Relation {
    pub fn holds(self, actual: usize, reference: usize) -> bool {
        match self {
            Relation::Equal => actual == reference,
            Relation::GreaterThan => actual > reference,
            Relation::GreaterThanOrEqual => actual >= reference,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Equal => "==",
            Relation::GreaterThan => ">",
            Relation::GreaterThanOrEqual => ">=",
        })
    }
}

fn indentation_error(relation: Relation, reference: usize, at: &Cursor) -> ParseError {
    ParseError::expecting(
        ErrorKind::IndentationViolation,
        at.position(),
        format!("indentation {relation} {reference}"),
    )
}

/// Skips indentation, then checks the column of the next token.
#[derive(Debug, Clone)]
pub struct IndentGuard<S> {
    relation: Relation,
    reference: usize,
    space: S,
}

/// Checks that the next token's column stands in `relation` to `reference`.
///
/// White space is skipped first with [`space`](crate::character::space);
/// use [`IndentGuard::space`] to skip comments too. On success the column is
/// returned. On failure the error sits at the token, and the parser counts
/// as consuming exactly when it skipped white space.
pub fn indent_guard(relation: Relation, reference: usize) -> IndentGuard<Whitespace> {
    IndentGuard {
        relation,
        reference,
        space: space(),
    }
}

impl<S> IndentGuard<S> {
    /// Replaces the space consumer.
    pub fn space<T: Parser>(self, space: T) -> IndentGuard<T> {
        IndentGuard {
            relation: self.relation,
            reference: self.reference,
            space,
        }
    }
}

impl<S: Parser> Parser for IndentGuard<S> {
    type Output = usize;

    fn parse(&self, input: &Cursor) -> Reply<usize> {
        let mut state = Progress::new(input);
        if let Err(halt) = state.step(&self.space) {
            return halt.into_reply();
        }
        let column = state.cursor().column();
        if self.relation.holds(column, self.reference) {
            state.finish(column)
        } else {
            let error = indentation_error(self.relation, self.reference, state.cursor());
            state.fail(error).into_reply()
        }
    }
}

/// A parser that must start in the first column.
#[derive(Debug, Clone)]
pub struct NonIndented<P, S> {
    parser: P,
    space: S,
}

/// Skips white space, requires column 1, then runs `parser`.
pub fn non_indented<P: Parser>(parser: P) -> NonIndented<P, Whitespace> {
    NonIndented {
        parser,
        space: space(),
    }
}

impl<P, S> NonIndented<P, S> {
    pub fn space<T: Parser>(self, space: T) -> NonIndented<P, T> {
        NonIndented {
            parser: self.parser,
            space,
        }
    }
}

impl<P: Parser, S: Parser> Parser for NonIndented<P, S> {
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        indent_guard(Relation::Equal, 1)
            .space(&self.space)
            .skip_left(&self.parser)
            .parse(input)
    }
}

/// Items that share one column; see [`indent_block`].
#[derive(Debug, Clone)]
pub struct IndentBlock<P, S> {
    item: P,
    space: S,
    min: usize,
}

/// Parses sibling items aligned on one column.
///
/// White space is skipped, and the column of the first item becomes the
/// reference. After each item the block runs
/// `indent_guard(Equal, reference)`; the block ends where that guard fails
/// or at the end of input, leaving the cursor right after the last item.
/// An item that fails after its guard succeeded fails the block.
///
/// A block with no items succeeds without consuming anything.
pub fn indent_block<P: Parser>(item: P) -> IndentBlock<P, Whitespace> {
    IndentBlock {
        item,
        space: space(),
        min: 0,
    }
}

/// Like [`indent_block`] but requires at least one item.
pub fn indent_block1<P: Parser>(item: P) -> IndentBlock<P, Whitespace> {
    IndentBlock {
        item,
        space: space(),
        min: 1,
    }
}

impl<P, S> IndentBlock<P, S> {
    pub fn space<T: Parser>(self, space: T) -> IndentBlock<P, T> {
        IndentBlock {
            item: self.item,
            space,
            min: self.min,
        }
    }
}

impl<P: Parser, S: Parser> Parser for IndentBlock<P, S> {
    type Output = Vec<P::Output>;

    fn parse(&self, input: &Cursor) -> Reply<Self::Output> {
        let mut state = Progress::new(input);
        if let Err(halt) = state.step(&self.space) {
            return halt.into_reply();
        }
        let reference = state.cursor().column();

        let first = match self.item.parse(state.cursor()) {
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
            reply => reply,
        };
        let mut items = match state.absorb(first) {
            Ok(value) => vec![value],
            Err(halt) => return halt.into_reply(),
        };

        loop {
            let mut line = Progress::new(state.cursor());
            let guard = indent_guard(Relation::Equal, reference).space(&self.space);
            match guard.parse(line.cursor()) {
                Reply::Failure { error, .. } if error.kind == ErrorKind::IndentationViolation => {
                    state.suppress(error);
                    break;
                }
                reply => {
                    if let Err(halt) = line.absorb(reply) {
                        return state.carry(halt).into_reply();
                    }
                }
            }
            if line.cursor().is_eof() {
                break;
            }
            let token = line.cursor().clone();
            let value = match line.step(&self.item) {
                Ok(value) => value,
                Err(halt) => return state.carry(halt.committed()).into_reply(),
            };
            if !line.consumed() {
                return state.fail(stalled(&token)).committed().into_reply();
            }
            items.push(value);
            state.join(line);
        }

        tracing::trace!(reference, items = items.len(), "indentation block closed");
        state.finish(items)
    }
}

/// What a block header wants to follow it; returned by the header parser
/// given to [`nested_block`].
pub enum IndentOpt<A, B> {
    /// No indented children: the block's value is ready.
    None(A),
    /// Zero or more children.
    Many {
        /// Required child column; `None` takes the first child's column.
        level: Option<usize>,
        finish: Box<dyn FnOnce(Vec<B>) -> A>,
        item: BoxedParser<B>,
    },
    /// One or more children.
    Some {
        level: Option<usize>,
        finish: Box<dyn FnOnce(Vec<B>) -> A>,
        item: BoxedParser<B>,
    },
}

impl<A, B> IndentOpt<A, B> {
    pub fn none(value: A) -> Self {
        IndentOpt::None(value)
    }

    pub fn many<F, P>(level: Option<usize>, finish: F, item: P) -> Self
    where
        F: FnOnce(Vec<B>) -> A + 'static,
        P: Parser<Output = B> + Send + Sync + 'static,
    {
        IndentOpt::Many {
            level,
            finish: Box::new(finish),
            item: item.boxed(),
        }
    }

    pub fn some<F, P>(level: Option<usize>, finish: F, item: P) -> Self
    where
        F: FnOnce(Vec<B>) -> A + 'static,
        P: Parser<Output = B> + Send + Sync + 'static,
    {
        IndentOpt::Some {
            level,
            finish: Box::new(finish),
            item: item.boxed(),
        }
    }
}

impl<A: fmt::Debug, B> fmt::Debug for IndentOpt<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentOpt::None(value) => f.debug_tuple("None").field(value).finish(),
            IndentOpt::Many { level, .. } => f.debug_struct("Many").field("level", level).finish(),
            IndentOpt::Some { level, .. } => f.debug_struct("Some").field("level", level).finish(),
        }
    }
}

/// A header line and the block indented under it; see [`nested_block`].
#[derive(Debug, Clone)]
pub struct NestedBlock<S, H> {
    space: S,
    header: H,
}

/// Parses a header and the children indented under it.
///
/// `sc` must consume newlines. The header's column is the reference; what
/// follows is decided by the [`IndentOpt`] the header returns. Children sit
/// on later lines, strictly right of the header, all on one column, and
/// must not consume the newline after them.
pub fn nested_block<S, H, A, B>(sc: S, header: H) -> NestedBlock<S, H>
where
    S: Parser,
    H: Parser<Output = IndentOpt<A, B>>,
{
    NestedBlock { space: sc, header }
}

impl<S, H, A, B> NestedBlock<S, H>
where
    S: Parser,
    H: Parser<Output = IndentOpt<A, B>>,
{
    fn children(
        &self,
        state: &mut Progress,
        reference: usize,
        level: usize,
        item: &BoxedParser<B>,
        mut items: Vec<B>,
    ) -> Result<Vec<B>, Halt> {
        loop {
            state.step(&self.space)?;
            let column = state.cursor().column();
            if state.cursor().is_eof() || column <= reference {
                return Ok(items);
            }
            if column != level {
                let error = indentation_error(Relation::Equal, level, state.cursor());
                return Err(state.fail(error));
            }
            let token = state.cursor().clone();
            items.push(state.step(item)?);
            if state.cursor().offset() == token.offset() {
                return Err(state.fail(stalled(&token)).committed());
            }
        }
    }

    fn run(&self, state: &mut Progress) -> Result<A, Halt> {
        state.step(&self.space)?;
        let reference = state.cursor().column();
        let opt = state.step(&self.header)?;
        let guard = indent_guard(Relation::GreaterThan, reference).space(&self.space);

        match opt {
            IndentOpt::None(value) => {
                state.step(&self.space)?;
                Ok(value)
            }
            IndentOpt::Many {
                level,
                finish,
                item,
            } => {
                let found = state.step(&eol().skip_left(&guard).attempt().optional())?;
                match found {
                    Some(column) if !state.cursor().is_eof() => {
                        let level = level.unwrap_or(column);
                        tracing::trace!(reference, level, "indented children");
                        let items = self.children(state, reference, level, &item, Vec::new())?;
                        Ok(finish(items))
                    }
                    _ => {
                        state.step(&self.space)?;
                        Ok(finish(Vec::new()))
                    }
                }
            }
            IndentOpt::Some {
                level,
                finish,
                item,
            } => {
                let column = state.step(&eol().skip_left(&guard))?;
                let level = level.unwrap_or(column);
                if column != level {
                    let error = indentation_error(Relation::Equal, level, state.cursor());
                    return Err(state.fail(error));
                }
                tracing::trace!(reference, level, "indented children");
                let first = state.step(&item)?;
                let items = self.children(state, reference, level, &item, vec![first])?;
                Ok(finish(items))
            }
        }
    }
}

impl<S, H, A, B> Parser for NestedBlock<S, H>
where
    S: Parser,
    H: Parser<Output = IndentOpt<A, B>>,
{
    type Output = A;

    fn parse(&self, input: &Cursor) -> Reply<A> {
        let mut state = Progress::new(input);
        match self.run(&mut state) {
            Ok(value) => state.finish(value),
            Err(halt) => halt.into_reply(),
        }
    }
}

/// Continuation lines folded into one logical line; see [`line_fold`].
#[derive(Debug, Clone)]
pub struct LineFold<S, F> {
    space: S,
    callback: F,
}

/// Parses a construct that may continue on following lines, as long as
/// each continuation is indented past the column where it started.
///
/// `callback` receives the space consumer to use between the parts of the
/// fold: it skips white space (newlines included) only when the next token
/// is right of the starting column, and otherwise consumes nothing. After
/// the fold, `sc` runs once more.
pub fn line_fold<S, F, P>(sc: S, callback: F) -> LineFold<S, F>
where
    S: Parser + Clone + Send + Sync + 'static,
    F: Fn(BoxedParser<()>) -> P,
    P: Parser,
{
    LineFold {
        space: sc,
        callback,
    }
}

impl<S, F, P> Parser for LineFold<S, F>
where
    S: Parser + Clone + Send + Sync + 'static,
    F: Fn(BoxedParser<()>) -> P,
    P: Parser,
{
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        let mut state = Progress::new(input);
        if let Err(halt) = state.step(&self.space) {
            return halt.into_reply();
        }
        let column = state.cursor().column();
        let fold_space = indent_guard(Relation::GreaterThan, column)
            .space(self.space.clone())
            .attempt()
            .optional()
            .to(())
            .boxed();
        let value = match state.step(&(self.callback)(fold_space)) {
            Ok(value) => value,
            Err(halt) => return halt.into_reply(),
        };
        if let Err(halt) = state.step(&self.space) {
            return halt.into_reply();
        }
        state.finish(value)
    }
}
