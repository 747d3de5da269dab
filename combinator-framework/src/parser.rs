use crate::combinators::{
    Alternative, Attempt, Bind, Label, LookAhead, Many, Many1, Map, NotFollowedBy, Optional,
    SepBy, Seq, Skip, SkipLeft, SkipMany, To,
};
use crate::error::ParseError;
use crate::reply::Reply;
use crate::run;
use common_framework::Cursor;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A parser: given a cursor, produce a [`Reply`].
///
/// This is the single method every primitive and combinator implements.
/// A parser never mutates the cursor it is given; the advanced cursor is
/// part of the reply. Parsers are built once and reused, possibly from
/// several threads at once.
///
/// Closures become parsers through [`from_fn`].
pub trait Parser {
    type Output;

    fn parse(&self, input: &Cursor) -> Reply<Self::Output>;

    /// Transforms the value of a success.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map::new(self, f)
    }

    /// Replaces the value of a success with a clone of `value`.
    fn to<U: Clone>(self, value: U) -> To<Self, U>
    where
        Self: Sized,
    {
        To::new(self, value)
    }

    /// Sequence: parse self then other, return both values.
    fn seq<Q: Parser>(self, other: Q) -> Seq<Self, Q>
    where
        Self: Sized,
    {
        Seq::new(self, other)
    }

    /// Keep left: parse self then other, discard other's result.
    fn skip<Q: Parser>(self, other: Q) -> Skip<Self, Q>
    where
        Self: Sized,
    {
        Skip::new(self, other)
    }

    /// Keep right: parse self then other, discard self's result.
    fn skip_left<Q: Parser>(self, other: Q) -> SkipLeft<Self, Q>
    where
        Self: Sized,
    {
        SkipLeft::new(self, other)
    }

    /// Monadic chaining: the next parser is chosen from this one's value.
    fn bind<Q, F>(self, f: F) -> Bind<Self, F>
    where
        Self: Sized,
        Q: Parser,
        F: Fn(Self::Output) -> Q,
    {
        Bind::new(self, f)
    }

    /// Choice: try self, if it fails without consuming try other.
    fn or<Q>(self, other: Q) -> Alternative<Self, Q>
    where
        Self: Sized,
        Q: Parser<Output = Self::Output>,
    {
        Alternative::new(self, other)
    }

    /// Turns any failure into a non-consuming one.
    fn attempt(self) -> Attempt<Self>
    where
        Self: Sized,
    {
        Attempt::new(self)
    }

    fn many(self) -> Many<Self>
    where
        Self: Sized,
    {
        Many::new(self)
    }

    fn many1(self) -> Many1<Self>
    where
        Self: Sized,
    {
        Many1::new(self)
    }

    fn skip_many(self) -> SkipMany<Self>
    where
        Self: Sized,
    {
        SkipMany::new(self, 0)
    }

    fn skip_many1(self) -> SkipMany<Self>
    where
        Self: Sized,
    {
        SkipMany::new(self, 1)
    }

    fn sep_by<S: Parser>(self, separator: S) -> SepBy<Self, S>
    where
        Self: Sized,
    {
        SepBy::new(self, separator, 0)
    }

    fn sep_by1<S: Parser>(self, separator: S) -> SepBy<Self, S>
    where
        Self: Sized,
    {
        SepBy::new(self, separator, 1)
    }

    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional::new(self)
    }

    fn look_ahead(self) -> LookAhead<Self>
    where
        Self: Sized,
    {
        LookAhead::new(self)
    }

    fn not_followed_by(self) -> NotFollowedBy<Self>
    where
        Self: Sized,
    {
        NotFollowedBy::new(self)
    }

    /// Add a label to this parser for better error messages.
    fn label(self, name: impl Into<String>) -> Label<Self>
    where
        Self: Sized,
    {
        Label::new(self, name.into())
    }

    fn boxed(self) -> BoxedParser<Self::Output>
    where
        Self: Sized + Send + Sync + 'static,
    {
        BoxedParser::new(self)
    }

    /// Parses the whole of `input`; see [`run::parse`].
    fn parse_str(&self, input: &str) -> Result<Self::Output, ParseError>
    where
        Self: Sized,
    {
        run::parse(self, input)
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        (**self).parse(input)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        (**self).parse(input)
    }
}

/// A parser made from a closure; see [`from_fn`].
pub struct FnParser<F, T> {
    f: F,
    _output: PhantomData<fn() -> T>,
}

impl<F: Clone, T> Clone for FnParser<F, T> {
    fn clone(&self) -> Self {
        FnParser {
            f: self.f.clone(),
            _output: PhantomData,
        }
    }
}

/// Wraps a closure `Fn(&Cursor) -> Reply<T>` as a parser.
pub fn from_fn<T, F>(f: F) -> FnParser<F, T>
where
    F: Fn(&Cursor) -> Reply<T>,
{
    FnParser {
        f,
        _output: PhantomData,
    }
}

impl<F, T> Parser for FnParser<F, T>
where
    F: Fn(&Cursor) -> Reply<T>,
{
    type Output = T;

    fn parse(&self, input: &Cursor) -> Reply<T> {
        (self.f)(input)
    }
}

// === Boxed Parser for type erasure ===

/// A type-erased parser that is cheap to clone and safe to share.
pub struct BoxedParser<T> {
    parser: Arc<dyn Parser<Output = T> + Send + Sync>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Arc::clone(&self.parser),
        }
    }
}

impl<T> fmt::Debug for BoxedParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedParser")
    }
}

impl<T> BoxedParser<T> {
    pub fn new<P>(parser: P) -> Self
    where
        P: Parser<Output = T> + Send + Sync + 'static,
    {
        BoxedParser {
            parser: Arc::new(parser),
        }
    }
}

impl<T> Parser for BoxedParser<T> {
    type Output = T;

    fn parse(&self, input: &Cursor) -> Reply<T> {
        self.parser.parse(input)
    }
}

/// A parser built on demand, for recursive grammars.
#[derive(Clone)]
pub struct Lazy<F> {
    build: F,
}

/// Defers building a parser until it runs, so a grammar rule can refer to
/// itself through a function.
///
/// ```
/// use combinator_framework::{lazy, literal, BoxedParser, Parser};
///
/// fn nested() -> BoxedParser<usize> {
///     literal("(")
///         .skip_left(lazy(nested))
///         .skip(literal(")"))
///         .map(|depth| depth + 1)
///         .or(literal("x").to(0))
///         .boxed()
/// }
///
/// assert_eq!(nested().parse_str("((x))").unwrap(), 2);
/// ```
pub fn lazy<F, P>(build: F) -> Lazy<F>
where
    F: Fn() -> P,
    P: Parser,
{
    Lazy { build }
}

impl<F, P> Parser for Lazy<F>
where
    F: Fn() -> P,
    P: Parser,
{
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        (self.build)().parse(input)
    }
}
