//! Operator shorthand for boxed parsers.
//!
//! | operator | meaning                  |
//! |----------|--------------------------|
//! | `a + b`  | `a.seq(b)`               |
//! | `a \| b` | `a.or(b)`                |
//! | `a << b` | `a.skip(b)` (keep left)  |
//! | `a >> b` | `a.skip_left(b)` (keep right) |
//!
//! ```
//! use combinator_framework::{literal, Parser};
//!
//! let key = literal("key").boxed();
//! let eq = literal("=").boxed();
//! let value = literal("1").boxed() | literal("2").boxed();
//! let pair = (key << eq) + value;
//!
//! let (k, v) = pair.parse_str("key=2").unwrap();
//! assert_eq!((k.as_str(), v.as_str()), ("key", "2"));
//! ```

use crate::parser::{BoxedParser, Parser};
use std::ops::{Add, BitOr, Shl, Shr};

impl<A: 'static, B: 'static> Add<BoxedParser<B>> for BoxedParser<A> {
    type Output = BoxedParser<(A, B)>;

    fn add(self, rhs: BoxedParser<B>) -> Self::Output {
        self.seq(rhs).boxed()
    }
}

impl<T: 'static> BitOr for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs).boxed()
    }
}

impl<A: 'static, B: 'static> Shl<BoxedParser<B>> for BoxedParser<A> {
    type Output = BoxedParser<A>;

    fn shl(self, rhs: BoxedParser<B>) -> Self::Output {
        self.skip(rhs).boxed()
    }
}

impl<A: 'static, B: 'static> Shr<BoxedParser<B>> for BoxedParser<A> {
    type Output = BoxedParser<B>;

    fn shr(self, rhs: BoxedParser<B>) -> Self::Output {
        self.skip_left(rhs).boxed()
    }
}
