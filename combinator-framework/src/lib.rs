//! Parser combinators with indentation-sensitive layout.
//!
//! Grammars are built from small parsers ([`literal`], [`satisfy`], …)
//! glued together with combinators ([`Parser::seq`], [`Parser::or`],
//! [`Parser::many`], …). Backtracking follows one rule: an alternative is
//! only tried if the previous one failed without consuming input; wrap a
//! branch in [`attempt`] to lift that. Failures report the furthest position
//! any branch reached.
//!
//! Layout-driven grammars use the [`indent`] module, which compares token
//! columns against a reference column passed around as a plain value.

pub mod character;
pub mod combinators;
pub mod debug;
pub mod error;
pub mod indent;
pub mod lexer;
mod ops;
pub mod parser;
pub mod pratt;
pub mod primitives;
pub mod reply;
pub mod run;

pub use combinators::{
    alternative, attempt, between, choice, count, label, look_ahead, many, many1, map,
    not_followed_by, optional, sequence,
};
pub use common_framework::{Cursor, Position, TextSlice};
pub use debug::debug;
pub use error::{ErrorKind, ParseError};
pub use indent::{
    indent_block, indent_block1, indent_guard, line_fold, nested_block, non_indented, IndentOpt,
    Relation,
};
pub use parser::{from_fn, lazy, BoxedParser, Parser};
pub use pratt::{pratt, Pratt};
pub use primitives::{
    any_char, char, current_column, empty, end_of_input, fail, indent_level, literal, none_of,
    one_of, position, pure, satisfy, take_while, take_while1,
};
pub use reply::Reply;
pub use run::{parse, parse_prefix};
