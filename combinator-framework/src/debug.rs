use crate::parser::Parser;
use crate::reply::Reply;
use common_framework::Cursor;

/// Characters of context shown on each side of the cursor.
const CONTEXT: usize = 12;

/// Marks the cursor inside the context window.
const CARET: char = '\u{2038}';

/// A parser that reports every run through `tracing`; see [`debug`].
#[derive(Debug, Clone)]
pub struct Traced<P> {
    parser: P,
    label: String,
}

/// Wraps `parser` so each run emits `debug` events: one on entry, with the
/// label, line, column and the text around the cursor, and one with the
/// outcome. The parse itself is unchanged.
pub fn debug<P: Parser>(parser: P, label: impl Into<String>) -> Traced<P> {
    Traced {
        parser,
        label: label.into(),
    }
}

fn context(input: &Cursor) -> String {
    let source = input.source();
    let before = source.get(..input.offset()).unwrap_or("");
    let after = source.get(input.offset()..).unwrap_or("");
    let skip = before.chars().count().saturating_sub(CONTEXT);
    let left: String = before.chars().skip(skip).collect();
    let right: String = after.chars().take(CONTEXT).collect();
    format!("{}{CARET}{}", left.escape_debug(), right.escape_debug())
}

impl<P: Parser> Parser for Traced<P> {
    type Output = P::Output;

    fn parse(&self, input: &Cursor) -> Reply<P::Output> {
        tracing::debug!(
            label = %self.label,
            line = input.line(),
            column = input.column(),
            context = %context(input),
            "entering parser"
        );
        let reply = self.parser.parse(input);
        match &reply {
            Reply::Success { rest, consumed, .. } => tracing::debug!(
                label = %self.label,
                consumed,
                line = rest.line(),
                column = rest.column(),
                "parser succeeded"
            ),
            Reply::Failure { error, consumed } => tracing::debug!(
                label = %self.label,
                consumed,
                %error,
                "parser failed"
            ),
        }
        reply
    }
}
