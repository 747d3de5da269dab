use crate::error::{ErrorKind, ParseError};
use crate::parser::Parser;
use crate::reply::Reply;
use common_framework::Cursor;

fn run<P>(parser: &P, input: &str) -> Result<(P::Output, Cursor, Option<ParseError>), ParseError>
where
    P: Parser + ?Sized,
{
    match parser.parse(&Cursor::new(input)) {
        Reply::Success {
            value, rest, hint, ..
        } => Ok((value, rest, hint)),
        Reply::Failure { error, .. } => {
            tracing::debug!(%error, "parse failed");
            Err(error)
        }
    }
}

/// Runs `parser` over the whole of `input`.
///
/// Input left over after a success is an error of kind
/// [`ErrorKind::UnexpectedTrailingInput`], merged with whatever the parser
/// stopped on, so the message still names what could have continued.
pub fn parse<P>(parser: &P, input: &str) -> Result<P::Output, ParseError>
where
    P: Parser + ?Sized,
{
    let (value, rest, hint) = run(parser, input)?;
    if rest.is_eof() {
        return Ok(value);
    }
    let trailing = ParseError::expecting(
        ErrorKind::UnexpectedTrailingInput,
        rest.position(),
        "end of input",
    );
    let error = match hint {
        Some(hint) => trailing.merge(hint),
        None => trailing,
    };
    tracing::debug!(%error, "input left after parse");
    Err(error)
}

/// Runs `parser` at the start of `input`; the cursor shows where it stopped.
pub fn parse_prefix<P>(parser: &P, input: &str) -> Result<(P::Output, Cursor), ParseError>
where
    P: Parser + ?Sized,
{
    run(parser, input).map(|(value, rest, _)| (value, rest))
}
