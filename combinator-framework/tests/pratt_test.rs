use combinator_framework::character::hspace;
use combinator_framework::lexer::{lexeme, symbol};
use combinator_framework::{
    between, lazy, parse_prefix, pratt, take_while1, BoxedParser, Cursor, Parser, Reply,
};

fn number() -> BoxedParser<i64> {
    lexeme(hspace(), take_while1(|c| c.is_ascii_digit(), "number"))
        .map(|digits| digits.parse::<i64>().unwrap_or_default())
        .boxed()
}

fn expr() -> BoxedParser<i64> {
    let atom = number().or(between(
        symbol(hspace(), "("),
        symbol(hspace(), ")"),
        lazy(expr),
    ));
    pratt(atom)
        .prefix(symbol(hspace(), "-"), 2, |a| -a)
        .infix_left(symbol(hspace(), "+"), 1, |a, b| a + b)
        .infix_left(symbol(hspace(), "-"), 1, |a, b| a - b)
        .infix_left(symbol(hspace(), "*"), 2, |a, b| a * b)
        .infix_left(symbol(hspace(), "/"), 2, |a, b| a / b)
        .infix_right(symbol(hspace(), "^"), 3, |a, b| a.pow(b as u32))
        .boxed()
}

#[test]
fn test_precedence() {
    assert_eq!(expr().parse_str("1 + 2 * 3").unwrap(), 7);
    assert_eq!(expr().parse_str("2 * 3 + 1").unwrap(), 7);
}

#[test]
fn test_left_associative() {
    assert_eq!(expr().parse_str("10 - 3 - 2").unwrap(), 5);
    assert_eq!(expr().parse_str("100 / 10 / 5").unwrap(), 2);
}

#[test]
fn test_right_associative() {
    assert_eq!(expr().parse_str("2 ^ 3 ^ 2").unwrap(), 512);
}

#[test]
fn test_prefix_binding() {
    // `^` binds tighter than negation, `*` does not.
    assert_eq!(expr().parse_str("-2 ^ 2").unwrap(), -4);
    assert_eq!(expr().parse_str("-3 * 2").unwrap(), -6);
    assert_eq!(expr().parse_str("--4").unwrap(), 4);
}

#[test]
fn test_parentheses() {
    assert_eq!(expr().parse_str("(1 + 2) * 3").unwrap(), 9);
    assert_eq!(expr().parse_str("2 * (3 + (4 - 1))").unwrap(), 12);
}

#[test]
fn test_single_atom() {
    assert_eq!(expr().parse_str("42").unwrap(), 42);
}

#[test]
fn test_missing_right_operand_is_consumed_failure() {
    match expr().parse(&Cursor::new("1 +")) {
        Reply::Failure { error, consumed } => {
            assert!(consumed);
            assert_eq!(error.offset(), 3);
            assert!(error.expected.contains("number"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn test_stops_before_unknown_token() {
    let (value, rest) = parse_prefix(&expr(), "1 + 2 ) 3").unwrap();
    assert_eq!(value, 3);
    assert_eq!(rest.offset(), 6);
}

#[test]
fn test_trailing_input_names_operators() {
    let error = expr().parse_str("1 + 2 ]").unwrap_err();
    assert_eq!(error.offset(), 6);
    assert!(error.expected.contains("+"));
    assert!(error.expected.contains("^"));
    assert!(error.expected.contains("end of input"));
}

#[test]
fn test_empty_input() {
    let error = expr().parse_str("").unwrap_err();
    assert!(error.expected.contains("number"));
    assert!(error.expected.contains("("));
    assert!(error.expected.contains("-"));
}
