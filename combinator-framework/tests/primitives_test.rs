use combinator_framework::{
    any_char, char, current_column, empty, end_of_input, fail, indent_level, literal, none_of,
    one_of, position, pure, satisfy, take_while, take_while1, Cursor, ErrorKind, Parser, Reply,
};

#[test]
fn test_literal_matches_prefix() {
    let input = Cursor::new("if x");
    let reply = literal("if").parse(&input);
    assert!(reply.consumed());
    assert_eq!(reply.value().map(|v| v.as_str()), Some("if"));
    assert_eq!(reply.rest().map(Cursor::offset), Some(2));
}

#[test]
fn test_literal_mismatch_does_not_consume() {
    let input = Cursor::new("then");
    match literal("if").parse(&input) {
        Reply::Failure { error, consumed } => {
            assert!(!consumed);
            assert_eq!(error.kind, ErrorKind::UnexpectedInput);
            assert_eq!(error.offset(), 0);
            assert!(error.expected.contains("if"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn test_literal_at_end_of_input() {
    let input = Cursor::new("");
    let error = literal("if").parse(&input).into_result().unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnexpectedEndOfInput);
}

#[test]
fn test_literal_partial_match_reports_token_start() {
    let input = Cursor::new("abc").advance();
    let error = literal("bd").parse(&input).into_result().unwrap_err();
    assert_eq!(error.offset(), 1);
    assert_eq!(error.column(), 2);
}

#[test]
fn test_empty_literal_succeeds_without_consuming() {
    let input = Cursor::new("abc");
    let reply = literal("").parse(&input);
    assert!(reply.is_success());
    assert!(!reply.consumed());
}

#[test]
fn test_literal_multibyte() {
    let input = Cursor::new("你好 world");
    let reply = literal("你好").parse(&input);
    let rest = reply.rest().unwrap();
    assert_eq!(rest.offset(), 6);
    assert_eq!(rest.column(), 3);
}

#[test]
fn test_satisfy() {
    let digit = satisfy(|c| c.is_ascii_digit(), "digit");
    assert_eq!(digit.parse(&Cursor::new("7a")).value(), Some(&'7'));

    let error = digit.parse(&Cursor::new("a7")).into_result().unwrap_err();
    assert!(error.expected.contains("digit"));
    assert_eq!(error.kind, ErrorKind::UnexpectedInput);
}

#[test]
fn test_any_char_and_char() {
    assert_eq!(any_char().parse(&Cursor::new("é")).value(), Some(&'é'));
    assert!(any_char().parse(&Cursor::new("")).is_failure());
    assert_eq!(char('x').parse(&Cursor::new("xy")).value(), Some(&'x'));
    assert!(char('x').parse(&Cursor::new("yx")).is_failure());
}

#[test]
fn test_one_of_reports_each_char() {
    let ops = one_of("+-");
    assert_eq!(ops.parse(&Cursor::new("-1")).value(), Some(&'-'));
    let error = ops.parse(&Cursor::new("*")).into_result().unwrap_err();
    assert_eq!(error.expected.len(), 2);
    assert!(error.expected.contains("+"));
    assert!(error.expected.contains("-"));
}

#[test]
fn test_none_of() {
    let not_quote = none_of("\"");
    assert_eq!(not_quote.parse(&Cursor::new("a\"")).value(), Some(&'a'));
    assert!(not_quote.parse(&Cursor::new("\"a")).is_failure());
}

#[test]
fn test_take_while_never_fails() {
    let spaces = take_while(|c| c == ' ');
    let reply = spaces.parse(&Cursor::new("x"));
    assert!(reply.is_success());
    assert!(!reply.consumed());
    assert_eq!(reply.value().map(|v| v.as_str()), Some(""));

    let reply = spaces.parse(&Cursor::new("   x"));
    assert_eq!(reply.value().map(|v| v.len()), Some(3));
}

#[test]
fn test_take_while1_needs_one() {
    let word = take_while1(|c| c.is_alphabetic(), "word");
    assert_eq!(
        word.parse(&Cursor::new("abc1")).value().map(|v| v.as_str()),
        Some("abc")
    );
    let error = word.parse(&Cursor::new("1abc")).into_result().unwrap_err();
    assert!(error.expected.contains("word"));
}

#[test]
fn test_end_of_input() {
    assert!(end_of_input().parse(&Cursor::new("")).is_success());
    let error = end_of_input()
        .parse(&Cursor::new("x"))
        .into_result()
        .unwrap_err();
    assert!(error.expected.contains("end of input"));
    assert_eq!(error.kind, ErrorKind::UnexpectedInput);
}

#[test]
fn test_pure_consumes_nothing() {
    let input = Cursor::new("abc");
    let reply = pure(42).parse(&input);
    assert_eq!(reply, Reply::empty(42, &input));
}

#[test]
fn test_fail_is_user_labeled() {
    let error = fail::<()>("keyword")
        .parse(&Cursor::new("abc"))
        .into_result()
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::UserLabeledFailure);
    assert!(error.expected.contains("keyword"));
}

#[test]
fn test_empty_has_no_expectation() {
    let reply = empty::<()>().parse(&Cursor::new("abc"));
    assert!(!reply.consumed());
    assert!(reply.error_ref().unwrap().expected.is_empty());
}

#[test]
fn test_position_and_column() {
    let input = Cursor::new("a\n   b").advance_by(5);
    assert_eq!(position().parse(&input).value(), Some(&input.position()));
    assert_eq!(current_column().parse(&input).value(), Some(&4));
    assert_eq!(indent_level().parse(&input).value(), Some(&4));
    assert!(!current_column().parse(&input).consumed());
}
