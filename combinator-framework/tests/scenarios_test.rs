//! End-to-end behaviour of the core operations on small inputs.

use combinator_framework::{
    alternative, attempt, indent_block, indent_guard, literal, many, satisfy, sequence, Cursor,
    ErrorKind, Parser, Position, Relation, Reply,
};

#[test]
fn test_literal_prefix_of_input() {
    let (value, rest) = literal("if")
        .parse(&Cursor::new("if x"))
        .into_result()
        .unwrap();
    assert_eq!(value, "if");
    assert_eq!(rest.offset(), 2);
}

#[test]
fn test_literal_inside_longer_word() {
    let (value, rest) = literal("if")
        .parse(&Cursor::new("iffy"))
        .into_result()
        .unwrap();
    assert_eq!(value, "if");
    assert_eq!(rest.remaining().as_str(), "fy");
}

#[test]
fn test_indented_block_of_items() {
    let input = Cursor::new("header:\n  - item\n  - item");
    let header = literal("header:").parse(&input).into_result().unwrap().1;

    // The first item fixes the block's reference column.
    let first = indent_guard(Relation::GreaterThan, 1)
        .parse(&header)
        .into_result()
        .unwrap();
    assert_eq!(first.0, 3);

    let (items, rest) = indent_block(literal("- item"))
        .parse(&header)
        .into_result()
        .unwrap();
    assert_eq!(items, vec!["- item", "- item"]);
    assert!(rest.is_eof());
}

#[test]
fn test_indent_guard_rejects_same_column() {
    let input = Cursor::new("\n  x");
    match indent_guard(Relation::GreaterThan, 3).parse(&input) {
        Reply::Failure { error, consumed } => {
            // The newline and indentation were skipped before the check.
            assert!(consumed);
            assert_eq!(error.position, Position::at(2, 3, 3));
            assert_eq!(error.kind, ErrorKind::IndentationViolation);
            assert_eq!(
                error.expected.iter().collect::<Vec<_>>(),
                vec!["indentation > 3"]
            );
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn test_attempt_lets_second_branch_run() {
    let p = alternative(
        attempt(sequence(literal("a"), literal("b"), |a, b| {
            format!("{a}{b}")
        })),
        literal("ac").map(|s| s.to_string()),
    );
    let (value, rest) = p.parse(&Cursor::new("ac")).into_result().unwrap();
    assert_eq!(value, "ac");
    assert!(rest.is_eof());
}

#[test]
fn test_many_on_empty_input() {
    let input = Cursor::new("");
    let reply = many(satisfy(|c| c.is_ascii_digit(), "digit")).parse(&input);
    match reply {
        Reply::Success {
            value,
            rest,
            consumed,
            ..
        } => {
            assert!(value.is_empty());
            assert_eq!(rest, input);
            assert!(!consumed);
        }
        other => panic!("expected success, got {:?}", other),
    }
}
