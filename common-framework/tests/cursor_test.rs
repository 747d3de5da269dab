use common_framework::{Cursor, Position};
use proptest::prelude::*;

#[test]
fn test_cursor_new() {
    let cursor = Cursor::new("hello");
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.position(), Position::new());
    assert!(!cursor.is_eof());
}

#[test]
fn test_cursor_peek() {
    let cursor = Cursor::new("hello");
    assert_eq!(cursor.peek(), Some('h'));
    assert_eq!(cursor.offset(), 0); // Should not advance
}

#[test]
fn test_cursor_advance_returns_new_cursor() {
    let cursor = Cursor::new("hello");
    let next = cursor.advance();
    assert_eq!(cursor.offset(), 0);
    assert_eq!(next.offset(), 1);
    assert_eq!(next.column(), 2);
    assert_eq!(next.peek(), Some('e'));
}

#[test]
fn test_cursor_is_eof() {
    let cursor = Cursor::new("hi");
    assert!(!cursor.is_eof());
    let cursor = cursor.advance();
    assert!(!cursor.is_eof());
    let cursor = cursor.advance();
    assert!(cursor.is_eof());
    assert_eq!(cursor.peek(), None);
}

#[test]
fn test_cursor_advance_at_eof_is_unchanged() {
    let cursor = Cursor::new("");
    assert!(cursor.is_eof());
    assert_eq!(cursor.advance(), cursor);
}

#[test]
fn test_cursor_position_tracking() {
    let cursor = Cursor::new("a\nb\nc");

    // First line
    assert_eq!(cursor.line(), 1);
    assert_eq!(cursor.column(), 1);
    let cursor = cursor.advance(); // 'a'
    assert_eq!(cursor.line(), 1);
    assert_eq!(cursor.column(), 2);

    // Newline
    let cursor = cursor.advance(); // '\n'
    assert_eq!(cursor.line(), 2);
    assert_eq!(cursor.column(), 1);

    // Second line
    let cursor = cursor.advance(); // 'b'
    assert_eq!(cursor.line(), 2);
    assert_eq!(cursor.column(), 2);
}

#[test]
fn test_cursor_crlf_is_one_line_break() {
    let cursor = Cursor::new("a\r\n  b").advance_by(5);
    assert_eq!(cursor.peek(), Some('b'));
    assert_eq!(cursor.line(), 2);
    assert_eq!(cursor.column(), 3);
}

#[test]
fn test_cursor_advance_by_beyond_eof() {
    let cursor = Cursor::new("hi").advance_by(10);
    assert!(cursor.is_eof());
    assert_eq!(cursor.offset(), 2);
}

#[test]
fn test_cursor_remaining() {
    let cursor = Cursor::new("hello world").advance_by(6);
    assert_eq!(cursor.remaining(), "world");
}

#[test]
fn test_cursor_slice() {
    let cursor = Cursor::new("hello world");
    assert_eq!(cursor.slice(0, 5), "hello");
    assert_eq!(cursor.slice(6, 100), "world");
    assert_eq!(cursor.slice(4, 2), "");
}

#[test]
fn test_cursor_slice_to() {
    let start = Cursor::new("let x = 1").advance_by(4);
    let end = start.advance_by(3);
    assert_eq!(start.slice_to(&end), "x =");
}

#[test]
fn test_cursor_starts_with() {
    let cursor = Cursor::new("iffy");
    assert!(cursor.starts_with("if"));
    assert!(!cursor.starts_with("then"));
}

#[test]
fn test_cursor_unicode_chinese() {
    let cursor = Cursor::new("你好世界");
    assert_eq!(cursor.peek(), Some('你'));
    let cursor = cursor.advance();
    assert_eq!(cursor.peek(), Some('好'));
    assert_eq!(cursor.column(), 2);
    assert_eq!(cursor.offset(), 3);
}

#[test]
fn test_cursor_unicode_emoji() {
    let cursor = Cursor::new("😀🎉🚀").advance();
    assert_eq!(cursor.peek(), Some('🎉'));
    assert_eq!(cursor.column(), 2);
}

#[test]
fn test_cursor_equality_is_positional() {
    let a = Cursor::new("abc").advance();
    let b = Cursor::new("abc").advance_by(1);
    assert_eq!(a, b);
    assert_ne!(a, b.advance());
}

proptest! {
    /// Walking the cursor one character at a time agrees with deriving the
    /// position from the byte offset.
    #[test]
    fn cursor_position_matches_offset_scan(input in "[a-c \\t\\r\\n]{0,64}") {
        let mut cursor = Cursor::new(input.clone());
        while !cursor.is_eof() {
            cursor = cursor.advance();
            prop_assert_eq!(cursor.position(), Position::from_offset(&input, cursor.offset()));
        }
    }
}
