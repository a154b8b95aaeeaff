use core::fmt::Write;

use growbuf::{BufferError, Source, TextBuffer};

#[test]
fn test_new_text_is_terminated() {
    let text = TextBuffer::with_capacity(8, 0.5).unwrap();

    assert!(text.is_empty());
    assert_eq!(text.as_bytes(), b"");
    assert_eq!(text.as_bytes_with_nul(), b"\0");
}

#[test]
fn test_zero_capacity_still_holds_terminator() {
    let text = TextBuffer::with_capacity(0, 0.5).unwrap();
    assert_eq!(text.capacity(), 1);
    assert_eq!(text.as_bytes_with_nul(), b"\0");
}

#[test]
fn test_insert_fmt_into_empty() {
    let mut text = TextBuffer::with_default_capacity().unwrap();

    let offset = text.insert_fmt(format_args!("{}", 42)).unwrap();

    assert_eq!(offset, 0);
    assert_eq!(text.as_bytes(), b"42");
    assert_eq!(text.len(), 2);
    assert_eq!(text.as_bytes_with_nul(), b"42\0");
}

#[test]
fn test_insert_fmt_mid_text() {
    let mut text = TextBuffer::with_capacity(4, 0.5).unwrap();
    text.insert_str("[]").unwrap();
    text.set_write_offset(1).unwrap();

    let offset = text.insert_fmt(format_args!("{}:{}", "key", 7)).unwrap();

    assert_eq!(offset, 1);
    assert_eq!(text.to_str().unwrap(), "[key:7]");
    assert_eq!(text.write_offset(), 6);
    assert_eq!(text.as_bytes_with_nul().last(), Some(&0));
}

#[test]
fn test_insert_fmt_empty_output_is_noop() {
    let mut text = TextBuffer::with_capacity(4, 0.5).unwrap();
    text.insert_str("ab").unwrap();

    let offset = text.insert_fmt(format_args!("{}", "")).unwrap();

    assert_eq!(offset, 2);
    assert_eq!(text.as_bytes(), b"ab");
}

#[test]
fn test_write_macro() {
    let mut text = TextBuffer::with_capacity(2, 0.5).unwrap();

    write!(text, "{}+{}={}", 1, 2, 3).unwrap();
    assert_eq!(text.to_str().unwrap(), "1+2=3");

    text.set_write_offset(0).unwrap();
    write!(text, ">").unwrap();
    assert_eq!(text.to_str().unwrap(), ">1+2=3");
}

#[test]
fn test_insert_char_keeps_terminator() {
    let mut text = TextBuffer::with_capacity(1, 0.0).unwrap();

    text.insert_char(b'b').unwrap();
    text.set_write_offset(0).unwrap();
    text.insert_char(b'a').unwrap();

    assert_eq!(text.as_bytes_with_nul(), b"ab\0");
    assert!(text.capacity() >= 3);
}

#[test]
fn test_insert_fill() {
    let mut text = TextBuffer::with_default_capacity().unwrap();
    text.insert_str("[]").unwrap();
    text.set_write_offset(1).unwrap();

    text.insert_fill(Source::Fill(b'*'), 3).unwrap();

    assert_eq!(text.as_bytes_with_nul(), b"[***]\0");
}

#[test]
fn test_insert_empty_is_rejected() {
    let mut text = TextBuffer::with_default_capacity().unwrap();
    assert_eq!(
        text.insert_str("").unwrap_err(),
        BufferError::InvalidArgument {
            reason: "zero-length write"
        }
    );
}

#[test]
fn test_delete_rewrites_terminator() {
    let mut text = TextBuffer::with_default_capacity().unwrap();
    text.insert_str("hello world").unwrap();

    assert_eq!(text.delete(6), 6);

    assert_eq!(text.as_bytes_with_nul(), b"hello\0");
}

#[test]
fn test_delete_mid_text() {
    let mut text = TextBuffer::with_default_capacity().unwrap();
    text.insert_str("abcdef").unwrap();
    text.set_write_offset(3).unwrap();

    assert_eq!(text.delete(2), 2);

    assert_eq!(text.as_bytes_with_nul(), b"adef\0");
    assert_eq!(text.write_offset(), 1);
}

#[test]
fn test_clear_text() {
    let mut text = TextBuffer::with_default_capacity().unwrap();
    text.insert_str("something").unwrap();

    text.clear();

    assert_eq!(text.len(), 0);
    assert_eq!(text.as_bytes_with_nul(), b"\0");
}

#[test]
fn test_reserve_counts_terminator() {
    let mut text = TextBuffer::with_capacity(4, 0.0).unwrap();
    text.insert_str("abc").unwrap();

    text.reserve(2).unwrap();

    assert!(text.capacity() >= text.len() + 3);
}

#[test]
fn test_borrowed_text_full() {
    let mut storage = [0xffu8; 4];
    let mut text = TextBuffer::from_buffer(&mut storage).unwrap();

    text.insert_str("abc").unwrap();
    assert_eq!(text.as_bytes_with_nul(), b"abc\0");

    // the fourth byte is reserved for the terminator
    assert!(matches!(
        text.insert_char(b'd'),
        Err(BufferError::GrowthDisabled { .. })
    ));
    assert_eq!(text.as_bytes_with_nul(), b"abc\0");
}

#[test]
fn test_borrowed_text_needs_room() {
    let mut storage = [0u8; 0];
    assert!(matches!(
        TextBuffer::from_buffer(&mut storage),
        Err(BufferError::InvalidArgument { .. })
    ));
}

#[test]
fn test_set_auto_expand_text() {
    let mut storage = [0u8; 3];
    let mut text = TextBuffer::from_buffer(&mut storage).unwrap();
    text.insert_str("ab").unwrap();

    text.set_auto_expand(4, 0.5).unwrap();
    text.insert_str("cdef").unwrap();

    assert_eq!(text.to_str().unwrap(), "abcdef");
}

#[test]
fn test_insert_within_text() {
    let mut text = TextBuffer::with_capacity(4, 0.5).unwrap();
    text.insert_str("abc").unwrap();
    text.set_write_offset(1).unwrap();

    text.insert_within(0..3).unwrap();

    assert_eq!(text.as_bytes_with_nul(), b"aabcbc\0");
}

#[test]
fn test_insert_within_text_rejects_bad_range() {
    let mut text = TextBuffer::with_capacity(4, 0.5).unwrap();
    text.insert_str("abc").unwrap();

    assert!(matches!(
        text.insert_within(2..9),
        Err(BufferError::OutOfRange { offset: 9, limit: 3 })
    ));
    assert_eq!(text.capacity(), 4);
}

#[test]
fn test_c_str_view() {
    let mut text = TextBuffer::with_default_capacity().unwrap();
    text.insert_str("c-compatible").unwrap();

    let c_str = text.as_c_str().unwrap();
    assert_eq!(c_str.to_bytes(), b"c-compatible");
}

#[test]
fn test_text_from_offset() {
    let mut text = TextBuffer::with_default_capacity().unwrap();
    text.insert_str("prefix:value").unwrap();

    assert_eq!(text.text_from(7), Some(&b"value"[..]));
    assert_eq!(text.text_from(12), Some(&b""[..]));
    assert_eq!(text.text_from(13), None);
}

#[test]
fn test_try_clone_text() {
    let mut text = TextBuffer::with_capacity(8, 0.5).unwrap();
    text.insert_str("copy").unwrap();

    let mut copy = text.try_clone().unwrap();
    copy.insert_str("!").unwrap();

    assert_eq!(copy.as_bytes_with_nul(), b"copy!\0");
    assert_eq!(text.as_bytes_with_nul(), b"copy\0");
}

#[test]
fn test_as_byte_buffer_view() {
    let mut text = TextBuffer::with_default_capacity().unwrap();
    text.insert_str("view").unwrap();

    let bytes = text.as_byte_buffer();
    assert_eq!(bytes.as_bytes(), b"view");
    assert_eq!(bytes.write_offset(), 4);
}
