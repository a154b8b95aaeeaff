//! Property-based tests for cursor bookkeeping across growth and shifting.

use growbuf::{ByteBuffer, TextBuffer};
use proptest::prelude::*;

fn seeded(content: &[u8], cursor_pct: f64, capacity: usize, rate: f32) -> ByteBuffer<'static> {
    let mut buffer = ByteBuffer::with_capacity(capacity, rate).unwrap();
    if !content.is_empty() {
        buffer.write_bytes(content).unwrap();
    }
    let cursor = (cursor_pct * content.len() as f64) as usize;
    buffer.set_write_offset(cursor.min(content.len())).unwrap();
    buffer
}

proptest! {
    #[test]
    fn prop_reserve_is_sufficient(
        content in prop::collection::vec(any::<u8>(), 0..64),
        capacity in 0usize..32,
        rate in 0.0f32..2.0,
        additional in 0usize..256,
    ) {
        let mut buffer = seeded(&content, 1.0, capacity.max(content.len()), rate);
        let offset = buffer.reserve(additional).unwrap();

        prop_assert_eq!(offset, buffer.write_offset());
        prop_assert!(buffer.capacity() - buffer.write_offset() >= additional);
        prop_assert!(buffer.capacity() - buffer.len() >= additional);
        prop_assert_eq!(buffer.as_bytes(), &content[..]);
    }

    #[test]
    fn prop_insert_then_delete_restores(
        content in prop::collection::vec(any::<u8>(), 0..64),
        inserted in prop::collection::vec(any::<u8>(), 1..32),
        cursor_pct in 0.0f64..=1.0,
        capacity in 1usize..16,
    ) {
        let mut buffer = seeded(&content, cursor_pct, capacity.max(content.len()), 0.5);
        let cursor = buffer.write_offset();

        buffer.insert_bytes(&inserted).unwrap();
        prop_assert_eq!(buffer.len(), content.len() + inserted.len());
        prop_assert_eq!(&buffer.as_bytes()[cursor..cursor + inserted.len()], &inserted[..]);

        let deleted = buffer.delete_backlog(inserted.len());
        prop_assert_eq!(deleted, inserted.len());
        prop_assert_eq!(buffer.as_bytes(), &content[..]);
        prop_assert_eq!(buffer.write_offset(), cursor);
    }

    #[test]
    fn prop_insert_within_matches_snapshot(
        content in prop::collection::vec(any::<u8>(), 1..64),
        cursor_pct in 0.0f64..=1.0,
        start_pct in 0.0f64..1.0,
        len_pct in 0.0f64..=1.0,
    ) {
        let start = ((start_pct * content.len() as f64) as usize).min(content.len() - 1);
        let max_len = content.len() - start;
        let len = ((len_pct * max_len as f64) as usize).clamp(1, max_len);

        let mut aliased = seeded(&content, cursor_pct, content.len(), 0.5);
        let mut snapshot = seeded(&content, cursor_pct, content.len(), 0.5);
        let copied = content[start..start + len].to_vec();

        aliased.insert_within(start..start + len).unwrap();
        snapshot.insert_bytes(&copied).unwrap();

        prop_assert_eq!(aliased.as_bytes(), snapshot.as_bytes());
        prop_assert_eq!(aliased.write_offset(), snapshot.write_offset());
    }

    #[test]
    fn prop_clear_always_empties(
        content in prop::collection::vec(any::<u8>(), 0..64),
        cursor_pct in 0.0f64..=1.0,
    ) {
        let mut buffer = seeded(&content, cursor_pct, content.len(), 0.5);
        buffer.clear();
        prop_assert_eq!(buffer.len(), 0);
        prop_assert_eq!(buffer.write_offset(), 0);
    }

    #[test]
    fn prop_text_always_terminated(
        pieces in prop::collection::vec("[a-z]{1,6}", 1..12),
        cursors in prop::collection::vec(0.0f64..=1.0, 1..12),
    ) {
        let mut text = TextBuffer::with_capacity(1, 0.5).unwrap();
        let mut model = String::new();

        for (piece, pct) in pieces.iter().zip(cursors.iter().cycle()) {
            let at = ((pct * model.len() as f64) as usize).min(model.len());
            text.set_write_offset(at).unwrap();
            text.insert_str(piece).unwrap();
            model.insert_str(at, piece);

            let with_nul = text.as_bytes_with_nul();
            prop_assert_eq!(with_nul.last(), Some(&0u8));
            prop_assert_eq!(&with_nul[..with_nul.len() - 1], model.as_bytes());
        }
    }
}
