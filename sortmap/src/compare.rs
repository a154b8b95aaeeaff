//! Key ordering.

use core::cmp::Ordering;

/// Compares two keys as unsigned little-endian integers of arbitrary width.
///
/// Bytes are compared from the highest index covered by either key down to
/// index 0. A position past the end of the shorter key reads as zero, so
/// trailing zero bytes do not change a key's value: `[0x01]` and
/// `[0x01, 0x00]` compare equal and address the same map entry.
///
/// ```
/// # use core::cmp::Ordering;
/// # use sortmap::compare_keys;
/// assert_eq!(compare_keys(&[0x00, 0x01], &[0xff]), Ordering::Greater);
/// assert_eq!(compare_keys(&[0x01], &[0x01, 0x00]), Ordering::Equal);
/// ```
#[must_use]
pub fn compare_keys(a: &[u8], b: &[u8]) -> Ordering {
    let width = a.len().max(b.len());
    for index in (0..width).rev() {
        let x = a.get(index).copied().unwrap_or(0);
        let y = b.get(index).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => {}
            decided => return decided,
        }
    }
    Ordering::Equal
}

/// Result of a binary search over the live entries.
///
/// When `ordering` is `Equal`, `index` is the matching entry. Otherwise the
/// key is absent and `ordering` tells on which side of the entry at `index`
/// it belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Entry the search stopped at.
    pub index: usize,
    /// How the searched key compares to the key at `index`.
    pub ordering: Ordering,
}

impl Location {
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.ordering == Ordering::Equal
    }

    /// Index at which an absent key would be inserted.
    #[must_use]
    pub fn insertion_index(&self) -> usize {
        match self.ordering {
            Ordering::Greater => self.index + 1,
            Ordering::Less | Ordering::Equal => self.index,
        }
    }
}
