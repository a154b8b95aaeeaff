#![no_std]

//! `sortmap`: a dictionary of byte keys kept sorted for binary search.
//!
//! Keys are ordered as unsigned little-endian integers of arbitrary width
//! (see [`compare_keys`]). Lookups and insertions locate their slot by
//! binary search; deletions scan for an exact byte match.
//!
//! ```
//! # use sortmap::SortedMap;
//! let mut map = SortedMap::with_default_capacity().unwrap();
//!
//! map.set(&[5], &[50]).unwrap();
//! map.set(&[1], &[10]).unwrap();
//! map.set(&[3], &[30]).unwrap();
//!
//! let keys: Vec<&[u8]> = map.iter().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec![&[1u8][..], &[3u8][..], &[5u8][..]]);
//! assert_eq!(map.get(&[3]), Some(&[30u8][..]));
//! assert_eq!(map.get(&[4]), None);
//! ```
//!
//! # Slot reuse
//!
//! The entry array only grows. Every entry owns separate key and value
//! allocations, and removing an entry with [`SortedMap::delete`] moves those
//! allocations past the live entries, where the next insertion picks them up
//! again. The `release_*` methods free storage instead.
//!
//! ```
//! # use sortmap::SortedMap;
//! let mut map = SortedMap::with_capacity(4, 0.5).unwrap();
//! map.set(b"key", b"a long value").unwrap();
//! assert!(map.delete(b"key"));
//!
//! map.set(b"other", b"short").unwrap();
//! assert!(map.get_entry(b"other").unwrap().value_capacity() >= 12);
//! ```
//!
//! # Key equality
//!
//! Trailing zero bytes do not change a key's numeric value, so `[0x01]` and
//! `[0x01, 0x00]` name the same entry for `set`, `get` and `contains_key`.
//! `delete` and `release_entry` match exact bytes only.
//!
//! ```
//! # use sortmap::SortedMap;
//! let mut map = SortedMap::with_default_capacity().unwrap();
//! map.set(&[0x01], b"one").unwrap();
//! map.set(&[0x01, 0x00], b"uno").unwrap();
//!
//! assert_eq!(map.len(), 1);
//! assert_eq!(map.get(&[0x01]), Some(&b"uno"[..]));
//! assert!(!map.delete(&[0x01, 0x00]));
//! assert!(map.delete(&[0x01]));
//! ```

extern crate alloc;

mod compare;
mod entry;
mod error;
mod iter;
mod map;

pub use compare::{compare_keys, Location};
pub use entry::Entry;
pub use error::SortedMapError;
pub use growbuf::{BufferError, Source};
pub use iter::SortedMapIter;
pub use map::SortedMap;

/// Entry slots allocated by [`SortedMap::with_default_capacity`].
pub const DEFAULT_INITIAL_COUNT: usize = 30;

/// Growth rate used by [`SortedMap::with_default_capacity`].
pub const DEFAULT_GROWTH_RATE: f32 = 0.5;
