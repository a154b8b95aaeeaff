#![no_std]

//! `growbuf`: growable byte and text buffers addressed by cursors.
//!
//! A [`ByteBuffer`] owns one contiguous region (or borrows one from the
//! caller) and tracks two offsets into it: the write cursor, where the next
//! write lands, and the used end, one past the last byte of content.
//!
//! Invariant: `write_offset() <= len() <= capacity()`.
//!
//! Cursors are plain offsets, never addresses, so growing the region keeps
//! them valid without any adjustment.
//!
//! # Overwrite vs. insert
//!
//! `write*` methods overwrite at the cursor and only extend the content when
//! they run past its end. `insert*` methods shift everything right of the
//! cursor and always grow the content.
//!
//! ```
//! # use growbuf::ByteBuffer;
//! let mut buffer = ByteBuffer::with_capacity(8, 0.5).unwrap();
//!
//! buffer.write_bytes(b"AB").unwrap();
//! buffer.set_write_offset(0).unwrap();
//! buffer.insert_bytes(b"XY").unwrap();
//!
//! assert_eq!(buffer.as_bytes(), b"XYAB");
//! assert_eq!(buffer.write_offset(), 2);
//!
//! buffer.write_bytes(b"ab").unwrap(); // overwrites "AB"
//! assert_eq!(buffer.as_bytes(), b"XYab");
//! ```
//!
//! # Fill sources
//!
//! What goes into a run of bytes is described by [`Source`]:
//!
//! ```
//! # use growbuf::{ByteBuffer, Source};
//! let mut buffer = ByteBuffer::with_default_capacity().unwrap();
//! buffer.write(Source::Fill(b'-'), 3).unwrap();
//! buffer.set_write_offset(1).unwrap();
//! buffer.insert(Source::Copy(b"+"), 1).unwrap();
//! assert_eq!(buffer.as_bytes(), b"-+--");
//! ```
//!
//! # Growth
//!
//! Owned buffers grow by a [`GrowthPolicy`]: a request for `n` bytes is
//! scaled to `n * (1 + rate)`. A rate of 0 grows to exactly what is needed.
//! Buffers built on a caller-provided slice never grow and never free it:
//!
//! ```
//! # use growbuf::{BufferError, ByteBuffer};
//! let mut storage = [0u8; 4];
//! let mut buffer = ByteBuffer::from_buffer(&mut storage);
//!
//! buffer.write_bytes(b"abcd").unwrap();
//! assert!(matches!(
//!     buffer.write_byte(b'e'),
//!     Err(BufferError::GrowthDisabled { .. })
//! ));
//! ```
//!
//! # Text
//!
//! [`TextBuffer`] keeps a zero byte after the content at all times and adds
//! formatted insertion:
//!
//! ```
//! # use growbuf::TextBuffer;
//! use core::fmt::Write;
//!
//! let mut text = TextBuffer::with_default_capacity().unwrap();
//! write!(text, "{}-{}", 4, 2).unwrap();
//! assert_eq!(text.to_str().unwrap(), "4-2");
//! assert_eq!(text.as_bytes_with_nul(), b"4-2\0");
//! ```
//!
//! ## `no_std` Compatibility
//!
//! The crate uses `core` and `alloc` only. Enable the optional `std`
//! feature to have the error type implement `std::error::Error` through
//! `thiserror`.

extern crate alloc;

mod byte_buffer;
mod error;
mod growth;
mod plain_buffer;
mod region;
mod source;
mod text_buffer;

pub use byte_buffer::ByteBuffer;
pub use error::BufferError;
pub use growth::GrowthPolicy;
pub use plain_buffer::PlainBuffer;
pub use source::Source;
pub use text_buffer::TextBuffer;

/// Capacity of buffers created with `with_default_capacity`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 200;

/// Growth rate of buffers created with `with_default_capacity`.
pub const DEFAULT_GROWTH_RATE: f32 = 0.5;
