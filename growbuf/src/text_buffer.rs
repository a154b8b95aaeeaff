use core::ffi::{CStr, FromBytesUntilNulError};
use core::fmt;
use core::ops::Range;
use core::str::Utf8Error;

use crate::byte_buffer::ByteBuffer;
use crate::error::BufferError;
use crate::source::Source;
use crate::{DEFAULT_GROWTH_RATE, DEFAULT_INITIAL_CAPACITY};

/// A `ByteBuffer` whose used content is always followed by a zero byte.
///
/// Every reservation asks for one byte more than the text needs, and every
/// mutation rewrites the terminator at the new end before returning.
#[derive(Debug)]
pub struct TextBuffer<'a> {
    inner: ByteBuffer<'a>,
}

impl TextBuffer<'static> {
    /// Creates an owned text buffer of at least one byte.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the initial allocation fails.
    pub fn with_capacity(min_capacity: usize, rate: f32) -> Result<Self, BufferError> {
        let mut inner = ByteBuffer::with_capacity(min_capacity.max(1), rate)?;
        inner.put_terminator();
        Ok(Self { inner })
    }

    /// Creates an owned text buffer with the default capacity (200) and rate (0.5).
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the initial allocation fails.
    pub fn with_default_capacity() -> Result<Self, BufferError> {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY, DEFAULT_GROWTH_RATE)
    }
}

impl<'a> TextBuffer<'a> {
    /// Wraps a caller-provided buffer, which must hold at least the terminator.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::InvalidArgument` if `buffer` is empty.
    pub fn from_buffer(buffer: &'a mut [u8]) -> Result<Self, BufferError> {
        if buffer.is_empty() {
            return Err(BufferError::InvalidArgument {
                reason: "text buffer needs room for the terminator",
            });
        }
        let mut inner = ByteBuffer::from_buffer(buffer);
        inner.put_terminator();
        Ok(Self { inner })
    }

    /// Switches a borrowed buffer to owned, growable storage. See
    /// [`ByteBuffer::set_auto_expand`].
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the new region cannot be allocated.
    pub fn set_auto_expand(&mut self, min_capacity: usize, rate: f32) -> Result<(), BufferError> {
        self.inner.set_auto_expand(min_capacity.max(1), rate)?;
        self.inner.put_terminator();
        Ok(())
    }

    /// Length of the text, not counting the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[must_use]
    pub fn write_offset(&self) -> usize {
        self.inner.write_offset()
    }

    #[must_use]
    pub fn growth_rate(&self) -> Option<f32> {
        self.inner.growth_rate()
    }

    pub fn set_growth_rate(&mut self, rate: f32) -> bool {
        self.inner.set_growth_rate(rate)
    }

    #[must_use]
    pub fn as_byte_buffer(&self) -> &ByteBuffer<'a> {
        &self.inner
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// The text followed by its terminator.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.inner.region_bytes()[..=self.inner.len()]
    }

    /// The text as a C string. Text holding an interior zero byte is cut
    /// at that byte.
    ///
    /// # Errors
    ///
    /// Never fails while the terminator invariant holds.
    pub fn as_c_str(&self) -> Result<&CStr, FromBytesUntilNulError> {
        CStr::from_bytes_until_nul(self.as_bytes_with_nul())
    }

    /// # Errors
    ///
    /// Returns the UTF-8 error if the text is not valid UTF-8.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// The text from `offset` to its end, `None` if `offset > len()`.
    ///
    /// The slice borrows the buffer, so it cannot outlive a later growth.
    #[must_use]
    pub fn text_from(&self, offset: usize) -> Option<&[u8]> {
        self.as_bytes().get(offset..)
    }

    /// # Errors
    ///
    /// Same as [`ByteBuffer::ensure_capacity`].
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<(), BufferError> {
        self.inner.ensure_capacity(min_capacity)
    }

    /// Guarantees room for `additional` more characters plus the terminator
    /// and returns the write offset.
    ///
    /// # Errors
    ///
    /// Same as [`ByteBuffer::reserve`].
    pub fn reserve(&mut self, additional: usize) -> Result<usize, BufferError> {
        self.inner.reserve(additional.saturating_add(1))
    }

    /// # Errors
    ///
    /// Returns `BufferError::OutOfRange` if `offset > len()`.
    pub fn set_write_offset(&mut self, offset: usize) -> Result<(), BufferError> {
        self.inner.set_write_offset(offset)
    }

    /// Deletes up to `count` characters left of the write cursor and
    /// returns how many were deleted.
    pub fn delete(&mut self, count: usize) -> usize {
        let deleted = self.inner.delete_backlog(count);
        if deleted > 0 {
            self.inner.put_terminator();
        }
        deleted
    }

    /// Inserts one character at the write cursor and returns its offset.
    ///
    /// # Errors
    ///
    /// Same as [`ByteBuffer::reserve`].
    pub fn insert_char(&mut self, character: u8) -> Result<usize, BufferError> {
        self.reserve(1)?;
        let at = self.inner.insert_byte(character)?;
        self.inner.put_terminator();
        Ok(at)
    }

    /// Inserts `len` characters described by `source` and returns the offset
    /// of the first one.
    ///
    /// # Errors
    ///
    /// Same as [`ByteBuffer::insert`].
    pub fn insert_fill(&mut self, source: Source<'_>, len: usize) -> Result<usize, BufferError> {
        if len == 0 {
            return Err(BufferError::InvalidArgument {
                reason: "zero-length write",
            });
        }
        self.reserve(len)?;
        let at = self.inner.insert(source, len)?;
        self.inner.put_terminator();
        Ok(at)
    }

    /// # Errors
    ///
    /// Same as [`ByteBuffer::insert`].
    pub fn insert_bytes(&mut self, bytes: &[u8]) -> Result<usize, BufferError> {
        self.insert_fill(Source::Copy(bytes), bytes.len())
    }

    /// # Errors
    ///
    /// Same as [`ByteBuffer::insert`].
    pub fn insert_str(&mut self, text: &str) -> Result<usize, BufferError> {
        self.insert_bytes(text.as_bytes())
    }

    /// Inserts a copy of `range` of the text itself at the write cursor.
    ///
    /// # Errors
    ///
    /// Same as [`ByteBuffer::insert_within`].
    pub fn insert_within(&mut self, range: Range<usize>) -> Result<usize, BufferError> {
        if range.end > self.len() || range.start >= range.end {
            // Let the engine report the precise error without growing first.
            return self.inner.insert_within(range);
        }
        self.reserve((range.end - range.start).saturating_mul(2))?;
        let at = self.inner.insert_within(range)?;
        self.inner.put_terminator();
        Ok(at)
    }

    /// Inserts formatted text at the write cursor and returns its offset.
    ///
    /// The output length is measured with a dry run first, the gap is opened
    /// once, and the text is formatted straight into it. Empty output leaves
    /// the buffer unchanged.
    ///
    /// ```
    /// # use growbuf::TextBuffer;
    /// let mut text = TextBuffer::with_default_capacity().unwrap();
    /// text.insert_str("total: ").unwrap();
    /// text.insert_fmt(format_args!("{}", 42)).unwrap();
    /// assert_eq!(text.as_bytes(), b"total: 42");
    /// assert_eq!(text.as_bytes_with_nul().last(), Some(&0));
    /// ```
    ///
    /// # Errors
    ///
    /// - `BufferError::InvalidArgument` if a `Display` impl fails or produces
    ///   different output on the second pass; the buffer is restored
    /// - Any error from `reserve`
    pub fn insert_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<usize, BufferError> {
        let mut counter = LengthCounter(0);
        fmt::write(&mut counter, args).map_err(|_| BufferError::InvalidArgument {
            reason: "formatting failed",
        })?;
        let len = counter.0;
        if len == 0 {
            return Ok(self.write_offset());
        }

        self.reserve(len)?;
        let at = self.inner.insert(Source::Skip, len)?;
        let mut writer = SliceWriter {
            buf: &mut self.inner.region_bytes_mut()[at..at + len],
            pos: 0,
        };
        let complete = fmt::write(&mut writer, args).is_ok() && writer.pos == len;
        if !complete {
            self.inner.delete_backlog(len);
            self.inner.put_terminator();
            return Err(BufferError::InvalidArgument {
                reason: "formatted output changed between passes",
            });
        }
        self.inner.put_terminator();
        Ok(at)
    }

    /// Empties the text without giving up capacity.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.inner.put_terminator();
    }

    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<TextBuffer<'static>, BufferError> {
        let mut inner = self.inner.try_clone()?;
        inner.put_terminator();
        Ok(TextBuffer { inner })
    }
}

impl fmt::Write for TextBuffer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if s.is_empty() {
            return Ok(());
        }
        self.insert_str(s).map(|_| ()).map_err(|_| fmt::Error)
    }
}

struct LengthCounter(usize);

impl fmt::Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

struct SliceWriter<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos + s.len();
        let dest = self.buf.get_mut(self.pos..end).ok_or(fmt::Error)?;
        dest.copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}
