use core::ops::Range;

use crate::error::BufferError;
use crate::growth::GrowthPolicy;
use crate::plain_buffer::PlainBuffer;
use crate::region::Region;
use crate::source::Source;
use crate::{DEFAULT_GROWTH_RATE, DEFAULT_INITIAL_CAPACITY};

/// A growable byte buffer addressed by two cursors.
///
/// `write_offset()` is where the next write lands; `len()` is one past the
/// last used byte. Both are plain offsets from the start of the region, so
/// reallocation never invalidates them.
///
/// Invariant: `write_offset() <= len() <= capacity()`.
#[derive(Debug)]
pub struct ByteBuffer<'a> {
    region: Region<'a>,
    write_pos: usize,
    end_pos: usize,
}

impl ByteBuffer<'static> {
    /// Creates an owned buffer of `min_capacity` bytes that grows by `rate`.
    ///
    /// A `rate` of 0 still allows growth, to exactly the size required.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the initial allocation fails.
    pub fn with_capacity(min_capacity: usize, rate: f32) -> Result<Self, BufferError> {
        Ok(Self {
            region: Region::allocate(min_capacity, GrowthPolicy::from_rate(rate))?,
            write_pos: 0,
            end_pos: 0,
        })
    }

    /// Creates an owned buffer with the default capacity (200) and rate (0.5).
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the initial allocation fails.
    pub fn with_default_capacity() -> Result<Self, BufferError> {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY, DEFAULT_GROWTH_RATE)
    }
}

impl<'a> ByteBuffer<'a> {
    /// Wraps a caller-provided buffer. The buffer is never reallocated nor
    /// freed, and operations that need more room than it has fail.
    #[must_use]
    pub fn from_buffer(buffer: &'a mut [u8]) -> Self {
        Self {
            region: Region::Borrowed(buffer),
            write_pos: 0,
            end_pos: 0,
        }
    }

    /// Switches a borrowed buffer to owned, growable storage of at least
    /// `min_capacity` bytes. Content and cursors are carried over. Owned
    /// buffers are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the new region cannot be allocated.
    pub fn set_auto_expand(&mut self, min_capacity: usize, rate: f32) -> Result<(), BufferError> {
        if !self.region.is_borrowed() {
            return Ok(());
        }
        let capacity = min_capacity.max(self.region.capacity());
        let mut region = Region::allocate(capacity, GrowthPolicy::from_rate(rate))?;
        region.as_mut_slice()[..self.end_pos].copy_from_slice(self.as_bytes());
        self.region = region;
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end_pos
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end_pos == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    #[must_use]
    pub fn write_offset(&self) -> usize {
        self.write_pos
    }

    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        self.region.is_borrowed()
    }

    #[must_use]
    pub fn policy(&self) -> GrowthPolicy {
        self.region.policy()
    }

    /// Growth rate of an owned buffer; `None` when growth is disabled.
    #[must_use]
    pub fn growth_rate(&self) -> Option<f32> {
        self.region.policy().rate()
    }

    /// Changes the growth rate of an owned buffer. Returns `false` for
    /// borrowed buffers, whose size is fixed.
    pub fn set_growth_rate(&mut self, rate: f32) -> bool {
        self.region.set_policy(GrowthPolicy::from_rate(rate))
    }

    /// The used content, `[0, len())`.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.region.as_slice()[..self.end_pos]
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        let end = self.end_pos;
        &mut self.region.as_mut_slice()[..end]
    }

    /// The allocated but unused tail, `[len(), capacity())`.
    ///
    /// Fill it after a `reserve` and publish the bytes with `set_used_size`.
    pub fn unused_mut(&mut self) -> &mut [u8] {
        let end = self.end_pos;
        &mut self.region.as_mut_slice()[end..]
    }

    /// Makes the buffer at least `min_capacity` bytes large.
    ///
    /// # Errors
    ///
    /// - `BufferError::GrowthDisabled` if the buffer is borrowed or fixed
    /// - `BufferError::OutOfMemory` if reallocation fails
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<(), BufferError> {
        self.region.ensure_capacity(min_capacity)
    }

    /// Guarantees `additional` unused bytes past `len()` and returns the
    /// current write offset.
    ///
    /// When growth is needed the buffer asks for `capacity() + additional`
    /// bytes, scaled by its policy.
    ///
    /// # Errors
    ///
    /// - `BufferError::GrowthDisabled` if the buffer is borrowed or fixed and too small
    /// - `BufferError::OutOfMemory` if reallocation fails
    pub fn reserve(&mut self, additional: usize) -> Result<usize, BufferError> {
        let capacity = self.region.capacity();
        let required = self.end_pos.saturating_add(additional);
        if capacity < required {
            if !self.region.policy().allows_growth() {
                return Err(BufferError::GrowthDisabled { required, capacity });
            }
            self.region
                .ensure_capacity(capacity.saturating_add(additional))?;
        }
        Ok(self.write_pos)
    }

    /// Moves the write cursor.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfRange` if `offset > len()`.
    pub fn set_write_offset(&mut self, offset: usize) -> Result<(), BufferError> {
        if offset > self.end_pos {
            return Err(BufferError::OutOfRange {
                offset,
                limit: self.end_pos,
            });
        }
        self.write_pos = offset;
        Ok(())
    }

    /// Forces the used length to `offset`, pulling the write cursor back if
    /// it would end up past it.
    ///
    /// Shrinking acts like a delete at the tail. Growing publishes whatever
    /// bytes sit in the unused region as content; the caller is responsible
    /// for having filled them.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfRange` if `offset >= capacity()`.
    pub fn set_used_size(&mut self, offset: usize) -> Result<(), BufferError> {
        let capacity = self.region.capacity();
        if offset >= capacity {
            return Err(BufferError::OutOfRange {
                offset,
                limit: capacity,
            });
        }
        self.end_pos = offset;
        if self.write_pos > self.end_pos {
            self.write_pos = self.end_pos;
        }
        Ok(())
    }

    /// Deletes up to `count` bytes immediately left of the write cursor and
    /// returns how many were deleted.
    pub fn delete_backlog(&mut self, count: usize) -> usize {
        let count = count.min(self.write_pos);
        if count == 0 {
            return 0;
        }
        if self.write_pos < self.end_pos {
            let (write, end) = (self.write_pos, self.end_pos);
            self.region
                .as_mut_slice()
                .copy_within(write..end, write - count);
        }
        self.write_pos -= count;
        self.end_pos -= count;
        count
    }

    /// Writes `len` bytes at the write cursor, overwriting what is there and
    /// extending `len()` only when the write runs past it. Returns the offset
    /// the run starts at.
    ///
    /// # Errors
    ///
    /// - `BufferError::InvalidArgument` if `len` is 0 or a `Copy` source has another length
    /// - Any error from `reserve`
    pub fn write(&mut self, source: Source<'_>, len: usize) -> Result<usize, BufferError> {
        check_run(&source, len)?;
        let at = self.reserve(len)?;
        source.apply(&mut self.region.as_mut_slice()[at..at + len]);
        self.advance_write(at + len);
        Ok(at)
    }

    /// Overwrites or appends one byte.
    ///
    /// # Errors
    ///
    /// Any error from `reserve`.
    pub fn write_byte(&mut self, byte: u8) -> Result<usize, BufferError> {
        self.write(Source::Fill(byte), 1)
    }

    /// Overwrites or appends a slice.
    ///
    /// # Errors
    ///
    /// Same as `write`.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, BufferError> {
        self.write(Source::Copy(bytes), bytes.len())
    }

    /// Like `write_bytes`, with the bytes taken from `range` of this buffer's
    /// own content. Overlap between `range` and the destination is allowed.
    ///
    /// # Errors
    ///
    /// - `BufferError::OutOfRange` if `range` is not inside `[0, len())`
    /// - `BufferError::InvalidArgument` if `range` is empty
    /// - Any error from `reserve`
    pub fn write_within(&mut self, range: Range<usize>) -> Result<usize, BufferError> {
        let len = self.check_own_range(&range)?;
        let at = self.reserve(len)?;
        self.region.as_mut_slice().copy_within(range, at);
        self.advance_write(at + len);
        Ok(at)
    }

    /// Inserts `len` bytes at the write cursor, shifting the bytes right of
    /// the cursor to make room. `len()` always grows by `len`. Returns the
    /// offset the run starts at.
    ///
    /// # Errors
    ///
    /// - `BufferError::InvalidArgument` if `len` is 0 or a `Copy` source has another length
    /// - Any error from `reserve`
    pub fn insert(&mut self, source: Source<'_>, len: usize) -> Result<usize, BufferError> {
        if self.write_pos >= self.end_pos {
            return self.write(source, len);
        }
        check_run(&source, len)?;
        let at = self.reserve(len)?;
        let end = self.end_pos;
        let bytes = self.region.as_mut_slice();
        bytes.copy_within(at..end, at + len);
        source.apply(&mut bytes[at..at + len]);
        self.write_pos += len;
        self.end_pos += len;
        Ok(at)
    }

    /// Inserts one byte.
    ///
    /// # Errors
    ///
    /// Any error from `reserve`.
    pub fn insert_byte(&mut self, byte: u8) -> Result<usize, BufferError> {
        self.insert(Source::Fill(byte), 1)
    }

    /// Inserts a slice.
    ///
    /// # Errors
    ///
    /// Same as `insert`.
    pub fn insert_bytes(&mut self, bytes: &[u8]) -> Result<usize, BufferError> {
        self.insert(Source::Copy(bytes), bytes.len())
    }

    /// Inserts a copy of `range` of this buffer's own content at the write
    /// cursor.
    ///
    /// The source may lie inside the region about to be shifted. It is first
    /// staged in spare capacity past the used end (so `2 * range.len()` bytes
    /// are reserved), then the tail is shifted and the staged copy is placed.
    ///
    /// # Errors
    ///
    /// - `BufferError::OutOfRange` if `range` is not inside `[0, len())`
    /// - `BufferError::InvalidArgument` if `range` is empty
    /// - Any error from `reserve`
    pub fn insert_within(&mut self, range: Range<usize>) -> Result<usize, BufferError> {
        if self.write_pos >= self.end_pos {
            return self.write_within(range);
        }
        let len = self.check_own_range(&range)?;
        let at = self.reserve(len.saturating_mul(2))?;
        let end = self.end_pos;
        let staging = end + len;
        let bytes = self.region.as_mut_slice();
        bytes.copy_within(range, staging);
        bytes.copy_within(at..end, at + len);
        bytes.copy_within(staging..staging + len, at);
        self.write_pos += len;
        self.end_pos += len;
        Ok(at)
    }

    /// Empties the buffer without giving up capacity.
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.end_pos = 0;
    }

    /// Frees owned storage and empties the buffer. Borrowed buffers are left
    /// untouched. The buffer stays usable: the next write regrows it.
    pub fn release(&mut self) {
        if self.region.is_borrowed() {
            return;
        }
        self.region.release();
        self.clear();
    }

    /// Copies content, cursors and growth policy into a new owned buffer.
    /// A clone of a borrowed buffer keeps its capacity but does not grow.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<ByteBuffer<'static>, BufferError> {
        let mut region = Region::allocate(self.region.capacity(), self.region.policy())?;
        region.as_mut_slice()[..self.end_pos].copy_from_slice(self.as_bytes());
        Ok(ByteBuffer {
            region,
            write_pos: self.write_pos,
            end_pos: self.end_pos,
        })
    }

    /// Copies the used content into a flat, cursor-less buffer.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfMemory` if the copy cannot be allocated.
    pub fn to_plain(&self) -> Result<PlainBuffer, BufferError> {
        PlainBuffer::from_bytes(self.as_bytes())
    }

    /// Writes a zero byte at `len()` if the region has room for it.
    pub(crate) fn put_terminator(&mut self) {
        let end = self.end_pos;
        if let Some(slot) = self.region.as_mut_slice().get_mut(end) {
            *slot = 0;
        }
    }

    /// The whole region, used bytes and spare capacity alike.
    pub(crate) fn region_bytes(&self) -> &[u8] {
        self.region.as_slice()
    }

    pub(crate) fn region_bytes_mut(&mut self) -> &mut [u8] {
        self.region.as_mut_slice()
    }

    fn advance_write(&mut self, new_write: usize) {
        self.write_pos = new_write;
        if self.end_pos < new_write {
            self.end_pos = new_write;
        }
    }

    fn check_own_range(&self, range: &Range<usize>) -> Result<usize, BufferError> {
        if range.end > self.end_pos {
            return Err(BufferError::OutOfRange {
                offset: range.end,
                limit: self.end_pos,
            });
        }
        if range.start >= range.end {
            return Err(BufferError::InvalidArgument {
                reason: "source range is empty",
            });
        }
        Ok(range.end - range.start)
    }
}

fn check_run(source: &Source<'_>, len: usize) -> Result<(), BufferError> {
    if len == 0 {
        return Err(BufferError::InvalidArgument {
            reason: "zero-length write",
        });
    }
    if !source.fits(len) {
        return Err(BufferError::InvalidArgument {
            reason: "source length does not match run length",
        });
    }
    Ok(())
}
