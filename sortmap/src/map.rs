use alloc::vec::Vec;
use core::cmp::Ordering;

use growbuf::{BufferError, GrowthPolicy, Source};

use crate::compare::{compare_keys, Location};
use crate::entry::Entry;
use crate::error::SortedMapError;
use crate::iter::SortedMapIter;

/// A dictionary of byte keys kept in ascending [`compare_keys`] order.
///
/// Storage is an array of entries whose length is the capacity. The first
/// [`len`](SortedMap::len) entries are live; the rest are retired slots whose
/// key/value allocations are reused by later insertions.
#[derive(Debug)]
pub struct SortedMap {
    entries: Vec<Entry>,
    count: usize,
    policy: GrowthPolicy,
}

impl SortedMap {
    /// Creates a map with room for `min_count` entries, growing the entry
    /// array by `rate` when it fills up.
    ///
    /// # Errors
    ///
    /// Returns `SortedMapError::Storage` if the entry array cannot be allocated.
    pub fn with_capacity(min_count: usize, rate: f32) -> Result<Self, SortedMapError> {
        Self::with_policy(min_count, GrowthPolicy::from_rate(rate))
    }

    /// Creates a map with [`DEFAULT_INITIAL_COUNT`](crate::DEFAULT_INITIAL_COUNT)
    /// slots and [`DEFAULT_GROWTH_RATE`](crate::DEFAULT_GROWTH_RATE).
    ///
    /// # Errors
    ///
    /// Returns `SortedMapError::Storage` if the entry array cannot be allocated.
    pub fn with_default_capacity() -> Result<Self, SortedMapError> {
        Self::with_capacity(crate::DEFAULT_INITIAL_COUNT, crate::DEFAULT_GROWTH_RATE)
    }

    fn with_policy(min_count: usize, policy: GrowthPolicy) -> Result<Self, SortedMapError> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(min_count)
            .map_err(|_| BufferError::OutOfMemory {
                requested: min_count,
            })?;
        entries.resize_with(min_count, Entry::default);
        Ok(SortedMap {
            entries,
            count: 0,
            policy,
        })
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of entry slots, live and retired.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of slots past the live entries.
    #[must_use]
    pub fn retired(&self) -> usize {
        self.entries.len() - self.count
    }

    /// Growth rate of the entry array.
    #[must_use]
    pub fn growth_rate(&self) -> Option<f32> {
        self.policy.rate()
    }

    /// Changes the growth rate used for later entry-array growth.
    pub fn set_growth_rate(&mut self, rate: f32) {
        self.policy = GrowthPolicy::from_rate(rate);
    }

    /// Ensures at least `min` entry slots exist.
    ///
    /// # Errors
    ///
    /// Returns `SortedMapError::Storage` if the entry array cannot grow.
    pub fn ensure_capacity(&mut self, min: usize) -> Result<(), SortedMapError> {
        self.policy.grow_vec(&mut self.entries, min)?;
        Ok(())
    }

    /// Ensures `additional` more entries can be inserted without growing
    /// the entry array. When it must grow, it grows to `capacity() + additional`
    /// scaled by the growth rate.
    ///
    /// # Errors
    ///
    /// Returns `SortedMapError::Storage` if the entry array cannot grow.
    pub fn reserve(&mut self, additional: usize) -> Result<(), SortedMapError> {
        if self.entries.len() - self.count >= additional {
            return Ok(());
        }
        let min = self
            .entries
            .len()
            .checked_add(additional)
            .ok_or(BufferError::OutOfMemory {
                requested: additional,
            })?;
        self.ensure_capacity(min)
    }

    /// Binary search for `key` over the live entries.
    ///
    /// An empty map reports index 0 with `Ordering::Less`.
    #[must_use]
    pub fn locate(&self, key: &[u8]) -> Location {
        let mut location = Location {
            index: 0,
            ordering: Ordering::Less,
        };
        let mut low = 0;
        let mut high = self.count;
        while low < high {
            let mid = low + (high - low) / 2;
            let ordering = compare_keys(key, self.entries[mid].key());
            location = Location {
                index: mid,
                ordering,
            };
            match ordering {
                Ordering::Less => high = mid,
                Ordering::Greater => low = mid + 1,
                Ordering::Equal => break,
            }
        }
        location
    }

    /// Stores `value` under `key`, replacing any value already stored under
    /// an equal key. Returns the stored value.
    ///
    /// # Errors
    ///
    /// See [`set_with`](SortedMap::set_with).
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<&mut [u8], SortedMapError> {
        self.set_with(key, Source::Copy(value), value.len())
    }

    /// Stores a value of `len` bytes taken from `source` under `key`.
    ///
    /// An existing entry keeps its key bytes and has its value storage grown
    /// as needed; bytes beyond the old allocation start as zero, which is
    /// what `Source::Skip` leaves in them. A new entry takes the first
    /// retired slot, reusing its allocations, and is rotated into sorted
    /// position. On error the map is unchanged.
    ///
    /// # Errors
    ///
    /// - `SortedMapError::InvalidKey` if `key` is empty
    /// - `SortedMapError::Storage` with `InvalidArgument` if a `Copy` source
    ///   is not `len` bytes long
    /// - `SortedMapError::Storage` if the entry array or the entry's storage
    ///   cannot grow
    pub fn set_with(
        &mut self,
        key: &[u8],
        source: Source<'_>,
        len: usize,
    ) -> Result<&mut [u8], SortedMapError> {
        if key.is_empty() {
            return Err(SortedMapError::InvalidKey {
                reason: "empty key",
            });
        }
        if !source.fits(len) {
            return Err(BufferError::InvalidArgument {
                reason: "source length does not match value length",
            }
            .into());
        }

        let location = self.locate(key);
        let index = if location.is_found() {
            self.entries[location.index].fit_value(len)?;
            location.index
        } else {
            self.reserve(1)?;
            let spare = &mut self.entries[self.count];
            spare.fit(key.len(), len)?;
            spare.assign_key(key);

            let index = location.insertion_index();
            self.entries[index..=self.count].rotate_right(1);
            self.count += 1;
            index
        };

        let entry = &mut self.entries[index];
        entry.assign_value(source, len);
        Ok(entry.value_mut())
    }

    /// Value stored under a key equal to `key`.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.get_entry(key).map(Entry::value)
    }

    /// Mutable view of the value stored under a key equal to `key`.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut [u8]> {
        let location = self.locate(key);
        if location.is_found() {
            Some(self.entries[location.index].value_mut())
        } else {
            None
        }
    }

    #[must_use]
    pub fn get_entry(&self, key: &[u8]) -> Option<&Entry> {
        let location = self.locate(key);
        if location.is_found() {
            Some(&self.entries[location.index])
        } else {
            None
        }
    }

    /// Live entry at `index` in ascending key order.
    #[must_use]
    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.entries().get(index)
    }

    /// The live entries in ascending key order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries[..self.count]
    }

    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.locate(key).is_found()
    }

    /// Whether any live entry holds exactly `value`. Values are not indexed,
    /// so this is a linear scan.
    #[must_use]
    pub fn contains_value(&self, value: &[u8]) -> bool {
        self.entries().iter().any(|entry| entry.value() == value)
    }

    /// Removes the entry whose key bytes are exactly `key`.
    ///
    /// Matching is byte-for-byte, not by [`compare_keys`], so `[0x01, 0x00]`
    /// does not remove an entry stored as `[0x01]`. The removed entry's
    /// allocations move to the first retired slot for reuse.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        let Some(index) = self.entries().iter().position(|entry| entry.key() == key) else {
            return false;
        };
        self.entries[index..self.count].rotate_left(1);
        self.count -= 1;
        true
    }

    /// Removes every entry. Allocations are kept for reuse.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Removes the entry whose key bytes are exactly `key` and frees its
    /// allocations. The scan covers every live entry.
    pub fn release_entry(&mut self, key: &[u8]) -> bool {
        let mut released = false;
        let mut index = 0;
        while index < self.count {
            if self.entries[index].key() == key {
                self.entries[index].release();
                self.entries[index..self.count].rotate_left(1);
                self.count -= 1;
                released = true;
            }
            index += 1;
        }
        released
    }

    /// Frees the key/value allocations of every slot, retired ones included.
    /// The entry array is kept.
    pub fn release_all_entries(&mut self) {
        let allocated = self.entries.iter().filter(|entry| entry.is_allocated()).count();
        for entry in &mut self.entries {
            entry.release();
        }
        self.count = 0;
        log::debug!("released storage of {} map entries", allocated);
    }

    /// Frees every allocation including the entry array, leaving a map with
    /// capacity 0 that grows again on the next insertion.
    pub fn release_storage(&mut self) {
        self.release_all_entries();
        self.entries = Vec::new();
    }

    /// Copies every entry of `source` into this map. Keys already present
    /// are overwritten only when `overwrite` is set.
    ///
    /// # Errors
    ///
    /// Stops at the first entry that cannot be stored and returns its error.
    /// Entries merged before it stay merged.
    pub fn merge(&mut self, source: &SortedMap, overwrite: bool) -> Result<(), SortedMapError> {
        for entry in source.entries() {
            if overwrite || !self.contains_key(entry.key()) {
                let stored = self.set(entry.key(), entry.value()).map(|_| ());
                if let Err(err) = stored {
                    log::debug!("merge aborted with {} entries in destination: {}", self.count, err);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Builds an independent map with the same capacity and growth policy
    /// holding the same entries.
    ///
    /// # Errors
    ///
    /// Returns `SortedMapError::Storage` if any allocation fails.
    pub fn try_clone(&self) -> Result<SortedMap, SortedMapError> {
        let mut clone = Self::with_policy(self.entries.len(), self.policy)?;
        for entry in self.entries() {
            clone.set(entry.key(), entry.value())?;
        }
        Ok(clone)
    }

    #[must_use]
    pub fn iter(&self) -> SortedMapIter<'_> {
        SortedMapIter::new(self.entries())
    }
}
