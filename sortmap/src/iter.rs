use core::slice;

use crate::entry::Entry;
use crate::map::SortedMap;

/// Iterator over the key/value pairs of a `SortedMap` in ascending key order
pub struct SortedMapIter<'a> {
    entries: slice::Iter<'a, Entry>,
}

impl<'a> SortedMapIter<'a> {
    pub(crate) fn new(entries: &'a [Entry]) -> Self {
        SortedMapIter {
            entries: entries.iter(),
        }
    }
}

impl<'a> Iterator for SortedMapIter<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|entry| (entry.key(), entry.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl DoubleEndedIterator for SortedMapIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries
            .next_back()
            .map(|entry| (entry.key(), entry.value()))
    }
}

impl ExactSizeIterator for SortedMapIter<'_> {}

impl<'a> IntoIterator for &'a SortedMap {
    type Item = (&'a [u8], &'a [u8]);
    type IntoIter = SortedMapIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
