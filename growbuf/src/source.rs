/// What to put into a run of bytes being written or inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'s> {
    /// Fill the run with zeroes.
    Zero,
    /// Leave whatever bytes are already in the run.
    Skip,
    /// Fill the run with one repeated byte.
    Fill(u8),
    /// Copy the run from a slice of exactly the run's length.
    Copy(&'s [u8]),
}

impl Source<'_> {
    /// Whether this source can fill a run of `len` bytes: a `Copy` source
    /// must have exactly that length.
    #[must_use]
    pub fn fits(&self, len: usize) -> bool {
        match self {
            Source::Copy(bytes) => bytes.len() == len,
            Source::Zero | Source::Skip | Source::Fill(_) => true,
        }
    }

    /// Writes the source into `dest`.
    ///
    /// # Panics
    ///
    /// Panics if `fits(dest.len())` is false.
    pub fn apply(&self, dest: &mut [u8]) {
        match self {
            Source::Zero => dest.fill(0),
            Source::Skip => {}
            Source::Fill(byte) => dest.fill(*byte),
            Source::Copy(bytes) => dest.copy_from_slice(bytes),
        }
    }
}
