//! XXH3-64 streaming accumulator.

use xxhash_rust::xxh3::{Xxh3, xxh3_64};

use super::PartialDigest;

/// A streaming XXH3-64 hasher.
///
/// [`Xxh3Hasher::snapshot`] reads the digest of everything fed so far
/// without consuming the state, so more bytes can be fed afterwards.
#[derive(Clone)]
pub struct Xxh3Hasher {
    state: Xxh3,
}

impl Xxh3Hasher {
    /// Creates a new hasher.
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Feeds more data.
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Returns the digest of all data fed so far.
    pub fn snapshot(&self) -> PartialDigest {
        PartialDigest::new(self.state.digest())
    }

    /// Resets the hasher to its initial state.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Hashes data in one shot.
    pub fn hash(data: &[u8]) -> PartialDigest {
        PartialDigest::new(xxh3_64(data))
    }
}

impl Default for Xxh3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Xxh3Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Xxh3Hasher")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
