//! In-memory offset hasher.
//!
//! This module implements the core routine: given a buffer and a list of
//! offsets, lazily produce one digest per offset that fits in the buffer.
//!
//! - [`OffsetHasher`] - Holds an [`OffsetConfig`] and starts hashing runs
//! - [`OffsetHashIter`] - Iterator yielding [`OffsetDigest`] pairs
//! - [`hash_at_offsets`] - Free-function form taking offsets and a direction flag
//!
//! # Example
//!
//! ```
//! use trunchash::{Direction, OffsetHasher};
//!
//! let data = vec![0u8; 0x1800];
//! let hasher = OffsetHasher::default();
//!
//! let leading: Vec<_> = hasher.hash(data.clone(), Direction::Leading).collect();
//! assert_eq!(leading.len(), 1);
//! assert_eq!(leading[0].label(), "0x1000");
//! assert_eq!(leading[0].to_hex(), "93d76fe148c689ba");
//! ```

use std::iter::FusedIterator;
use std::sync::Arc;

use bytes::Bytes;

use crate::config::{Direction, OffsetConfig};
use crate::digest::{OffsetDigest, Xxh3Hasher};

/// Starts offset hashing runs over in-memory buffers.
///
/// `OffsetHasher` only holds configuration; every call to
/// [`OffsetHasher::hash`] returns an independent iterator with its own
/// accumulator, so one hasher can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct OffsetHasher {
    config: OffsetConfig,
}

impl OffsetHasher {
    /// Creates a new hasher with the given configuration.
    pub fn new(config: OffsetConfig) -> Self {
        Self { config }
    }

    /// Lazily hashes `data` at each configured offset.
    ///
    /// # Arguments
    ///
    /// * `data` - Any type that can be converted to [`Bytes`]
    /// * `direction` - Whether offsets count from the start or the end
    ///
    /// # Example
    ///
    /// ```
    /// use trunchash::{Direction, OffsetConfig, OffsetHasher};
    ///
    /// let hasher = OffsetHasher::new(OffsetConfig::new(&[4, 8, 64])?);
    /// let offsets: Vec<u64> = hasher
    ///     .hash(&b"0123456789"[..], Direction::Trailing)
    ///     .map(|pair| pair.offset)
    ///     .collect();
    ///
    /// assert_eq!(offsets, vec![4, 8]);
    /// # Ok::<(), trunchash::HashError>(())
    /// ```
    pub fn hash(&self, data: impl Into<Bytes>, direction: Direction) -> OffsetHashIter {
        OffsetHashIter::new(data.into(), self.config.shared_offsets(), direction)
    }

    /// Lazily hashes leading windows `data[..offset]`.
    pub fn leading(&self, data: impl Into<Bytes>) -> OffsetHashIter {
        self.hash(data, Direction::Leading)
    }

    /// Lazily hashes trailing windows `data[len - offset..]`.
    pub fn trailing(&self, data: impl Into<Bytes>) -> OffsetHashIter {
        self.hash(data, Direction::Trailing)
    }

    /// Returns the configuration used by this hasher.
    pub fn config(&self) -> &OffsetConfig {
        &self.config
    }
}

/// Lazily hashes `data` at each of `offsets`, in the order given.
///
/// With `from_start` each digest covers `data[..offset]` and is computed
/// incrementally from the previous one. Without it each digest covers
/// `data[len - offset..]` and is computed from scratch. The sequence ends at
/// the first offset larger than `data`.
///
/// No ordering is enforced on `offsets`: the routine stops at the first
/// offset exceeding the buffer whatever the order. Use
/// [`OffsetConfig::new`] to reject unsorted lists up front.
///
/// A zero offset yields the digest of no bytes in either direction. For
/// trailing hashes this differs from Python-style `data[-0:]` slicing, which
/// would cover the whole buffer.
///
/// # Example
///
/// ```
/// use trunchash::hash_at_offsets;
///
/// let data = vec![b'A'; 0x24321];
/// let offsets: Vec<u64> = hash_at_offsets(data, &trunchash::DEFAULT_OFFSETS, true)
///     .map(|pair| pair.offset)
///     .collect();
///
/// assert_eq!(offsets, vec![0x1000, 0x10000]);
/// ```
pub fn hash_at_offsets(
    data: impl Into<Bytes>,
    offsets: &[u64],
    from_start: bool,
) -> OffsetHashIter {
    OffsetHashIter::new(
        data.into(),
        Arc::from(offsets),
        Direction::from_start(from_start),
    )
}

/// An iterator that yields a digest per offset that fits in the buffer.
///
/// Each digest is computed when requested. The iterator owns the buffer
/// (a cheap [`Bytes`] handle) and, in leading mode, a single accumulator;
/// dropping it part way through has no side effects. It is fused: once an
/// offset exceeds the buffer, it keeps returning `None`.
#[derive(Debug, Clone)]
pub struct OffsetHashIter {
    data: Bytes,
    offsets: Arc<[u64]>,
    position: usize,
    direction: Direction,
    accumulator: Xxh3Hasher,
    last_size: usize,
    finished: bool,
}

impl OffsetHashIter {
    fn new(data: Bytes, offsets: Arc<[u64]>, direction: Direction) -> Self {
        Self {
            data,
            offsets,
            position: 0,
            direction,
            accumulator: Xxh3Hasher::new(),
            last_size: 0,
            finished: false,
        }
    }

    /// Returns the direction of this run.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the number of bytes fed to the accumulator so far.
    ///
    /// Always zero for trailing runs.
    pub fn hashed_len(&self) -> usize {
        self.last_size
    }

    /// Feeds the bytes newly covered by `size` and snapshots the accumulator.
    fn advance_leading(&mut self, size: usize) -> OffsetDigest {
        // An unsorted list can step backwards; nothing is fed in that case
        // and the cursor follows the offset.
        if size > self.last_size {
            self.accumulator.update(&self.data[self.last_size..size]);
        }
        self.last_size = size;

        OffsetDigest::new(size as u64, self.accumulator.snapshot())
    }

    /// Hashes the last `size` bytes from scratch.
    fn hash_trailing(&self, size: usize) -> OffsetDigest {
        let window = &self.data[self.data.len() - size..];
        OffsetDigest::new(size as u64, Xxh3Hasher::hash(window))
    }
}

impl Iterator for OffsetHashIter {
    type Item = OffsetDigest;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(&offset) = self.offsets.get(self.position) else {
            self.finished = true;
            return None;
        };

        if offset > self.data.len() as u64 {
            tracing::trace!(
                offset,
                len = self.data.len(),
                "offset beyond end of data, stopping"
            );
            self.finished = true;
            return None;
        }

        self.position += 1;
        let size = offset as usize;

        let pair = match self.direction {
            Direction::Leading => self.advance_leading(size),
            Direction::Trailing => self.hash_trailing(size),
        };
        tracing::trace!(offset, digest = %pair.digest, direction = ?self.direction, "partial hash");

        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        (0, Some(self.offsets.len() - self.position))
    }
}

impl FusedIterator for OffsetHashIter {}
