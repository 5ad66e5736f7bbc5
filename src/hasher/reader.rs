//! Reader-backed offset hashing.
//!
//! These iterators produce the same pairs as [`super::OffsetHasher`] without
//! buffering the whole input: leading digests are streamed from any
//! [`Read`], trailing digests seek to each window of a [`Read`] + [`Seek`]
//! source.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use trunchash::{LeadingHashReader, OffsetConfig};
//!
//! let data = vec![0u8; 0x1800];
//! let pairs = LeadingHashReader::new(Cursor::new(data), &OffsetConfig::default())?
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].to_hex(), "93d76fe148c689ba");
//! # Ok::<(), trunchash::HashError>(())
//! ```

use std::io::{self, Read, Seek, SeekFrom};
use std::iter::FusedIterator;
use std::sync::Arc;

use super::READ_BUFFER_SIZE;
use crate::config::OffsetConfig;
use crate::digest::{OffsetDigest, PartialDigest, Xxh3Hasher};
use crate::error::HashError;

/// Streams leading digests from a reader.
///
/// Bytes are read in 8 KiB steps and fed to one accumulator; a digest is
/// taken each time the running length reaches an offset. Reaching end of
/// input before an offset ends the sequence without a partial digest.
///
/// A stream cannot be rewound, so offsets must be strictly ascending.
pub struct LeadingHashReader<R> {
    reader: R,
    offsets: Arc<[u64]>,
    position: usize,
    accumulator: Xxh3Hasher,
    consumed: u64,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: Read> LeadingHashReader<R> {
    /// Creates a leading digest iterator over `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidConfig`] if the offsets do not pass
    /// [`OffsetConfig::validate`].
    pub fn new(reader: R, config: &OffsetConfig) -> Result<Self, HashError> {
        config.validate()?;

        Ok(Self {
            reader,
            offsets: config.shared_offsets(),
            position: 0,
            accumulator: Xxh3Hasher::new(),
            consumed: 0,
            buffer: vec![0u8; READ_BUFFER_SIZE],
            finished: false,
        })
    }

    /// Returns the number of bytes read and hashed so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Consumes the iterator, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads and hashes until `target` bytes have been consumed.
    ///
    /// Returns `Ok(false)` if the input ends first.
    fn fill_to(&mut self, target: u64) -> io::Result<bool> {
        while self.consumed < target {
            let want = (target - self.consumed).min(self.buffer.len() as u64) as usize;
            match self.reader.read(&mut self.buffer[..want]) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    self.accumulator.update(&self.buffer[..n]);
                    self.consumed += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }
}

impl<R: Read> Iterator for LeadingHashReader<R> {
    type Item = Result<OffsetDigest, HashError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(&offset) = self.offsets.get(self.position) else {
            self.finished = true;
            return None;
        };

        match self.fill_to(offset) {
            Ok(true) => {
                self.position += 1;
                let digest = self.accumulator.snapshot();
                tracing::trace!(offset, %digest, "leading partial hash");
                Some(Ok(OffsetDigest::new(offset, digest)))
            }
            Ok(false) => {
                tracing::trace!(offset, consumed = self.consumed, "input ended before offset");
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.into()))
            }
        }
    }
}

impl<R: Read> FusedIterator for LeadingHashReader<R> {}

impl<R> std::fmt::Debug for LeadingHashReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadingHashReader")
            .field("offsets", &self.offsets)
            .field("position", &self.position)
            .field("consumed", &self.consumed)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// Reads trailing digests from a seekable source.
///
/// The source spans from the reader's current position to its end, both
/// taken on construction, so an already advanced reader hashes only what is
/// left of it. Each window is hashed from scratch, so offsets may come in any order; the
/// sequence ends at the first offset larger than the source.
pub struct TrailingHashReader<R> {
    reader: R,
    offsets: Arc<[u64]>,
    position: usize,
    start: u64,
    len: u64,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: Read + Seek> TrailingHashReader<R> {
    /// Creates a trailing digest iterator over `reader`.
    pub fn new(mut reader: R, config: &OffsetConfig) -> Result<Self, HashError> {
        let start = reader.stream_position()?;
        let len = reader.seek(SeekFrom::End(0))?.saturating_sub(start);

        Ok(Self {
            reader,
            offsets: config.shared_offsets(),
            position: 0,
            start,
            len,
            buffer: vec![0u8; READ_BUFFER_SIZE],
            finished: false,
        })
    }

    /// Returns the number of bytes from the starting position to the end.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns true if the source is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consumes the iterator, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Hashes the last `size` bytes of the source.
    fn hash_window(&mut self, size: u64) -> io::Result<PartialDigest> {
        self.reader
            .seek(SeekFrom::Start(self.start + self.len - size))?;

        let mut hasher = Xxh3Hasher::new();
        let mut remaining = size;
        while remaining > 0 {
            let want = remaining.min(self.buffer.len() as u64) as usize;
            match self.reader.read(&mut self.buffer[..want]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "source shrank while hashing trailing window",
                    ));
                }
                Ok(n) => {
                    hasher.update(&self.buffer[..n]);
                    remaining -= n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(hasher.snapshot())
    }
}

impl<R: Read + Seek> Iterator for TrailingHashReader<R> {
    type Item = Result<OffsetDigest, HashError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(&offset) = self.offsets.get(self.position) else {
            self.finished = true;
            return None;
        };

        if offset > self.len {
            self.finished = true;
            return None;
        }
        self.position += 1;

        match self.hash_window(offset) {
            Ok(digest) => {
                tracing::trace!(offset, %digest, "trailing partial hash");
                Some(Ok(OffsetDigest::new(offset, digest)))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.into()))
            }
        }
    }
}

impl<R: Read + Seek> FusedIterator for TrailingHashReader<R> {}

impl<R> std::fmt::Debug for TrailingHashReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrailingHashReader")
            .field("offsets", &self.offsets)
            .field("position", &self.position)
            .field("start", &self.start)
            .field("len", &self.len)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::hash_at_offsets;
    use std::io::Cursor;

    /// Hands out at most `step` bytes per read, interrupting every other call.
    struct TrickleReader {
        data: Vec<u8>,
        pos: usize,
        step: usize,
        interrupt: bool,
    }

    impl Read for TrickleReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let n = buf.len().min(self.step).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + 13) as u8).collect()
    }

    fn small_config() -> OffsetConfig {
        OffsetConfig::new(&[0x10, 0x100, 0x1000, 0x10000]).unwrap()
    }

    #[test]
    fn test_leading_matches_in_memory() {
        let data = sample(0x5000);
        let config = small_config();

        let streamed = LeadingHashReader::new(Cursor::new(data.clone()), &config)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let buffered: Vec<_> = hash_at_offsets(data, config.offsets(), true).collect();

        assert_eq!(streamed, buffered);
        assert_eq!(streamed.len(), 3);
    }

    #[test]
    fn test_leading_with_short_and_interrupted_reads() {
        let data = sample(0x1234);
        let reader = TrickleReader {
            data: data.clone(),
            pos: 0,
            step: 7,
            interrupt: false,
        };

        let pairs = LeadingHashReader::new(reader, &small_config())
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2].digest, Xxh3Hasher::hash(&data[..0x1000]));
    }

    #[test]
    fn test_leading_stops_at_end_of_input() {
        let mut iter = LeadingHashReader::new(Cursor::new(sample(0x20)), &small_config()).unwrap();

        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
        assert_eq!(iter.consumed(), 0x20);
    }

    #[test]
    fn test_leading_rejects_unsorted_offsets() {
        let config = OffsetConfig::default().with_offsets(&[0x100, 0x10]);
        let result = LeadingHashReader::new(Cursor::new(sample(0x200)), &config);
        assert!(matches!(result, Err(HashError::InvalidConfig { .. })));
    }

    #[test]
    fn test_leading_io_error_is_yielded_once() {
        let mut iter = LeadingHashReader::new(FailingReader, &small_config()).unwrap();

        assert!(matches!(iter.next(), Some(Err(HashError::Io(_)))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_trailing_matches_in_memory() {
        let data = sample(0x5000);
        let config = small_config();

        let streamed = TrailingHashReader::new(Cursor::new(data.clone()), &config)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let buffered: Vec<_> = hash_at_offsets(data, config.offsets(), false).collect();

        assert_eq!(streamed, buffered);
        assert_eq!(streamed.len(), 3);
    }

    #[test]
    fn test_trailing_tolerates_any_order() {
        let data = sample(0x300);
        let config = OffsetConfig::default().with_offsets(&[0x200, 0x10, 0x400, 0x20]);

        let pairs = TrailingHashReader::new(Cursor::new(data.clone()), &config)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].digest, Xxh3Hasher::hash(&data[0x300 - 0x10..]));
    }

    #[test]
    fn test_trailing_len() {
        let iter = TrailingHashReader::new(Cursor::new(sample(42)), &small_config()).unwrap();
        assert_eq!(iter.len(), 42);
        assert!(!iter.is_empty());

        let empty =
            TrailingHashReader::new(Cursor::new(Vec::<u8>::new()), &small_config()).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn test_trailing_starts_at_current_position() {
        let data = sample(0x5000);
        let mut cursor = Cursor::new(data.clone());
        cursor.set_position(0x1800);

        let iter = TrailingHashReader::new(cursor, &small_config()).unwrap();
        assert_eq!(iter.len(), 0x3800);

        let pairs = iter.collect::<Result<Vec<_>, _>>().unwrap();
        let buffered: Vec<_> =
            hash_at_offsets(data[0x1800..].to_vec(), small_config().offsets(), false).collect();
        assert_eq!(pairs, buffered);
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_trailing_past_end_is_empty() {
        let mut cursor = Cursor::new(sample(0x100));
        cursor.set_position(0x200);

        let iter = TrailingHashReader::new(cursor, &small_config()).unwrap();
        assert!(iter.is_empty());
        assert_eq!(iter.count(), 0);
    }
}
