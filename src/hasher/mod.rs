//! Offset-keyed hashing engines.
//!
//! - [`OffsetHasher`] / [`OffsetHashIter`] - Lazy digests over an in-memory buffer
//! - [`LeadingHashReader`] - Leading digests streamed from a [`std::io::Read`]
//! - [`TrailingHashReader`] - Trailing digests read from a seekable source

mod engine;
mod reader;

pub use engine::{OffsetHashIter, OffsetHasher, hash_at_offsets};
pub use reader::{LeadingHashReader, TrailingHashReader};

/// Read granularity for reader-backed sources.
pub(crate) const READ_BUFFER_SIZE: usize = 8 * 1024;
