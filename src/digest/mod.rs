//! Digest types and the streaming XXH3 accumulator.
//!
//! - [`PartialDigest`] - 64-bit XXH3 digest of a prefix or suffix
//! - [`OffsetDigest`] - An offset paired with the digest taken there
//! - [`Xxh3Hasher`] - Streaming accumulator with non-consuming snapshots

mod pair;
mod value;
mod xxh3;

pub use pair::OffsetDigest;
pub use value::PartialDigest;
pub use xxh3::Xxh3Hasher;
