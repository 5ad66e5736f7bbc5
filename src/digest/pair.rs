//! The OffsetDigest type - one (offset, digest) result pair.

use std::fmt;

use super::PartialDigest;

/// A digest taken at an offset.
///
/// # Example
///
/// ```
/// use trunchash::{OffsetDigest, PartialDigest};
///
/// let pair = OffsetDigest::new(0x1000, PartialDigest::new(0x93d7_6fe1_48c6_89ba));
///
/// assert_eq!(pair.label(), "0x1000");
/// assert_eq!(pair.digest.to_hex(), "93d76fe148c689ba");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDigest {
    /// Number of bytes covered, counted from the start or the end.
    pub offset: u64,

    /// Digest of those bytes.
    pub digest: PartialDigest,
}

impl OffsetDigest {
    /// Creates a new pair.
    pub const fn new(offset: u64, digest: PartialDigest) -> Self {
        Self { offset, digest }
    }

    /// Returns the offset as a `0x`-prefixed lowercase hex string.
    pub fn label(&self) -> String {
        format!("{:#x}", self.offset)
    }

    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.digest.to_hex()
    }

    /// Splits into `(offset, hex digest)`.
    pub fn into_parts(self) -> (u64, String) {
        (self.offset, self.digest.to_hex())
    }
}

impl From<OffsetDigest> for (u64, String) {
    fn from(pair: OffsetDigest) -> Self {
        pair.into_parts()
    }
}

impl fmt::Display for OffsetDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}={}", self.offset, self.digest)
    }
}
