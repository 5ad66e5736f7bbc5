//! Configuration for partial hashing.
//!
//! - [`OffsetConfig`] - Offsets to fingerprint at and the minimum input size
//! - [`Direction`] - Whether offsets count from the start or the end
//!
//! # Example
//!
//! ```
//! use trunchash::{OffsetConfig, DEFAULT_OFFSETS};
//!
//! // Powers of 16 from 4 KiB to 4 GiB
//! let config = OffsetConfig::default();
//! assert_eq!(config.offsets(), &DEFAULT_OFFSETS[..]);
//!
//! // Custom offsets
//! let config = OffsetConfig::new(&[0x100, 0x1000])?;
//! assert_eq!(config.minimum_size(), 0x100);
//!
//! # Ok::<(), trunchash::HashError>(())
//! ```

use std::sync::Arc;

use crate::error::HashError;

/// Default offsets: 4 KiB to 4 GiB, each step ×16.
pub const DEFAULT_OFFSETS: [u64; 6] = [
    0x1000,
    0x10000,
    0x100000,
    0x1000000,
    0x10000000,
    0x100000000,
];

/// Default minimum input size (4 KiB, the smallest default offset).
///
/// Inputs shorter than this can never reach an offset boundary and are
/// opted out rather than hashed.
pub const DEFAULT_MINIMUM_SIZE: u64 = DEFAULT_OFFSETS[0];

/// Which end of the input offsets are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Offsets count from the start: digests cover `data[..offset]`.
    #[default]
    Leading,
    /// Offsets count from the end: digests cover `data[len - offset..]`.
    Trailing,
}

impl Direction {
    /// Maps a `from_start` flag to a direction.
    pub const fn from_start(from_start: bool) -> Self {
        if from_start {
            Self::Leading
        } else {
            Self::Trailing
        }
    }

    /// Returns true for [`Direction::Leading`].
    pub const fn is_from_start(self) -> bool {
        matches!(self, Self::Leading)
    }
}

/// Configuration for offset-keyed hashing.
///
/// Offsets are consumed in the order given. [`OffsetConfig::new`] requires
/// them to be non-empty, non-zero and strictly ascending; the `with_*`
/// builders store whatever they are given and leave checking to
/// [`OffsetConfig::validate`].
///
/// Cloning is cheap: the offset list is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OffsetConfig {
    /// Byte counts at which a digest is taken.
    offsets: Arc<[u64]>,

    /// Inputs shorter than this are opted out.
    minimum_size: u64,
}

impl OffsetConfig {
    /// Creates a new configuration from an offset list.
    ///
    /// The minimum size is set to the first (smallest) offset.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidConfig`] if:
    /// - The list is empty
    /// - Any offset is zero
    /// - The offsets are not strictly ascending
    ///
    /// # Example
    ///
    /// ```
    /// use trunchash::OffsetConfig;
    ///
    /// let config = OffsetConfig::new(&[4, 8, 12, 16])?;
    /// assert_eq!(config.offsets(), &[4, 8, 12, 16]);
    /// assert!(OffsetConfig::new(&[8, 4]).is_err());
    /// # Ok::<(), trunchash::HashError>(())
    /// ```
    pub fn new(offsets: &[u64]) -> Result<Self, HashError> {
        check_offsets(offsets)?;

        Ok(Self {
            minimum_size: offsets[0],
            offsets: Arc::from(offsets),
        })
    }

    /// Replaces the offset list.
    ///
    /// Note: This does not validate the offsets. The in-memory hasher
    /// tolerates any ordering; reader-backed hashers require
    /// [`OffsetConfig::validate`] to pass.
    pub fn with_offsets(mut self, offsets: &[u64]) -> Self {
        self.offsets = Arc::from(offsets);
        self
    }

    /// Sets the minimum input size below which inputs are opted out.
    pub fn with_minimum_size(mut self, size: u64) -> Self {
        self.minimum_size = size;
        self
    }

    /// Returns the offsets in the order they are consumed.
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Returns the minimum input size.
    pub fn minimum_size(&self) -> u64 {
        self.minimum_size
    }

    /// Validates the offset list.
    ///
    /// The minimum size is not checked: any value is a valid gate.
    pub fn validate(&self) -> Result<(), HashError> {
        check_offsets(&self.offsets)
    }

    pub(crate) fn shared_offsets(&self) -> Arc<[u64]> {
        Arc::clone(&self.offsets)
    }
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self {
            offsets: Arc::new(DEFAULT_OFFSETS),
            minimum_size: DEFAULT_MINIMUM_SIZE,
        }
    }
}

fn check_offsets(offsets: &[u64]) -> Result<(), HashError> {
    if offsets.is_empty() {
        return Err(HashError::InvalidConfig {
            message: "offset list must not be empty",
        });
    }

    if offsets.contains(&0) {
        return Err(HashError::InvalidConfig {
            message: "offsets must be non-zero",
        });
    }

    if offsets.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(HashError::InvalidConfig {
            message: "offsets must be strictly ascending",
        });
    }

    Ok(())
}
