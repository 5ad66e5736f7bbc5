//! Fingerprint reports.
//!
//! This is the boundary a host framework consumes: two named feature
//! channels, one entry per offset, each entry carrying the hex digest as its
//! value and the `0x`-prefixed offset as its label.
//!
//! - [`Fingerprinter`] - Applies the size gate and runs both directions
//! - [`Outcome`] - Opted out, or completed with [`PartialHashes`]
//! - [`FeatureValue`] - One labelled feature entry
//!
//! # Example
//!
//! ```
//! use trunchash::{Fingerprinter, Outcome, LEADING_PARTIAL_HASH};
//!
//! let fingerprinter = Fingerprinter::default();
//!
//! assert_eq!(fingerprinter.fingerprint(vec![0u8; 0x800]), Outcome::OptOut);
//!
//! let Outcome::Completed(hashes) = fingerprinter.fingerprint(vec![0u8; 0x1000]) else {
//!     panic!("expected completed outcome");
//! };
//! let (name, value) = hashes.features().next().unwrap();
//! assert_eq!(name, LEADING_PARTIAL_HASH);
//! assert_eq!(value.label, "0x1000");
//! assert_eq!(value.value, "93d76fe148c689ba");
//! ```

use std::io::{Read, Seek, SeekFrom};

use bytes::Bytes;

use crate::config::OffsetConfig;
use crate::digest::OffsetDigest;
use crate::error::HashError;
use crate::hasher::{LeadingHashReader, OffsetHasher, TrailingHashReader};
use crate::policy::{should_skip, should_skip_len};

/// Feature name for digests of leading bytes.
pub const LEADING_PARTIAL_HASH: &str = "leading_partial_hash";

/// Feature name for digests of trailing bytes.
pub const TRAILING_PARTIAL_HASH: &str = "trailing_partial_hash";

/// Description of [`LEADING_PARTIAL_HASH`].
pub const LEADING_PARTIAL_HASH_DESC: &str = "XX3 partial hash of n leading bytes";

/// Description of [`TRAILING_PARTIAL_HASH`].
pub const TRAILING_PARTIAL_HASH_DESC: &str = "XX3 partial hash of n trailing bytes";

/// One labelled feature entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureValue {
    /// The digest as lowercase hex.
    pub value: String,
    /// The offset as `0x`-prefixed lowercase hex.
    pub label: String,
}

impl From<&OffsetDigest> for FeatureValue {
    fn from(pair: &OffsetDigest) -> Self {
        Self {
            value: pair.to_hex(),
            label: pair.label(),
        }
    }
}

/// Leading and trailing digests of one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialHashes {
    /// Digests of `data[..offset]`, in offset order.
    pub leading: Vec<OffsetDigest>,
    /// Digests of `data[len - offset..]`, in offset order.
    pub trailing: Vec<OffsetDigest>,
}

impl PartialHashes {
    /// Returns `(feature name, value)` entries, leading first.
    pub fn features(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        let leading = self
            .leading
            .iter()
            .map(|pair| (LEADING_PARTIAL_HASH, FeatureValue::from(pair)));
        let trailing = self
            .trailing
            .iter()
            .map(|pair| (TRAILING_PARTIAL_HASH, FeatureValue::from(pair)));
        leading.chain(trailing)
    }

    /// Returns the total number of entries.
    pub fn len(&self) -> usize {
        self.leading.len() + self.trailing.len()
    }

    /// Returns true if no digest was produced.
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }
}

/// Result of fingerprinting one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The input was smaller than the minimum size and was not hashed.
    OptOut,
    /// The input was hashed.
    Completed(PartialHashes),
}

impl Outcome {
    /// Returns true for [`Outcome::OptOut`].
    pub fn is_opt_out(&self) -> bool {
        matches!(self, Self::OptOut)
    }

    /// Returns the digests, if the input was hashed.
    pub fn hashes(&self) -> Option<&PartialHashes> {
        match self {
            Self::OptOut => None,
            Self::Completed(hashes) => Some(hashes),
        }
    }
}

/// Fingerprints whole inputs in both directions.
///
/// Inputs shorter than [`OffsetConfig::minimum_size`] are opted out.
/// Everything else gets one leading run and one trailing run.
#[derive(Debug, Clone, Default)]
pub struct Fingerprinter {
    hasher: OffsetHasher,
}

impl Fingerprinter {
    /// Creates a new fingerprinter with the given configuration.
    pub fn new(config: OffsetConfig) -> Self {
        Self {
            hasher: OffsetHasher::new(config),
        }
    }

    /// Returns the configuration used by this fingerprinter.
    pub fn config(&self) -> &OffsetConfig {
        self.hasher.config()
    }

    /// Fingerprints an in-memory buffer.
    pub fn fingerprint(&self, data: impl Into<Bytes>) -> Outcome {
        let data = data.into();
        let minimum_size = self.config().minimum_size();

        if should_skip(&data, minimum_size) {
            tracing::debug!(len = data.len(), minimum_size, "input too small, opting out");
            return Outcome::OptOut;
        }

        let hashes = PartialHashes {
            leading: self.hasher.leading(data.clone()).collect(),
            trailing: self.hasher.trailing(data.clone()).collect(),
        };
        tracing::debug!(
            len = data.len(),
            leading = hashes.leading.len(),
            trailing = hashes.trailing.len(),
            "fingerprinted input"
        );

        Outcome::Completed(hashes)
    }

    /// Reads `reader` to the end and fingerprints its content.
    pub fn fingerprint_reader<R: Read>(&self, mut reader: R) -> Result<Outcome, HashError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(self.fingerprint(buf))
    }

    /// Fingerprints a seekable source without buffering it.
    ///
    /// The input runs from the reader's current position to its end, as with
    /// [`Fingerprinter::fingerprint_reader`]. The leading run streams from
    /// that position; trailing windows are read by seeking. Offsets must pass
    /// [`OffsetConfig::validate`].
    pub fn fingerprint_seekable<R: Read + Seek>(
        &self,
        mut reader: R,
    ) -> Result<Outcome, HashError> {
        let config = self.config();
        let start = reader.stream_position()?;
        let len = reader.seek(SeekFrom::End(0))?.saturating_sub(start);

        if should_skip_len(len, config.minimum_size()) {
            tracing::debug!(
                len,
                minimum_size = config.minimum_size(),
                "input too small, opting out"
            );
            return Ok(Outcome::OptOut);
        }

        reader.seek(SeekFrom::Start(start))?;
        let mut leading_iter = LeadingHashReader::new(reader, config)?;
        let leading = leading_iter.by_ref().collect::<Result<Vec<_>, _>>()?;

        let mut reader = leading_iter.into_inner();
        reader.seek(SeekFrom::Start(start))?;
        let trailing =
            TrailingHashReader::new(reader, config)?.collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            len,
            leading = leading.len(),
            trailing = trailing.len(),
            "fingerprinted seekable input"
        );

        Ok(Outcome::Completed(PartialHashes { leading, trailing }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 131 + 17) as u8).collect()
    }

    #[test]
    fn test_opt_out_on_small_input() {
        let outcome = Fingerprinter::default().fingerprint(sample(0xfff));
        assert!(outcome.is_opt_out());
        assert!(outcome.hashes().is_none());
    }

    #[test]
    fn test_barely_large_enough() {
        let outcome = Fingerprinter::default().fingerprint(sample(0x1000));
        let hashes = outcome.hashes().unwrap();

        assert_eq!(hashes.leading.len(), 1);
        assert_eq!(hashes.trailing.len(), 1);
        assert_eq!(hashes.leading[0].digest, hashes.trailing[0].digest);
        assert_eq!(hashes.len(), 2);
    }

    #[test]
    fn test_features_are_labelled() {
        let data = sample(0x12345);
        let Outcome::Completed(hashes) = Fingerprinter::default().fingerprint(data) else {
            panic!("expected completed outcome");
        };

        let features: Vec<_> = hashes.features().collect();
        let names: Vec<_> = features.iter().map(|(name, _)| *name).collect();
        let labels: Vec<_> = features.iter().map(|(_, v)| v.label.as_str()).collect();

        assert_eq!(
            names,
            vec![
                LEADING_PARTIAL_HASH,
                LEADING_PARTIAL_HASH,
                TRAILING_PARTIAL_HASH,
                TRAILING_PARTIAL_HASH
            ]
        );
        assert_eq!(labels, vec!["0x1000", "0x10000", "0x1000", "0x10000"]);
        assert!(features.iter().all(|(_, v)| v.value.len() == 16));
    }

    #[test]
    fn test_custom_minimum_size() {
        let config = OffsetConfig::default().with_minimum_size(0);
        let outcome = Fingerprinter::new(config).fingerprint(Vec::<u8>::new());

        // Not opted out, but nothing fits
        let hashes = outcome.hashes().unwrap();
        assert!(hashes.is_empty());
    }

    #[test]
    fn test_reader_matches_buffer() {
        let data = sample(0x23456);
        let fingerprinter = Fingerprinter::default();

        let from_reader = fingerprinter
            .fingerprint_reader(Cursor::new(data.clone()))
            .unwrap();
        assert_eq!(from_reader, fingerprinter.fingerprint(data));
    }

    #[test]
    fn test_seekable_matches_buffer() {
        let data = sample(0x23456);
        let fingerprinter = Fingerprinter::default();

        let from_seekable = fingerprinter
            .fingerprint_seekable(Cursor::new(data.clone()))
            .unwrap();
        assert_eq!(from_seekable, fingerprinter.fingerprint(data));
    }

    #[test]
    fn test_seekable_honours_current_position() {
        let data = sample(0x13000);
        let fingerprinter = Fingerprinter::default();

        let mut seekable = Cursor::new(data.clone());
        seekable.set_position(0x100);
        let mut plain = Cursor::new(data.clone());
        plain.set_position(0x100);

        let from_seekable = fingerprinter.fingerprint_seekable(seekable).unwrap();
        assert_eq!(from_seekable, fingerprinter.fingerprint_reader(plain).unwrap());
        assert_eq!(from_seekable, fingerprinter.fingerprint(data[0x100..].to_vec()));
        assert_eq!(from_seekable.hashes().unwrap().len(), 4);
    }

    #[test]
    fn test_seekable_remaining_below_minimum_opts_out() {
        let mut cursor = Cursor::new(sample(0x1800));
        cursor.set_position(0x900);

        let outcome = Fingerprinter::default().fingerprint_seekable(cursor).unwrap();
        assert_eq!(outcome, Outcome::OptOut);
    }

    #[test]
    fn test_seekable_opt_out() {
        let outcome = Fingerprinter::default()
            .fingerprint_seekable(Cursor::new(sample(10)))
            .unwrap();
        assert_eq!(outcome, Outcome::OptOut);
    }

    #[test]
    fn test_seekable_rejects_unsorted_offsets() {
        let config = OffsetConfig::default().with_offsets(&[0x2000, 0x1000]);
        let result = Fingerprinter::new(config).fingerprint_seekable(Cursor::new(sample(0x3000)));
        assert!(matches!(result, Err(HashError::InvalidConfig { .. })));
    }
}
