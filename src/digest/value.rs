//! Partial digest value type.

use std::fmt;

/// A 64-bit XXH3 digest of part of an input.
///
/// Renders as 16 lowercase hex digits, most significant byte first, which is
/// the canonical XXH3-64 hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartialDigest(u64);

impl PartialDigest {
    /// The size of the digest in bytes.
    pub const SIZE: usize = 8;

    /// Creates a digest from its integer value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the integer value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the canonical (big-endian) byte representation.
    pub const fn to_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Returns the digest as a 16-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }

    /// Parses a digest from its hex form.
    ///
    /// Returns `None` unless the string is exactly 16 hex digits.
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        if hex_str.len() != Self::SIZE * 2 || !hex_str.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u64::from_str_radix(hex_str, 16).ok().map(Self)
    }
}

impl From<u64> for PartialDigest {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<PartialDigest> for u64 {
    fn from(digest: PartialDigest) -> Self {
        digest.0
    }
}

impl fmt::Display for PartialDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_is_zero_padded() {
        let digest = PartialDigest::new(0xab);
        assert_eq!(digest.to_hex(), "00000000000000ab");
        assert_eq!(digest.to_hex().len(), 16);
    }

    #[test]
    fn test_display_matches_to_hex() {
        let digest = PartialDigest::new(0x93d7_6fe1_48c6_89ba);
        assert_eq!(digest.to_string(), "93d76fe148c689ba");
        assert_eq!(digest.to_string(), digest.to_hex());
    }

    #[test]
    fn test_from_hex() {
        let digest = PartialDigest::from_hex("93d76fe148c689ba").unwrap();
        assert_eq!(digest.as_u64(), 0x93d7_6fe1_48c6_89ba);

        // Wrong length or not hex
        assert!(PartialDigest::from_hex("93d76fe148c689b").is_none());
        assert!(PartialDigest::from_hex("93d76fe148c689ba0").is_none());
        assert!(PartialDigest::from_hex("+3d76fe148c689ba").is_none());
        assert!(PartialDigest::from_hex("zzzzzzzzzzzzzzzz").is_none());
    }

    #[test]
    fn test_to_bytes_is_big_endian() {
        let digest = PartialDigest::new(0x0102_0304_0506_0708);
        assert_eq!(digest.to_bytes(), [1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
