//! Size-gate policy.
//!
//! Inputs shorter than the smallest offset can never produce a digest, so
//! callers opt them out instead of hashing.

/// Returns true if `data` is shorter than `minimum_size`.
///
/// # Example
///
/// ```
/// use trunchash::{should_skip, DEFAULT_MINIMUM_SIZE};
///
/// assert!(should_skip(&[0u8; 0xfff], DEFAULT_MINIMUM_SIZE));
/// assert!(!should_skip(&[0u8; 0x1000], DEFAULT_MINIMUM_SIZE));
/// ```
pub fn should_skip(data: &[u8], minimum_size: u64) -> bool {
    should_skip_len(data.len() as u64, minimum_size)
}

/// Same decision as [`should_skip`] for a source of known length.
pub fn should_skip_len(len: u64, minimum_size: u64) -> bool {
    len < minimum_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_minimum_opts_out() {
        assert!(should_skip(&[0u8; 0xfff], 0x1000));
        assert!(should_skip(b"", 1));
    }

    #[test]
    fn test_at_minimum_proceeds() {
        assert!(!should_skip(&[0u8; 0x1000], 0x1000));
    }

    #[test]
    fn test_zero_minimum_never_skips() {
        assert!(!should_skip(b"", 0));
        assert!(!should_skip_len(0, 0));
    }

    #[test]
    fn test_len_form() {
        assert!(should_skip_len(0x0fff, 0x1000));
        assert!(!should_skip_len(0x1_0000_0000, 0x1000));
    }
}
