//! Error types for trunchash.
//!
//! Hashing an in-memory buffer never fails: an offset past the end of the
//! data simply ends the sequence. Errors only come from I/O on reader-backed
//! sources and from offset lists rejected by validation.

use thiserror::Error;

/// Errors that can occur while fingerprinting a source.
#[derive(Debug, Error)]
pub enum HashError {
    /// An I/O error occurred while reading input data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: HashError = io_err.into();
        assert!(matches!(err, HashError::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display() {
        let err = HashError::InvalidConfig {
            message: "offsets must be strictly ascending",
        };
        assert_eq!(
            err.to_string(),
            "invalid config: offsets must be strictly ascending"
        );
        assert!(err.source().is_none());
    }
}
