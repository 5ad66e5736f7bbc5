//! trunchash
//!
//! Offset-keyed partial content hashing for Rust.
//!
//! `trunchash` fingerprints the first and last N bytes of an input at a fixed
//! set of sizes (4 KiB, 64 KiB, ... 4 GiB by default) using XXH3-64. A
//! truncated copy of a file shares its leading digests with the complete
//! file up to the truncation point, so matching digests at a shared offset
//! links the two.
//!
//! - Leading digests are cumulative: one accumulator is fed once, and a
//!   snapshot is taken at each offset, so the cost is linear in the input.
//! - Trailing digests are independent: each window is hashed from scratch.
//! - An offset larger than the input ends the sequence. That is not an error.
//!
//! The crate intentionally:
//! - does NOT manage files or paths
//! - does NOT manage concurrency
//! - does NOT persist results
//!
//! # In memory
//!
//! ```
//! use trunchash::hash_at_offsets;
//!
//! let data = vec![0u8; 0x1000];
//! for pair in hash_at_offsets(data, &trunchash::DEFAULT_OFFSETS, true) {
//!     assert_eq!(pair.label(), "0x1000");
//!     assert_eq!(pair.to_hex(), "93d76fe148c689ba");
//! }
//! ```
//!
//! # Whole files
//!
//! ```no_run
//! use std::fs::File;
//! use trunchash::{Fingerprinter, HashError, Outcome};
//!
//! fn main() -> Result<(), HashError> {
//!     let file = File::open("sample.bin")?;
//!
//!     match Fingerprinter::default().fingerprint_seekable(file)? {
//!         Outcome::OptOut => println!("too small"),
//!         Outcome::Completed(hashes) => {
//!             for (name, value) in hashes.features() {
//!                 println!("{name} {} {}", value.label, value.value);
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use trunchash::{leading_hashes_async, OffsetConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), trunchash::HashError> {
//!     let mut stream = leading_hashes_async(reader, &OffsetConfig::default())?;
//!
//!     while let Some(pair) = stream.next().await {
//!         println!("{}", pair?);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod digest;
mod error;
mod hasher;
mod policy;
mod report;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use config::{DEFAULT_MINIMUM_SIZE, DEFAULT_OFFSETS, Direction, OffsetConfig};
pub use digest::{OffsetDigest, PartialDigest, Xxh3Hasher};
pub use error::HashError;
pub use hasher::{
    LeadingHashReader, OffsetHashIter, OffsetHasher, TrailingHashReader, hash_at_offsets,
};
pub use policy::{should_skip, should_skip_len};
pub use report::{
    FeatureValue, Fingerprinter, LEADING_PARTIAL_HASH, LEADING_PARTIAL_HASH_DESC, Outcome,
    PartialHashes, TRAILING_PARTIAL_HASH, TRAILING_PARTIAL_HASH_DESC,
};

#[cfg(feature = "async-io")]
pub use async_stream::{LeadingHashStream, leading_hashes_async};
