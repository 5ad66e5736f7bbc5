//! Async streaming support for leading digests.
//!
//! This module provides leading-offset hashing over `futures-io::AsyncRead`,
//! making it runtime-agnostic and compatible with tokio, async-std, smol,
//! and other async runtimes.
//!
//! - [`leading_hashes_async`] - Creates an async stream of leading digests
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{LeadingHashStream, leading_hashes_async};
