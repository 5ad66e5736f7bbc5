//! Async stream adapter for leading digests.
//!
//! # Example
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
//!         let pair = pair?;
//!         println!("{} {}", pair.label(), pair.digest);
//!     }
//!     Ok(())
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::{FusedStream, Stream};
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::config::OffsetConfig;
use crate::digest::{OffsetDigest, Xxh3Hasher};
use crate::error::HashError;
use crate::hasher::READ_BUFFER_SIZE;

pin_project! {
    /// A stream that yields leading digests from an async reader.
    ///
    /// Same semantics as [`crate::LeadingHashReader`]: one accumulator fed
    /// in 8 KiB steps, a digest each time the running length reaches an
    /// offset, and a silent end if input runs out first.
    pub struct LeadingHashStream<R> {
        #[pin]
        reader: R,
        offsets: Arc<[u64]>,
        position: usize,
        accumulator: Xxh3Hasher,
        consumed: u64,
        buffer: Vec<u8>,
        finished: bool,
    }
}

impl<R> LeadingHashStream<R> {
    /// Returns the number of bytes read and hashed so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

impl<R: AsyncRead> Stream for LeadingHashStream<R> {
    type Item = Result<OffsetDigest, HashError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        let Some(&offset) = this.offsets.get(*this.position) else {
            *this.finished = true;
            return Poll::Ready(None);
        };

        // Read state lives in the struct, so a Pending here resumes where it left off
        while *this.consumed < offset {
            let want = (offset - *this.consumed).min(this.buffer.len() as u64) as usize;
            match this.reader.as_mut().poll_read(cx, &mut this.buffer[..want]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    tracing::trace!(offset, consumed = *this.consumed, "input ended before offset");
                    *this.finished = true;
                    return Poll::Ready(None);
                }
                Poll::Ready(Ok(n)) => {
                    this.accumulator.update(&this.buffer[..n]);
                    *this.consumed += n as u64;
                }
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(HashError::Io(e))));
                }
            }
        }

        *this.position += 1;
        let digest = this.accumulator.snapshot();
        tracing::trace!(offset, %digest, "leading partial hash");

        Poll::Ready(Some(Ok(OffsetDigest::new(offset, digest))))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        (0, Some(self.offsets.len() - self.position))
    }
}

impl<R: AsyncRead> FusedStream for LeadingHashStream<R> {
    fn is_terminated(&self) -> bool {
        self.finished
    }
}

/// Creates a leading digest stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. For tokio
/// readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use trunchash::{leading_hashes_async, OffsetConfig};
///
/// let file = tokio::fs::File::open("sample.bin").await?;
/// let stream = leading_hashes_async(file.compat(), &OffsetConfig::default())?;
/// ```
///
/// # Errors
///
/// Returns [`HashError::InvalidConfig`] if the offsets do not pass
/// [`OffsetConfig::validate`].
pub fn leading_hashes_async<R: AsyncRead>(
    reader: R,
    config: &OffsetConfig,
) -> Result<LeadingHashStream<R>, HashError> {
    config.validate()?;

    Ok(LeadingHashStream {
        reader,
        offsets: config.shared_offsets(),
        position: 0,
        accumulator: Xxh3Hasher::new(),
        consumed: 0,
        buffer: vec![0u8; READ_BUFFER_SIZE],
        finished: false,
    })
}
