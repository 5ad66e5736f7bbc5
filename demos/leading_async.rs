//! Async leading hashes over several files at once.
//!
//! Each file gets its own stream and accumulator, so streams run
//! concurrently without sharing state.
//!
//! Run with:
//!     cargo run --example leading_async --features async-io -- FILE...

use futures_util::StreamExt;
use tokio_util::compat::TokioAsyncReadCompatExt;
use trunchash::{OffsetConfig, leading_hashes_async};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        paths.push("Cargo.toml".to_string());
    }

    let config = OffsetConfig::default();

    let handles: Vec<_> = paths
        .into_iter()
        .map(|path| {
            let config = config.clone();
            tokio::spawn(async move {
                let file = tokio::fs::File::open(&path).await?;
                let mut stream = leading_hashes_async(file.compat(), &config)?;

                let mut lines = Vec::new();
                while let Some(pair) = stream.next().await {
                    let pair = pair?;
                    lines.push(format!("{:>12} {}", pair.label(), pair.digest));
                }
                Ok::<_, trunchash::HashError>((path, lines))
            })
        })
        .collect();

    for handle in handles {
        let (path, lines) = handle.await??;
        println!("{}:", path);
        if lines.is_empty() {
            println!("{:>12}", "(too small)");
        }
        for line in lines {
            println!("{}", line);
        }
    }

    Ok(())
}
