//! Partial hashing of a file on disk.
//!
//! Run with:
//!     RUST_LOG=trunchash=trace cargo run --example fingerprint_file -- /path/to/file

use std::env;
use std::fs::File;

use trunchash::{Fingerprinter, OffsetConfig, Outcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "trunchash=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Fingerprinting file: {}\n", path);

    let file = File::open(&path)?;
    println!("File size: {} bytes\n", file.metadata()?.len());

    let fingerprinter = Fingerprinter::new(OffsetConfig::default());

    match fingerprinter.fingerprint_seekable(file)? {
        Outcome::OptOut => {
            println!(
                "Opted out: smaller than {:#x} bytes",
                fingerprinter.config().minimum_size()
            );
        }
        Outcome::Completed(hashes) => {
            for (name, value) in hashes.features() {
                println!("{:<24} {:>12} {}", name, value.label, value.value);
            }
            println!("\nTotal: {} partial hashes", hashes.len());
        }
    }

    Ok(())
}
