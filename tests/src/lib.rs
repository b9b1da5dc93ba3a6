//! Shared helpers for the bridge-se integration tests

use bridge_se::api::{EntropySource, Result};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::metadata::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

/// Install a test-writer `tracing` subscriber, once per test binary
///
/// `RUST_LOG` selects targets and levels; without it everything at DEBUG and
/// above is shown. An unparseable `RUST_LOG` falls back to the default.
pub fn init_tracing() {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        let targets = std::env::var("RUST_LOG")
            .ok()
            .and_then(|var| var.parse::<Targets>().ok())
            .unwrap_or_else(|| Targets::new().with_default(LevelFilter::DEBUG));

        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_test_writer()
            .with_max_level(LevelFilter::TRACE)
            .finish()
            .with(targets)
            .init();
    });
}

/// Entropy from a fixed-seed generator, so failures reproduce
pub struct SeededEntropy(ChaCha8Rng);

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl EntropySource for SeededEntropy {
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<()> {
        self.0.fill_bytes(dest);
        Ok(())
    }
}
