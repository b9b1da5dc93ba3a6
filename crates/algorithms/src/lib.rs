//! Random source and hash primitives for the bridge-se secure element
//!
//! - [`rng`]: per-operation DRBG seeded from an entropy source
//! - [`hash`]: SHA-256

pub mod hash;
pub mod rng;

pub use hash::{sha256, Sha256};
pub use rng::RandomSource;

#[cfg(feature = "std")]
pub use rng::OsEntropy;
