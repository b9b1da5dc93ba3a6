//! SHA-256 digest computation
//!
//! Thin streaming wrapper over the `sha2` implementation that produces the
//! fixed 32-byte [`Digest`] wire type.

use bridge_se_api::{Digest, Result};
use sha2::Digest as _;

/// SHA-256 hash function state
#[derive(Clone, Default)]
pub struct Sha256 {
    inner: sha2::Sha256,
}

impl Sha256 {
    /// Create a new hashing context
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb more message data
    pub fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.inner.update(data);
        Ok(self)
    }

    /// Finish the computation and return the digest
    pub fn finalize(self) -> Result<Digest> {
        let output: [u8; bridge_se_params::SHA256_OUTPUT_SIZE] = self.inner.finalize().into();
        Ok(Digest::new(output))
    }

    /// One-shot digest of `data`
    pub fn digest(data: &[u8]) -> Result<Digest> {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }
}

/// Compute the SHA-256 digest of `message`
pub fn sha256(message: &[u8]) -> Result<Digest> {
    Sha256::digest(message)
}
