//! Cryptographically secure random source
//!
//! A [`RandomSource`] is a ChaCha20 DRBG seeded once per operation from an
//! [`EntropySource`] plus a personalization string:
//!
//! ```text
//! seed = SHA-256(entropy || personalization)
//! ```
//!
//! It is created at the start of a key generation or signing call and
//! dropped at the end of it; it is never cached between calls.

use core::ptr;
use core::sync::atomic::{compiler_fence, Ordering};

use bridge_se_api::{EntropySource, Error, Result};
use bridge_se_params::DRBG_ENTROPY_SIZE;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest as _, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Entropy drawn from the operating system
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

#[cfg(feature = "std")]
impl EntropySource for OsEntropy {
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<()> {
        rand::rngs::OsRng
            .try_fill_bytes(dest)
            .map_err(|error_stack| {
                tracing::error!(%error_stack, "OS entropy source failed");
                Error::RngSeed {
                    context: "OsEntropy::fill_entropy",
                    message: error_stack.to_string(),
                }
            })
    }
}

/// Seeded DRBG scoped to a single operation
pub struct RandomSource {
    rng: ChaCha20Rng,
}

impl RandomSource {
    /// Seed a new generator from `entropy`
    ///
    /// Fails with [`Error::RngSeed`] if the entropy source fails or returns
    /// all-zero material.
    pub fn seed<E>(entropy: &mut E, personalization: &[u8]) -> Result<Self>
    where
        E: EntropySource + ?Sized,
    {
        let mut material = Zeroizing::new([0u8; DRBG_ENTROPY_SIZE]);
        entropy.fill_entropy(&mut material[..])?;

        // Health check: a stuck source hands back zeros
        if bool::from(material[..].ct_eq(&[0u8; DRBG_ENTROPY_SIZE][..])) {
            tracing::error!("entropy source returned all-zero material");
            return Err(Error::RngSeed {
                context: "RandomSource::seed",
                message: "entropy source returned all-zero material".to_string(),
            });
        }

        let mut hasher = Sha256::new();
        hasher.update(&material[..]);
        hasher.update(personalization);
        let seed: Zeroizing<[u8; 32]> = Zeroizing::new(hasher.finalize().into());

        Ok(Self {
            rng: ChaCha20Rng::from_seed(*seed),
        })
    }

    /// Draw `n` unpredictable bytes
    pub fn next_bytes(&mut self, n: usize) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(vec![0u8; n]);
        self.rng.fill_bytes(&mut out);
        out
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

impl CryptoRng for RandomSource {}

impl RandomSource {
    /// Replace the generator state with the all-zero-key state
    fn wipe(&mut self) {
        let blank = ChaCha20Rng::from_seed([0u8; 32]);
        // SAFETY: `self.rng` is a valid, aligned place we borrow exclusively.
        // `ChaCha20Rng` owns no heap memory, so skipping its drop leaks nothing.
        unsafe { ptr::write_volatile(&mut self.rng, blank) };
        compiler_fence(Ordering::SeqCst);
    }
}

impl Drop for RandomSource {
    fn drop(&mut self) {
        self.wipe();
    }
}
