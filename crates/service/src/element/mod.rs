//! The secure element operations
//!
//! Every call is self-contained: the DRBG is seeded for the call, key blobs
//! are decoded into a transient [`EcKeyPair`], and all of that state is
//! dropped (and wiped) before the call returns, on success and on error.

use bridge_se_algorithms::{sha256, RandomSource};
#[cfg(feature = "std")]
use bridge_se_algorithms::OsEntropy;
use bridge_se_api::{
    Digest, EntropySource, Error, KeyBlob, KeyStore, RawPublicKey, RawSignature, Result,
};
use bridge_se_codec::key::{decode_public_key_der, encode_public_key_der, public_key_to_xy};
use bridge_se_codec::{
    decode_private_key_der, decode_public_key_xy, encode_private_key_der, encode_public_key_xy,
    signature_from_der, signature_to_der, EcKeyPair,
};
use bridge_se_params::{
    KEYGEN_MAX_ATTEMPTS, KEYGEN_PERSONALIZATION, P256_SCALAR_SIZE, SIGN_PERSONALIZATION,
};
use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::rand_core::RngCore;
use zeroize::Zeroizing;

use crate::config::SecureElementConfig;
use crate::store::KeyStoreSession;

/// Software secure element over a single entropy source
///
/// The only state is the entropy source (a shared device resource, hence the
/// `&mut self` on operations that seed a DRBG) and the configuration used by
/// the key-slot operations. No key material is kept between calls.
pub struct SecureElement<E: EntropySource> {
    entropy: E,
    config: SecureElementConfig,
}

#[cfg(feature = "std")]
impl SecureElement<OsEntropy> {
    /// A secure element seeded from the operating system
    pub fn new() -> Self {
        Self::with_entropy(OsEntropy)
    }
}

#[cfg(feature = "std")]
impl Default for SecureElement<OsEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource> SecureElement<E> {
    pub fn with_entropy(entropy: E) -> Self {
        Self {
            entropy,
            config: SecureElementConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SecureElementConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SecureElementConfig {
        &self.config
    }

    /// Generate a fresh P-256 key pair
    ///
    /// Returns the private key blob, bounded by `max_len`, and the raw public
    /// key derived from the same in-memory key pair.
    #[tracing::instrument(level = "debug", skip_all, fields(max_len = max_len))]
    pub fn generate_key_pair(&mut self, max_len: usize) -> Result<(KeyBlob, RawPublicKey)> {
        let pair = {
            let mut rng = RandomSource::seed(&mut self.entropy, KEYGEN_PERSONALIZATION)?;
            draw_key_pair(&mut rng, KEYGEN_MAX_ATTEMPTS)?
        };

        let blob = encode_private_key_der(&pair, max_len)?;
        let public = encode_public_key_xy(&pair);
        tracing::debug!(blob_len = blob.len(), "generated key pair");
        Ok((blob, public))
    }

    /// Raw coordinates of the public key in `blob`
    ///
    /// `blob` may be a private or a public key container.
    #[tracing::instrument(level = "debug", skip_all, fields(blob_len = blob.len()))]
    pub fn export_public_key_xy(&self, blob: &KeyBlob) -> Result<RawPublicKey> {
        let public = decode_public_key_der(blob.as_bytes())?;
        Ok(public_key_to_xy(&public))
    }

    /// Wrap raw public coordinates in a public key container
    #[tracing::instrument(level = "debug", skip_all, fields(max_len = max_len))]
    pub fn import_public_key_as_der(&self, raw: &RawPublicKey, max_len: usize) -> Result<KeyBlob> {
        decode_public_key_xy(raw, max_len)
    }

    /// ECDSA-sign a precomputed digest with the private key in `blob`
    #[tracing::instrument(level = "debug", skip_all, fields(blob_len = blob.len()))]
    pub fn sign(&mut self, blob: &KeyBlob, digest: &Digest) -> Result<RawSignature> {
        const CONTEXT: &str = "SecureElement::sign";

        let pair = decode_private_key_der(blob.as_bytes()).map_err(|source| {
            tracing::warn!(%source, "private key blob did not decode");
            Error::invalid_key(CONTEXT, source)
        })?;

        let mut rng = RandomSource::seed(&mut self.entropy, SIGN_PERSONALIZATION)?;
        let signing_key = SigningKey::from(pair.secret_key());

        let signature: Signature = signing_key
            .sign_prehash_with_rng(&mut rng, digest.as_bytes())
            .map_err(|error_stack| {
                tracing::error!(?error_stack, "ECDSA signing failed");
                Error::SignFailure {
                    context: CONTEXT,
                    message: error_stack.to_string(),
                }
            })?;

        signature_from_der(signature.to_der().as_bytes())
    }

    /// Check `signature` over `digest` against the public key in `blob`
    ///
    /// A signature that does not match is [`Error::VerificationFailed`]; that
    /// is an ordinary negative result, not a fault.
    #[tracing::instrument(level = "debug", skip_all, fields(blob_len = blob.len()))]
    pub fn verify(&self, blob: &KeyBlob, digest: &Digest, signature: &RawSignature) -> Result<()> {
        const CONTEXT: &str = "SecureElement::verify";

        let public = decode_public_key_der(blob.as_bytes()).map_err(|source| {
            tracing::warn!(%source, "public key blob did not decode");
            Error::invalid_key(CONTEXT, source)
        })?;

        let der = signature_to_der(signature);
        // r or s of zero, or not below the group order
        let signature = Signature::from_der(der.as_bytes())
            .map_err(|_| Error::VerificationFailed { context: CONTEXT })?;

        VerifyingKey::from(&public)
            .verify_prehash(digest.as_bytes(), &signature)
            .map_err(|_| Error::VerificationFailed { context: CONTEXT })
    }

    /// SHA-256 of `message`
    pub fn hash(&self, message: &[u8]) -> Result<Digest> {
        sha256(message)
    }

    /// Generate a key pair and persist its private blob under `key_id`
    #[tracing::instrument(level = "debug", skip_all, fields(key_id = key_id))]
    pub fn generate_stored_key<S>(&mut self, store: &mut S, key_id: &str) -> Result<RawPublicKey>
    where
        S: KeyStore + ?Sized,
    {
        let (blob, public) = self.generate_key_pair(self.config.private_key_max_len)?;

        let mut session = KeyStoreSession::open(store, &self.config.namespace)?;
        let written = session.write_bytes(key_id, blob.as_bytes())?;
        if written != blob.len() {
            return Err(Error::storage(
                "SecureElement::generate_stored_key",
                format!("short write: {written} of {} bytes", blob.len()),
            ));
        }
        Ok(public)
    }

    /// Raw public key of the blob stored under `key_id`
    #[tracing::instrument(level = "debug", skip_all, fields(key_id = key_id))]
    pub fn stored_public_key<S>(&self, store: &mut S, key_id: &str) -> Result<RawPublicKey>
    where
        S: KeyStore + ?Sized,
    {
        let blob = self.read_stored_blob(store, key_id)?;
        self.export_public_key_xy(&blob)
    }

    /// Public key container for the blob stored under `key_id`
    ///
    /// The SPKI encoding is bounded by `config.public_key_max_len`.
    #[tracing::instrument(level = "debug", skip_all, fields(key_id = key_id))]
    pub fn stored_public_key_der<S>(&self, store: &mut S, key_id: &str) -> Result<KeyBlob>
    where
        S: KeyStore + ?Sized,
    {
        let blob = self.read_stored_blob(store, key_id)?;
        let public = decode_public_key_der(blob.as_bytes())?;
        encode_public_key_der(&public, self.config.public_key_max_len)
    }

    /// Sign `digest` with the private blob stored under `key_id`
    #[tracing::instrument(level = "debug", skip_all, fields(key_id = key_id))]
    pub fn sign_with_stored_key<S>(
        &mut self,
        store: &mut S,
        key_id: &str,
        digest: &Digest,
    ) -> Result<RawSignature>
    where
        S: KeyStore + ?Sized,
    {
        let blob = self.read_stored_blob(store, key_id)?;
        self.sign(&blob, digest)
    }

    fn read_stored_blob<S>(&self, store: &mut S, key_id: &str) -> Result<KeyBlob>
    where
        S: KeyStore + ?Sized,
    {
        let mut session = KeyStoreSession::open(store, &self.config.namespace)?;
        let bytes = session.read_bytes(key_id, self.config.private_key_max_len)?;
        Ok(KeyBlob::new(bytes))
    }
}

/// Rejection-sample a secret scalar from `rng`
///
/// Candidates that are zero or not below the group order are discarded;
/// after `attempts` rejections generation fails with [`Error::KeyGen`].
fn draw_key_pair<R: RngCore>(rng: &mut R, attempts: usize) -> Result<EcKeyPair> {
    let mut candidate = Zeroizing::new([0u8; P256_SCALAR_SIZE]);
    for _ in 0..attempts {
        rng.fill_bytes(&mut candidate[..]);
        if let Ok(pair) = EcKeyPair::from_scalar_bytes(&candidate[..]) {
            return Ok(pair);
        }
    }

    tracing::error!(attempts, "no valid scalar drawn");
    Err(Error::KeyGen {
        context: "SecureElement::generate_key_pair",
        message: format!("no valid scalar after {attempts} attempts"),
    })
}

#[cfg(test)]
mod tests;
