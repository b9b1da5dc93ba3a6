use super::*;
use crate::store::MemoryKeyStore;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Reproducible entropy for tests
struct FixedEntropy(ChaCha8Rng);

impl EntropySource for FixedEntropy {
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<()> {
        rand_chacha::rand_core::RngCore::fill_bytes(&mut self.0, dest);
        Ok(())
    }
}

struct BrokenEntropy;

impl EntropySource for BrokenEntropy {
    fn fill_entropy(&mut self, _dest: &mut [u8]) -> Result<()> {
        Err(Error::RngSeed {
            context: "BrokenEntropy",
            message: "TRNG not ready".to_string(),
        })
    }
}

/// Always yields 0xFF, which is above the group order
struct SaturatedRng;

impl RngCore for SaturatedRng {
    fn next_u32(&mut self) -> u32 {
        u32::MAX
    }

    fn next_u64(&mut self) -> u64 {
        u64::MAX
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0xFF);
    }

    fn try_fill_bytes(
        &mut self,
        dest: &mut [u8],
    ) -> core::result::Result<(), p256::elliptic_curve::rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Store that accepts writes but reports fewer bytes than it was given
#[derive(Default)]
struct ShortWriteStore {
    inner: MemoryKeyStore,
}

impl KeyStore for ShortWriteStore {
    fn open(&mut self, namespace: &str) -> Result<()> {
        self.inner.open(namespace)
    }

    fn read_bytes(&mut self, id: &str, max_len: usize) -> Result<Vec<u8>> {
        self.inner.read_bytes(id, max_len)
    }

    fn write_bytes(&mut self, id: &str, bytes: &[u8]) -> Result<usize> {
        self.inner.write_bytes(id, bytes).map(|n| n / 2)
    }

    fn close(&mut self) {
        self.inner.close()
    }
}

fn element(seed: u64) -> SecureElement<FixedEntropy> {
    SecureElement::with_entropy(FixedEntropy(ChaCha8Rng::seed_from_u64(seed)))
}

#[test]
fn test_generated_blob_exports_same_public_key() {
    let mut se = element(1);
    let (blob, public) = se.generate_key_pair(1024).unwrap();

    assert_eq!(blob.len(), 121);
    assert_eq!(se.export_public_key_xy(&blob).unwrap(), public);
}

#[test]
fn test_generation_is_reproducible_from_entropy() {
    let (blob_a, _) = element(9).generate_key_pair(1024).unwrap();
    let (blob_b, _) = element(9).generate_key_pair(1024).unwrap();
    let (blob_c, _) = element(10).generate_key_pair(1024).unwrap();

    assert_eq!(blob_a, blob_b);
    assert_ne!(blob_a, blob_c);
}

#[test]
fn test_generate_buffer_too_small() {
    let mut se = element(2);

    let err = se.generate_key_pair(120).unwrap_err();
    assert!(matches!(
        err,
        Error::BufferTooSmall {
            required: 121,
            max: 120,
            ..
        }
    ));
    assert!(se.generate_key_pair(121).is_ok());
}

#[test]
fn test_generate_fails_without_entropy() {
    let mut se = SecureElement::with_entropy(BrokenEntropy);
    assert!(matches!(
        se.generate_key_pair(1024),
        Err(Error::RngSeed { .. })
    ));
}

#[test]
fn test_draw_key_pair_gives_up() {
    let err = draw_key_pair(&mut SaturatedRng, KEYGEN_MAX_ATTEMPTS).unwrap_err();
    assert!(matches!(err, Error::KeyGen { .. }));
}

#[test]
fn test_sign_then_verify() {
    let mut se = element(3);
    let (private_blob, public) = se.generate_key_pair(1024).unwrap();
    let public_blob = se.import_public_key_as_der(&public, 128).unwrap();

    let digest = se.hash(b"test").unwrap();
    let signature = se.sign(&private_blob, &digest).unwrap();

    assert!(se.verify(&public_blob, &digest, &signature).is_ok());
    // A private blob carries the public point too
    assert!(se.verify(&private_blob, &digest, &signature).is_ok());
}

#[test]
fn test_verify_against_other_key_fails() {
    let mut se = element(4);
    let (private_blob, _) = se.generate_key_pair(1024).unwrap();
    let (_, other_public) = se.generate_key_pair(1024).unwrap();
    let other_blob = se.import_public_key_as_der(&other_public, 128).unwrap();

    let digest = se.hash(b"test").unwrap();
    let signature = se.sign(&private_blob, &digest).unwrap();

    assert_eq!(
        se.verify(&other_blob, &digest, &signature),
        Err(Error::VerificationFailed {
            context: "SecureElement::verify"
        })
    );
}

#[test]
fn test_verify_other_digest_fails() {
    let mut se = element(5);
    let (blob, _) = se.generate_key_pair(1024).unwrap();

    let signature = se.sign(&blob, &se.hash(b"test").unwrap()).unwrap();
    let other = se.hash(b"tesu").unwrap();

    assert!(matches!(
        se.verify(&blob, &other, &signature),
        Err(Error::VerificationFailed { .. })
    ));
}

#[test]
fn test_flipped_bits_fail_verification() {
    let mut se = element(6);
    let (blob, _) = se.generate_key_pair(1024).unwrap();
    let digest = se.hash(b"test").unwrap();
    let signature = se.sign(&blob, &digest).unwrap();

    for bit in [0usize, 7, 100, 255, 256, 300, 511] {
        let mut bytes = *signature.as_bytes();
        bytes[bit / 8] ^= 1 << (bit % 8);
        let tampered = RawSignature::new(bytes);

        assert!(
            matches!(
                se.verify(&blob, &digest, &tampered),
                Err(Error::VerificationFailed { .. })
            ),
            "bit {bit} flip verified"
        );
    }
}

#[test]
fn test_zero_signature_fails_verification() {
    let mut se = element(7);
    let (blob, _) = se.generate_key_pair(1024).unwrap();
    let digest = se.hash(b"").unwrap();

    let zero = RawSignature::new([0u8; 64]);
    assert!(matches!(
        se.verify(&blob, &digest, &zero),
        Err(Error::VerificationFailed { .. })
    ));
}

#[test]
fn test_sign_with_public_blob_is_invalid_key() {
    let mut se = element(8);
    let (_, public) = se.generate_key_pair(1024).unwrap();
    let public_blob = se.import_public_key_as_der(&public, 128).unwrap();
    let digest = se.hash(b"test").unwrap();

    match se.sign(&public_blob, &digest) {
        Err(Error::InvalidKey { context, source }) => {
            assert_eq!(context, "SecureElement::sign");
            assert!(matches!(*source, Error::Encoding { .. }));
        }
        other => panic!("expected InvalidKey, got {:?}", other),
    }
}

#[test]
fn test_verify_with_garbage_blob_is_invalid_key() {
    let se = element(11);
    let digest = se.hash(b"test").unwrap();
    let signature = RawSignature::new([0x11; 64]);

    assert!(matches!(
        se.verify(&KeyBlob::from_slice(&[0x30, 0x00]), &digest, &signature),
        Err(Error::InvalidKey { .. })
    ));
}

#[test]
fn test_sign_fails_without_entropy() {
    let (blob, _) = element(12).generate_key_pair(1024).unwrap();
    let mut se = SecureElement::with_entropy(BrokenEntropy);
    let digest = se.hash(b"test").unwrap();

    assert!(matches!(se.sign(&blob, &digest), Err(Error::RngSeed { .. })));
}

#[test]
fn test_import_export_round_trip() {
    let mut se = element(13);
    let (_, public) = se.generate_key_pair(1024).unwrap();

    let blob = se.import_public_key_as_der(&public, 128).unwrap();
    assert_eq!(blob.len(), 91);
    assert_eq!(se.export_public_key_xy(&blob).unwrap(), public);
}

#[test]
fn test_import_rejects_off_curve_point() {
    let se = element(14);
    let mut raw = [0u8; 64];
    raw[31] = 1;
    raw[63] = 1;

    assert!(matches!(
        se.import_public_key_as_der(&RawPublicKey::new(raw), 128),
        Err(Error::InvalidPoint { .. })
    ));
}

#[test]
fn test_hash_vectors() {
    let se = element(15);
    assert_eq!(
        se.hash(b"").unwrap().to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        se.hash(b"test").unwrap().to_hex(),
        "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
    );
}

#[test]
fn test_stored_key_slot() {
    let mut se = element(16);
    let mut store = MemoryKeyStore::new();

    let public = se.generate_stored_key(&mut store, "slot0").unwrap();
    assert!(store.contains("se", "slot0"));
    assert!(!store.is_open());

    assert_eq!(se.stored_public_key(&mut store, "slot0").unwrap(), public);

    let digest = se.hash(b"test").unwrap();
    let signature = se.sign_with_stored_key(&mut store, "slot0", &digest).unwrap();
    let public_blob = se.import_public_key_as_der(&public, 128).unwrap();
    assert!(se.verify(&public_blob, &digest, &signature).is_ok());
    assert!(!store.is_open());
}

#[test]
fn test_stored_key_uses_configured_namespace() {
    let mut se = element(17).with_config(SecureElementConfig::default().with_namespace("bridge"));
    let mut store = MemoryKeyStore::new();

    assert_eq!(se.config().namespace, "bridge");
    se.generate_stored_key(&mut store, "slot1").unwrap();
    assert!(store.contains("bridge", "slot1"));
    assert!(!store.contains("se", "slot1"));
}

#[test]
fn test_stored_public_key_der() {
    let mut se = element(20);
    let mut store = MemoryKeyStore::new();
    let public = se.generate_stored_key(&mut store, "slot0").unwrap();

    let blob = se.stored_public_key_der(&mut store, "slot0").unwrap();
    assert_eq!(blob.len(), 91);
    assert_eq!(se.export_public_key_xy(&blob).unwrap(), public);
    assert!(!store.is_open());
}

#[test]
fn test_stored_public_key_der_honours_configured_bound() {
    let config = SecureElementConfig {
        public_key_max_len: 64,
        ..SecureElementConfig::default()
    };
    let mut se = element(21).with_config(config);
    let mut store = MemoryKeyStore::new();
    se.generate_stored_key(&mut store, "slot0").unwrap();

    let err = se.stored_public_key_der(&mut store, "slot0").unwrap_err();
    assert_eq!(
        err,
        Error::BufferTooSmall {
            context: "encode_public_key_der",
            required: 91,
            max: 64,
        }
    );
}

#[test]
fn test_missing_slot_is_storage_error() {
    let se = element(18);
    let mut store = MemoryKeyStore::new();

    assert!(matches!(
        se.stored_public_key(&mut store, "nope"),
        Err(Error::Storage { .. })
    ));
    assert!(!store.is_open());
}

#[test]
fn test_short_write_is_storage_error() {
    let mut se = element(19);
    let mut store = ShortWriteStore::default();

    let err = se.generate_stored_key(&mut store, "slot0").unwrap_err();
    assert!(err.to_string().contains("short write"));
    assert!(!store.inner.is_open());
}

#[cfg(feature = "std")]
#[test]
fn test_default_element_draws_from_os() {
    let mut se = SecureElement::<OsEntropy>::default();
    let (blob, public) = se.generate_key_pair(1024).unwrap();
    assert_eq!(se.export_public_key_xy(&blob).unwrap(), public);
}
