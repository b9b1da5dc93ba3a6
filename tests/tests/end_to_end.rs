use bridge_se::api::SignatureFormatKind;
use bridge_se::codec::{der_to_raw, raw_to_der};
use bridge_se::prelude::*;
use bridge_se_tests::{init_tracing, SeededEntropy};
use rand::RngCore;

#[test]
fn test_generate_hash_sign_verify() {
    init_tracing();
    let mut se = SecureElement::new();

    let (private_blob, public) = se.generate_key_pair(PRIVATE_KEY_DER_MAX).unwrap();
    let public_blob = se.import_public_key_as_der(&public, PUBLIC_KEY_DER_MAX).unwrap();

    let digest = se.hash(b"test").unwrap();
    assert_eq!(
        digest.to_hex(),
        "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
    );

    let signature = se.sign(&private_blob, &digest).unwrap();
    se.verify(&public_blob, &digest, &signature).unwrap();

    // An independently generated key must not verify it
    let (_, other_public) = se.generate_key_pair(PRIVATE_KEY_DER_MAX).unwrap();
    let other_blob = se
        .import_public_key_as_der(&other_public, PUBLIC_KEY_DER_MAX)
        .unwrap();
    assert!(matches!(
        se.verify(&other_blob, &digest, &signature),
        Err(Error::VerificationFailed { .. })
    ));
}

#[test]
fn test_export_matches_generated_public_key() {
    init_tracing();
    let mut se = SecureElement::with_entropy(SeededEntropy::new(42));

    for _ in 0..8 {
        let (blob, public) = se.generate_key_pair(PRIVATE_KEY_DER_MAX).unwrap();
        assert_eq!(se.export_public_key_xy(&blob).unwrap(), public);
    }
}

#[test]
fn test_random_digests_verify() {
    init_tracing();
    let mut se = SecureElement::with_entropy(SeededEntropy::new(7));
    let (blob, public) = se.generate_key_pair(PRIVATE_KEY_DER_MAX).unwrap();
    let public_blob = se.import_public_key_as_der(&public, PUBLIC_KEY_DER_MAX).unwrap();

    let mut rng = rand::thread_rng();
    for _ in 0..16 {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        let digest = Digest::new(bytes);

        let signature = se.sign(&blob, &digest).unwrap();
        assert!(se.verify(&public_blob, &digest, &signature).is_ok());
    }
}

#[test]
fn test_single_bit_flips_are_rejected() {
    init_tracing();
    let mut se = SecureElement::with_entropy(SeededEntropy::new(3));
    let (blob, public) = se.generate_key_pair(PRIVATE_KEY_DER_MAX).unwrap();
    let public_blob = se.import_public_key_as_der(&public, PUBLIC_KEY_DER_MAX).unwrap();
    let digest = se.hash(b"flip me").unwrap();
    let signature = se.sign(&blob, &digest).unwrap();

    // Every eleventh bit position across r and s
    for bit in (0..512).step_by(11) {
        let mut bytes = *signature.as_bytes();
        bytes[bit / 8] ^= 0x80 >> (bit % 8);

        let result = se.verify(&public_blob, &digest, &RawSignature::new(bytes));
        assert!(
            matches!(result, Err(Error::VerificationFailed { .. })),
            "bit {bit}: {result:?}"
        );
    }
}

#[test]
fn test_generate_with_small_bound_returns_no_blob() {
    init_tracing();
    let mut se = SecureElement::new();

    match se.generate_key_pair(32) {
        Err(Error::BufferTooSmall { required, max, .. }) => {
            assert_eq!(max, 32);
            assert!(required > max);
        }
        other => panic!("expected BufferTooSmall, got {:?}", other),
    }
}

#[test]
fn test_signature_codec_edge_values() {
    let cases: [([u8; 32], [u8; 32]); 4] = [
        ([0x00; 32], [0x01; 32]),
        ([0x01; 32], [0x00; 32]),
        ([0xFF; 32], [0x80; 32]),
        ([0x7F; 32], [0x00; 32]),
    ];

    for (r, s) in cases {
        let der = raw_to_der(&r, &s);
        let (r2, s2) = der_to_raw(der.as_bytes(), 32).unwrap();
        assert_eq!((r2.as_slice(), s2.as_slice()), (&r[..], &s[..]));
    }

    assert!(matches!(
        der_to_raw(&[0x04, 0x00], 32),
        Err(Error::SignatureFormat {
            kind: SignatureFormatKind::Malformed { .. },
            ..
        })
    ));
}

#[test]
fn test_key_slots_through_memory_store() {
    init_tracing();
    let mut se = SecureElement::with_entropy(SeededEntropy::new(11));
    let mut store = MemoryKeyStore::new();

    let public_a = se.generate_stored_key(&mut store, "slot0").unwrap();
    let public_b = se.generate_stored_key(&mut store, "slot1").unwrap();
    assert_ne!(public_a, public_b);

    assert_eq!(se.stored_public_key(&mut store, "slot0").unwrap(), public_a);
    assert_eq!(se.stored_public_key(&mut store, "slot1").unwrap(), public_b);

    let digest = se.hash(b"slot message").unwrap();
    let signature = se.sign_with_stored_key(&mut store, "slot1", &digest).unwrap();

    let blob_a = se.import_public_key_as_der(&public_a, PUBLIC_KEY_DER_MAX).unwrap();
    let blob_b = se.import_public_key_as_der(&public_b, PUBLIC_KEY_DER_MAX).unwrap();
    assert!(se.verify(&blob_b, &digest, &signature).is_ok());
    assert!(se.verify(&blob_a, &digest, &signature).is_err());
}

#[test]
fn test_empty_message_digest() {
    let se = SecureElement::new();
    assert_eq!(
        se.hash(b"").unwrap().to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}
