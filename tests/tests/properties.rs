use bridge_se::codec::{der_to_raw, raw_to_der};
use bridge_se::prelude::*;
use bridge_se_tests::SeededEntropy;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn der_round_trip(r in any::<[u8; 32]>(), s in any::<[u8; 32]>()) {
        let der = raw_to_der(&r, &s);
        let (r2, s2) = der_to_raw(der.as_bytes(), 32).unwrap();
        prop_assert_eq!(&r2[..], &r[..]);
        prop_assert_eq!(&s2[..], &s[..]);
    }

    #[test]
    fn der_integers_are_minimal(r in any::<[u8; 32]>(), s in any::<[u8; 32]>()) {
        let der = raw_to_der(&r, &s);
        let bytes = der.as_bytes();

        // r is the first INTEGER after the SEQUENCE header
        let r_len = bytes[3] as usize;
        let r_content = &bytes[4..4 + r_len];
        prop_assert!(r_len >= 1);
        if r_len > 1 {
            // A leading zero is only there to clear the sign bit
            prop_assert!(r_content[0] != 0x00 || r_content[1] & 0x80 != 0);
        }
        prop_assert_eq!(r_content[0] & 0x80, 0);
    }

    #[test]
    fn public_key_import_export_is_fixed_point(seed in any::<u64>()) {
        let mut se = SecureElement::with_entropy(SeededEntropy::new(seed));
        let (_, public) = se.generate_key_pair(PRIVATE_KEY_DER_MAX).unwrap();

        let blob = se.import_public_key_as_der(&public, PUBLIC_KEY_DER_MAX).unwrap();
        prop_assert_eq!(se.export_public_key_xy(&blob).unwrap(), public);
    }

    #[test]
    fn sign_verify_any_digest(seed in any::<u64>(), digest in any::<[u8; 32]>()) {
        let mut se = SecureElement::with_entropy(SeededEntropy::new(seed));
        let (blob, public) = se.generate_key_pair(PRIVATE_KEY_DER_MAX).unwrap();
        let public_blob = se.import_public_key_as_der(&public, PUBLIC_KEY_DER_MAX).unwrap();

        let digest = Digest::new(digest);
        let signature = se.sign(&blob, &digest).unwrap();
        prop_assert!(se.verify(&public_blob, &digest, &signature).is_ok());
    }
}
