//! Device-level defaults: storage namespace and DRBG personalization

/// Namespace the key slots live in on the device key store
pub const DEFAULT_KEY_NAMESPACE: &str = "se";

/// Personalization string mixed into the DRBG seed for key generation
pub const KEYGEN_PERSONALIZATION: &[u8] = b"gen_key";

/// Personalization string mixed into the DRBG seed for signing
pub const SIGN_PERSONALIZATION: &[u8] = b"sign";

/// Bytes of entropy drawn from the entropy source per seeding
pub const DRBG_ENTROPY_SIZE: usize = 48;
