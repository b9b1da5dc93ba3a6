//! ASN.1 / DER constants used by the key and signature codecs

/// DER tag of a constructed SEQUENCE
pub const DER_TAG_SEQUENCE: u8 = 0x30;

/// DER tag of an INTEGER
pub const DER_TAG_INTEGER: u8 = 0x02;

/// First byte of a long-form length carrying one length octet
pub const DER_LENGTH_LONG_ONE_BYTE: u8 = 0x81;

/// Largest DER encoding of a P-256 signature: two 33-byte integers
pub const DER_SIGNATURE_MAX_SIZE: usize = 2 + 2 * (2 + P256_INTEGER_MAX_SIZE);

/// A 32-byte integer plus the sign-guard zero byte
const P256_INTEGER_MAX_SIZE: usize = 33;

/// Upper bound for an encoded private key container
pub const PRIVATE_KEY_DER_MAX: usize = 1024;

/// Upper bound for an encoded public key container
pub const PUBLIC_KEY_DER_MAX: usize = 128;

/// OID of `id-ecPublicKey` (RFC 5480)
pub const ID_EC_PUBLIC_KEY_OID: &str = "1.2.840.10045.2.1";

/// OID of the `secp256r1` named curve (RFC 5480)
pub const SECP256R1_OID: &str = "1.2.840.10045.3.1.7";
