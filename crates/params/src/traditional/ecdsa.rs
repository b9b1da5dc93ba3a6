//! Constants for ECDSA over NIST P-256 (secp256r1)

/// Size of a P-256 field element (one affine coordinate) in bytes
pub const P256_FIELD_ELEMENT_SIZE: usize = 32;

/// Size of a P-256 scalar (private key, r or s) in bytes
pub const P256_SCALAR_SIZE: usize = 32;

/// Size of the raw public key wire format X || Y in bytes
pub const RAW_PUBLIC_KEY_SIZE: usize = 2 * P256_FIELD_ELEMENT_SIZE;

/// Size of the raw signature wire format r || s in bytes
pub const RAW_SIGNATURE_SIZE: usize = 2 * P256_SCALAR_SIZE;

/// SEC1 tag byte for an uncompressed point
pub const POINT_TAG_UNCOMPRESSED: u8 = 0x04;

/// Size of an uncompressed SEC1 point (tag + X + Y) in bytes
pub const P256_POINT_UNCOMPRESSED_SIZE: usize = 1 + RAW_PUBLIC_KEY_SIZE;

/// Upper bound on candidate scalars drawn while generating a key pair
pub const KEYGEN_MAX_ATTEMPTS: usize = 30;
