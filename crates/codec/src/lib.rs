//! Key containers and signature encodings for the bridge-se secure element
//!
//! Two codecs live here:
//!
//! - [`key`] converts between in-memory P-256 key pairs and their DER
//!   containers (SEC1 `ECPrivateKey` for private keys, SPKI for public keys)
//!   and the raw 64-byte `X || Y` coordinate form.
//! - [`signature`] converts ECDSA signatures between the raw 64-byte `r || s`
//!   form and ASN.1 DER.
//!
//! Neither codec touches secret material beyond the call that uses it.

pub mod key;
pub mod point;
pub mod signature;

pub use key::{
    decode_private_key_der, decode_public_key_der, decode_public_key_xy, encode_private_key_der,
    encode_public_key_der, encode_public_key_xy, EcKeyPair,
};
pub use point::validate_on_curve;
pub use signature::{der_to_raw, raw_to_der, signature_from_der, signature_to_der, SignatureComponents};
