//! Wire types exchanged with the secure element
//!
//! The raw formats are fixed width: coordinates and signature components are
//! always 32-byte big-endian values, zero-padded on the left. Key containers
//! are opaque byte blobs that only the key codec interprets.

use core::fmt;

use arrayref::array_ref;
use bridge_se_params::{
    P256_FIELD_ELEMENT_SIZE, P256_SCALAR_SIZE, RAW_PUBLIC_KEY_SIZE, RAW_SIGNATURE_SIZE,
    SHA256_OUTPUT_SIZE,
};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result, SignatureFormatKind};

/// Uncompressed public key coordinates, `X || Y`, without the SEC1 tag byte
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawPublicKey([u8; RAW_PUBLIC_KEY_SIZE]);

impl RawPublicKey {
    /// Create from the 64-byte wire form
    pub fn new(bytes: [u8; RAW_PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from separate X and Y coordinates
    pub fn from_coordinates(
        x: &[u8; P256_FIELD_ELEMENT_SIZE],
        y: &[u8; P256_FIELD_ELEMENT_SIZE],
    ) -> Self {
        let mut bytes = [0u8; RAW_PUBLIC_KEY_SIZE];
        bytes[..P256_FIELD_ELEMENT_SIZE].copy_from_slice(x);
        bytes[P256_FIELD_ELEMENT_SIZE..].copy_from_slice(y);
        Self(bytes)
    }

    /// Create from a slice, if it has the correct length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; RAW_PUBLIC_KEY_SIZE] = slice.try_into().map_err(|_| {
            Error::encoding(
                "RawPublicKey::from_slice",
                format!("expected {RAW_PUBLIC_KEY_SIZE} bytes, got {}", slice.len()),
            )
        })?;
        Ok(Self(bytes))
    }

    /// The X coordinate, big-endian
    pub fn x(&self) -> &[u8; P256_FIELD_ELEMENT_SIZE] {
        array_ref!(self.0, 0, P256_FIELD_ELEMENT_SIZE)
    }

    /// The Y coordinate, big-endian
    pub fn y(&self) -> &[u8; P256_FIELD_ELEMENT_SIZE] {
        array_ref!(self.0, P256_FIELD_ELEMENT_SIZE, P256_FIELD_ELEMENT_SIZE)
    }

    pub fn as_bytes(&self) -> &[u8; RAW_PUBLIC_KEY_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for RawPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for RawPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawPublicKey({})", self.to_hex())
    }
}

/// ECDSA signature in its fixed-width wire form, `r || s`
#[derive(Clone, Copy)]
pub struct RawSignature([u8; RAW_SIGNATURE_SIZE]);

impl RawSignature {
    pub fn new(bytes: [u8; RAW_SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from separate r and s components
    pub fn from_components(r: &[u8; P256_SCALAR_SIZE], s: &[u8; P256_SCALAR_SIZE]) -> Self {
        let mut bytes = [0u8; RAW_SIGNATURE_SIZE];
        bytes[..P256_SCALAR_SIZE].copy_from_slice(r);
        bytes[P256_SCALAR_SIZE..].copy_from_slice(s);
        Self(bytes)
    }

    /// Create from a slice; anything but 64 bytes is a format error
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; RAW_SIGNATURE_SIZE] = slice.try_into().map_err(|_| {
            Error::signature_format(
                "RawSignature::from_slice",
                SignatureFormatKind::LengthMismatch {
                    expected: RAW_SIGNATURE_SIZE,
                    actual: slice.len(),
                },
            )
        })?;
        Ok(Self(bytes))
    }

    pub fn r(&self) -> &[u8; P256_SCALAR_SIZE] {
        array_ref!(self.0, 0, P256_SCALAR_SIZE)
    }

    pub fn s(&self) -> &[u8; P256_SCALAR_SIZE] {
        array_ref!(self.0, P256_SCALAR_SIZE, P256_SCALAR_SIZE)
    }

    pub fn as_bytes(&self) -> &[u8; RAW_SIGNATURE_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for RawSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for RawSignature {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for RawSignature {}

impl fmt::Debug for RawSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawSignature({})", self.to_hex())
    }
}

/// SHA-256 output
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Digest([u8; SHA256_OUTPUT_SIZE]);

impl Digest {
    pub fn new(bytes: [u8; SHA256_OUTPUT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, if it has the correct length
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; SHA256_OUTPUT_SIZE] = slice.try_into().map_err(|_| {
            Error::encoding(
                "Digest::from_slice",
                format!("expected {SHA256_OUTPUT_SIZE} bytes, got {}", slice.len()),
            )
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SHA256_OUTPUT_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/// An encoded key container
///
/// Private key blobs carry the secret scalar, so the buffer is wiped on drop
/// and equality is constant time. `Debug` only prints the length.
#[derive(Clone)]
pub struct KeyBlob(Zeroizing<Vec<u8>>);

impl KeyBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub fn from_slice(slice: &[u8]) -> Self {
        Self::new(slice.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for KeyBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<Zeroizing<Vec<u8>>> for KeyBlob {
    fn from(bytes: Zeroizing<Vec<u8>>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for KeyBlob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for KeyBlob {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for KeyBlob {}

impl Zeroize for KeyBlob {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for KeyBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyBlob({} bytes)", self.0.len())
    }
}

/// ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`
#[derive(Clone, PartialEq, Eq)]
pub struct DerSignature(Vec<u8>);

impl DerSignature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for DerSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for DerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerSignature({})", hex::encode(&self.0))
    }
}
