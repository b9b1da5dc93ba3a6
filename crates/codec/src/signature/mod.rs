//! ECDSA signature conversion between the raw and DER forms
//!
//! The wire format of the secure element is a fixed 64-byte `r || s`. The
//! primitive library produces and consumes ASN.1 DER:
//!
//! ```text
//! Ecdsa-Sig-Value ::= SEQUENCE { r INTEGER, s INTEGER }
//! ```
//!
//! Encoding always uses short-form lengths. Decoding also accepts the one-byte
//! long form `0x81 nn`; nothing larger is needed for P-256 signatures.

use bridge_se_api::{DerSignature, Error, RawSignature, Result, SignatureFormatKind};
use bridge_se_params::{
    DER_LENGTH_LONG_ONE_BYTE, DER_SIGNATURE_MAX_SIZE, DER_TAG_INTEGER, DER_TAG_SEQUENCE,
    P256_SCALAR_SIZE,
};

const CONTEXT: &str = "der_to_raw";

/// ECDSA signature components (r, s), big-endian, fixed width
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureComponents {
    pub r: Vec<u8>,
    pub s: Vec<u8>,
}

impl SignatureComponents {
    /// Serialize to DER
    ///
    /// Each component is written as a minimal positive INTEGER: leading zero
    /// bytes are stripped, a zero value keeps a single `0x00`, and a `0x00` is
    /// prepended when the high bit is set. A component whose value does not
    /// fit in a P-256 scalar is rejected with `LengthMismatch`.
    pub fn to_der(&self) -> Result<DerSignature> {
        for component in [&self.r, &self.s] {
            let actual = magnitude(component).len();
            if actual > P256_SCALAR_SIZE {
                return Err(Error::signature_format(
                    "SignatureComponents::to_der",
                    SignatureFormatKind::LengthMismatch {
                        expected: P256_SCALAR_SIZE,
                        actual,
                    },
                ));
            }
        }
        Ok(encode_signature(&self.r, &self.s))
    }

    /// Parse from DER, left-padding each component to `int_size` bytes
    pub fn from_der(der: &[u8], int_size: usize) -> Result<Self> {
        let mut reader = DerReader::new(der);

        if reader.read_u8()? != DER_TAG_SEQUENCE {
            return Err(malformed("expected SEQUENCE tag"));
        }
        let seq_len = reader.read_length()?;
        if seq_len != reader.remaining() {
            return Err(malformed("SEQUENCE length does not cover the input"));
        }

        let r = read_integer(&mut reader, int_size)?;
        let s = read_integer(&mut reader, int_size)?;

        if reader.remaining() != 0 {
            return Err(malformed("trailing bytes inside SEQUENCE"));
        }

        Ok(Self { r, s })
    }
}

/// `RawToDer`: encode fixed-width `r` and `s` as a DER signature
pub fn raw_to_der(r: &[u8; P256_SCALAR_SIZE], s: &[u8; P256_SCALAR_SIZE]) -> DerSignature {
    encode_signature(r, s)
}

/// `DerToRaw`: decode a DER signature into `(r, s)`, each exactly `int_size` bytes
pub fn der_to_raw(der: &[u8], int_size: usize) -> Result<(Vec<u8>, Vec<u8>)> {
    let SignatureComponents { r, s } = SignatureComponents::from_der(der, int_size)?;
    Ok((r, s))
}

/// Encode a 64-byte wire signature as DER
pub fn signature_to_der(signature: &RawSignature) -> DerSignature {
    raw_to_der(signature.r(), signature.s())
}

/// Decode a DER signature into the 64-byte wire form
pub fn signature_from_der(der: &[u8]) -> Result<RawSignature> {
    let (r, s) = der_to_raw(der, P256_SCALAR_SIZE)?;
    let mut bytes = [0u8; P256_SCALAR_SIZE * 2];
    bytes[..P256_SCALAR_SIZE].copy_from_slice(&r);
    bytes[P256_SCALAR_SIZE..].copy_from_slice(&s);
    Ok(RawSignature::new(bytes))
}

/// `SEQUENCE { INTEGER r, INTEGER s }`
///
/// Both magnitudes are at most 32 bytes, so every length fits the short form.
fn encode_signature(r: &[u8], s: &[u8]) -> DerSignature {
    let r = encode_integer(r);
    let s = encode_integer(s);
    let body_len = 2 + r.len() + 2 + s.len();

    let mut der = Vec::with_capacity(DER_SIGNATURE_MAX_SIZE);
    der.push(DER_TAG_SEQUENCE);
    der.push(body_len as u8);
    for int in [&r, &s] {
        der.push(DER_TAG_INTEGER);
        der.push(int.len() as u8);
        der.extend_from_slice(int);
    }

    DerSignature::new(der)
}

/// Minimal positive INTEGER content for a big-endian magnitude
fn encode_integer(bytes: &[u8]) -> Vec<u8> {
    let stripped = match magnitude(bytes) {
        [] => &[0u8][..],
        value => value,
    };

    let mut out = Vec::with_capacity(stripped.len() + 1);
    if stripped[0] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(stripped);
    out
}

/// `bytes` without its leading zeros
fn magnitude(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

fn read_integer(reader: &mut DerReader<'_>, int_size: usize) -> Result<Vec<u8>> {
    if reader.read_u8()? != DER_TAG_INTEGER {
        return Err(malformed("expected INTEGER tag"));
    }
    let len = reader.read_length()?;
    if len == 0 {
        return Err(Error::signature_format(
            CONTEXT,
            SignatureFormatKind::EmptyInteger,
        ));
    }
    let content = reader.take(len)?;

    // Sign padding and any other leading zeros do not count toward the width.
    // A high bit without padding would be negative; it is read as a magnitude.
    let value = magnitude(content);
    if value.len() > int_size {
        return Err(Error::signature_format(
            CONTEXT,
            SignatureFormatKind::LengthMismatch {
                expected: int_size,
                actual: value.len(),
            },
        ));
    }

    let mut out = vec![0u8; int_size];
    out[int_size - value.len()..].copy_from_slice(value);
    Ok(out)
}

fn malformed(reason: &'static str) -> Error {
    Error::signature_format(CONTEXT, SignatureFormatKind::Malformed { reason })
}

/// Bounds-checked cursor over DER input
struct DerReader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> DerReader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = *self
            .input
            .get(self.pos)
            .ok_or_else(|| malformed("unexpected end of input"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_length(&mut self) -> Result<usize> {
        match self.read_u8()? {
            short if short < 0x80 => Ok(short as usize),
            DER_LENGTH_LONG_ONE_BYTE => Ok(self.read_u8()? as usize),
            _ => Err(malformed("unsupported length encoding")),
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(malformed("content runs past the end of input"));
        }
        let content = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(content)
    }
}
