//! P-256 key containers
//!
//! | Form          | Encoding                                                   |
//! |---------------|------------------------------------------------------------|
//! | private blob  | SEC1 `ECPrivateKey` (RFC 5915), namedCurve + public point   |
//! | public blob   | `SubjectPublicKeyInfo`, id-ecPublicKey / secp256r1           |
//! | raw public    | `X || Y`, 32 bytes each, big-endian                         |
//!
//! Private blobs wrapped in PKCS#8 are accepted on decode. Anything carrying a
//! different algorithm or curve is rejected with [`Error::NotAnEcKey`].

use bridge_se_api::{Error, KeyBlob, RawPublicKey, Result};
use bridge_se_params::{
    ID_EC_PUBLIC_KEY_OID, P256_POINT_UNCOMPRESSED_SIZE, POINT_TAG_UNCOMPRESSED,
    RAW_PUBLIC_KEY_SIZE, SECP256R1_OID,
};
use der::asn1::ObjectIdentifier;
use der::{Decode, Encode};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::EncodePublicKey;
use p256::{PublicKey, SecretKey};
use sec1::{EcParameters, EcPrivateKey};
use spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};
use zeroize::Zeroizing;

use crate::point::validate_on_curve;

/// `id-ecPublicKey`
pub const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap(ID_EC_PUBLIC_KEY_OID);

/// `secp256r1`, a.k.a. `prime256v1`
pub const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap(SECP256R1_OID);

/// A decoded P-256 key pair
///
/// Lives only for the duration of the operation that decoded or generated
/// it. The secret scalar is wiped when the pair is dropped.
#[derive(Clone)]
pub struct EcKeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl EcKeyPair {
    /// Derive the public point from a secret scalar
    pub fn from_secret(secret: SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    /// Build a key pair from a big-endian scalar
    ///
    /// Fails with [`Error::KeySetup`] if the scalar is zero or not below the
    /// group order.
    pub fn from_scalar_bytes(bytes: &[u8]) -> Result<Self> {
        let secret = SecretKey::from_slice(bytes).map_err(|_| Error::KeySetup {
            context: "EcKeyPair::from_scalar_bytes",
            message: "scalar is zero or out of range".to_string(),
        })?;
        Ok(Self::from_secret(secret))
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

impl core::fmt::Debug for EcKeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EcKeyPair")
            .field("public", &encode_public_key_xy(self))
            .finish_non_exhaustive()
    }
}

/// `EncodePrivateKeyDER`: write the key pair as a SEC1 `ECPrivateKey`
pub fn encode_private_key_der(pair: &EcKeyPair, max_len: usize) -> Result<KeyBlob> {
    const CONTEXT: &str = "encode_private_key_der";

    let scalar = Zeroizing::new(pair.secret.to_bytes());
    let point = pair.public.to_encoded_point(false);

    let document = EcPrivateKey {
        private_key: scalar.as_slice(),
        parameters: Some(EcParameters::NamedCurve(SECP256R1)),
        public_key: Some(point.as_bytes()),
    };

    let der = Zeroizing::new(document.to_der().map_err(|error_stack| {
        tracing::error!(?error_stack, "failed to encode ECPrivateKey");
        Error::encoding(CONTEXT, error_stack.to_string())
    })?);

    check_bound(CONTEXT, der.len(), max_len)?;
    Ok(KeyBlob::from(der))
}

/// `DecodePrivateKeyDER`: parse a SEC1 or PKCS#8 private key container
pub fn decode_private_key_der(blob: &[u8]) -> Result<EcKeyPair> {
    const CONTEXT: &str = "decode_private_key_der";

    match EcPrivateKey::from_der(blob) {
        Ok(ec_key) => key_pair_from_sec1(CONTEXT, &ec_key, None),
        Err(sec1_error) => {
            let info = pkcs8::PrivateKeyInfo::from_der(blob).map_err(|error_stack| {
                tracing::debug!(%sec1_error, %error_stack, "not a SEC1 or PKCS#8 private key");
                Error::encoding(CONTEXT, "not a SEC1 or PKCS#8 private key")
            })?;
            check_algorithm(CONTEXT, &info.algorithm)?;

            let ec_key = EcPrivateKey::from_der(info.private_key).map_err(|error_stack| {
                tracing::debug!(%error_stack, "PKCS#8 payload is not an ECPrivateKey");
                Error::encoding(CONTEXT, "PKCS#8 payload is not an ECPrivateKey")
            })?;
            key_pair_from_sec1(CONTEXT, &ec_key, Some(SECP256R1))
        }
    }
}

/// Encode a public key as `SubjectPublicKeyInfo`
pub fn encode_public_key_der(public: &PublicKey, max_len: usize) -> Result<KeyBlob> {
    const CONTEXT: &str = "encode_public_key_der";

    let document = public.to_public_key_der().map_err(|error_stack| {
        tracing::error!(?error_stack, "failed to encode SubjectPublicKeyInfo");
        Error::encoding(CONTEXT, error_stack.to_string())
    })?;

    check_bound(CONTEXT, document.as_bytes().len(), max_len)?;
    Ok(KeyBlob::from_slice(document.as_bytes()))
}

/// Parse the public half of any key container this crate understands
///
/// SPKI is tried first; private key containers are accepted as well, in
/// which case only the derived public key is returned.
pub fn decode_public_key_der(blob: &[u8]) -> Result<PublicKey> {
    const CONTEXT: &str = "decode_public_key_der";

    match SubjectPublicKeyInfoRef::from_der(blob) {
        Ok(info) => {
            check_algorithm(CONTEXT, &info.algorithm)?;
            let point = info
                .subject_public_key
                .as_bytes()
                .ok_or_else(|| Error::encoding(CONTEXT, "public key BIT STRING has unused bits"))?;
            public_key_from_sec1(point)
        }
        Err(_) => decode_private_key_der(blob).map(|pair| pair.public),
    }
}

/// `EncodePublicKeyXY`: the raw coordinates of the key pair's public point
pub fn encode_public_key_xy(pair: &EcKeyPair) -> RawPublicKey {
    public_key_to_xy(&pair.public)
}

/// Raw `X || Y` coordinates of a public key
pub fn public_key_to_xy(public: &PublicKey) -> RawPublicKey {
    let point = public.to_encoded_point(false);
    let mut raw = [0u8; RAW_PUBLIC_KEY_SIZE];
    // Uncompressed encoding of a non-identity point is tag + both coordinates
    raw.copy_from_slice(&point.as_bytes()[1..P256_POINT_UNCOMPRESSED_SIZE]);
    RawPublicKey::new(raw)
}

/// Build a public key from raw coordinates, checking curve membership
pub fn public_key_from_xy(raw: &RawPublicKey) -> Result<PublicKey> {
    validate_on_curve(raw)?;

    let mut encoded = [0u8; P256_POINT_UNCOMPRESSED_SIZE];
    encoded[0] = POINT_TAG_UNCOMPRESSED;
    encoded[1..].copy_from_slice(raw.as_bytes());

    PublicKey::from_sec1_bytes(&encoded)
        .map_err(|_| Error::invalid_point("public_key_from_xy", "rejected by the curve library"))
}

/// `DecodePublicKeyXY`: wrap raw coordinates in a `SubjectPublicKeyInfo`
pub fn decode_public_key_xy(raw: &RawPublicKey, max_len: usize) -> Result<KeyBlob> {
    let public = public_key_from_xy(raw)?;
    encode_public_key_der(&public, max_len)
}

fn public_key_from_sec1(point: &[u8]) -> Result<PublicKey> {
    if point.len() == P256_POINT_UNCOMPRESSED_SIZE && point[0] == POINT_TAG_UNCOMPRESSED {
        return public_key_from_xy(&RawPublicKey::from_slice(&point[1..])?);
    }
    PublicKey::from_sec1_bytes(point)
        .map_err(|_| Error::invalid_point("public_key_from_sec1", "not a valid SEC1 point"))
}

fn key_pair_from_sec1(
    context: &'static str,
    ec_key: &EcPrivateKey<'_>,
    outer_curve: Option<ObjectIdentifier>,
) -> Result<EcKeyPair> {
    match ec_key.parameters.and_then(|params| params.named_curve()).or(outer_curve) {
        Some(curve) if curve == SECP256R1 => {}
        Some(curve) => return Err(Error::not_an_ec_key(context, format!("curve {curve}"))),
        None => return Err(Error::encoding(context, "no named curve")),
    }

    let secret = SecretKey::from_slice(ec_key.private_key)
        .map_err(|_| Error::encoding(context, "private scalar is zero or out of range"))?;
    let pair = EcKeyPair::from_secret(secret);

    if let Some(embedded) = ec_key.public_key {
        let matches = PublicKey::from_sec1_bytes(embedded)
            .map(|embedded| embedded == pair.public)
            .unwrap_or(false);
        if !matches {
            tracing::warn!("embedded public point does not match the private scalar");
            return Err(Error::KeySetup {
                context,
                message: "embedded public point does not match the private scalar".to_string(),
            });
        }
    }

    Ok(pair)
}

fn check_algorithm(context: &'static str, algorithm: &AlgorithmIdentifierRef<'_>) -> Result<()> {
    if algorithm.oid != ID_EC_PUBLIC_KEY {
        return Err(Error::not_an_ec_key(
            context,
            format!("algorithm {}", algorithm.oid),
        ));
    }
    match algorithm.parameters_oid() {
        Ok(curve) if curve == SECP256R1 => Ok(()),
        Ok(curve) => Err(Error::not_an_ec_key(context, format!("curve {curve}"))),
        Err(_) => Err(Error::not_an_ec_key(context, "missing named curve")),
    }
}

fn check_bound(context: &'static str, required: usize, max: usize) -> Result<()> {
    if required > max {
        return Err(Error::BufferTooSmall {
            context,
            required,
            max,
        });
    }
    Ok(())
}
