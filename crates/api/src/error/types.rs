//! Error type definitions for secure element operations

use thiserror::Error as ThisError;

/// Primary error type for secure element operations
///
/// Every variant names the operation that failed in `context`. All of them
/// are hard failures for the call that produced them; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The entropy source or DRBG could not be seeded
    #[error("RNG seeding failed: {context}: {message}")]
    RngSeed {
        context: &'static str,
        message: String,
    },

    /// A key pair could not be assembled from decoded parts
    #[error("key setup failed: {context}: {message}")]
    KeySetup {
        context: &'static str,
        message: String,
    },

    /// Key generation failed
    #[error("key generation failed: {context}: {message}")]
    KeyGen {
        context: &'static str,
        message: String,
    },

    /// A key container did not parse or could not be written
    #[error("invalid encoding: {context}: {message}")]
    Encoding {
        context: &'static str,
        message: String,
    },

    /// The encoded output does not fit the caller's bound
    #[error("{context}: buffer too small (required {required}, max {max})")]
    BufferTooSmall {
        context: &'static str,
        required: usize,
        max: usize,
    },

    /// The container holds a key that is not an EC key on P-256
    #[error("not a P-256 EC key: {context}: {message}")]
    NotAnEcKey {
        context: &'static str,
        message: String,
    },

    /// The coordinates are not a point on P-256
    #[error("invalid point: {context}: {message}")]
    InvalidPoint {
        context: &'static str,
        message: String,
    },

    /// A signature did not have the expected ASN.1 or raw shape
    #[error("signature format error: {context}: {kind}")]
    SignatureFormat {
        context: &'static str,
        kind: SignatureFormatKind,
    },

    /// The key blob handed to Sign or Verify could not be decoded
    #[error("invalid key: {context}: {source}")]
    InvalidKey {
        context: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// The signing primitive failed
    #[error("signing failed: {context}: {message}")]
    SignFailure {
        context: &'static str,
        message: String,
    },

    /// The signature does not match the digest and public key
    #[error("signature verification failed: {context}")]
    VerificationFailed { context: &'static str },

    /// The hash primitive is not available
    #[error("hash unavailable: {context}: {message}")]
    HashUnavailable {
        context: &'static str,
        message: String,
    },

    /// The external key store reported a failure
    #[error("storage error: {context}: {message}")]
    Storage {
        context: &'static str,
        message: String,
    },
}

/// What was wrong with a signature encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum SignatureFormatKind {
    /// Wrong tag, truncated input or inconsistent lengths
    #[error("malformed ASN.1: {reason}")]
    Malformed { reason: &'static str },

    /// An integer is longer than its fixed-width field once padding is stripped
    #[error("integer length mismatch (expected at most {expected}, got {actual})")]
    LengthMismatch { expected: usize, actual: usize },

    /// An INTEGER with no content octets
    #[error("empty integer")]
    EmptyInteger,
}

/// Result type for secure element operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand to create an `Encoding` error
    pub fn encoding(context: &'static str, message: impl Into<String>) -> Self {
        Self::Encoding {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create a `NotAnEcKey` error
    pub fn not_an_ec_key(context: &'static str, message: impl Into<String>) -> Self {
        Self::NotAnEcKey {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create an `InvalidPoint` error
    pub fn invalid_point(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidPoint {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create a `Storage` error
    pub fn storage(context: &'static str, message: impl Into<String>) -> Self {
        Self::Storage {
            context,
            message: message.into(),
        }
    }

    /// Shorthand to create a `SignatureFormat` error
    pub fn signature_format(context: &'static str, kind: SignatureFormatKind) -> Self {
        Self::SignatureFormat { context, kind }
    }

    /// Wrap a key decoding failure as `InvalidKey`
    pub fn invalid_key(context: &'static str, source: Error) -> Self {
        Self::InvalidKey {
            context,
            source: Box::new(source),
        }
    }

    /// The operation that produced this error
    pub fn context(&self) -> &'static str {
        match self {
            Self::RngSeed { context, .. }
            | Self::KeySetup { context, .. }
            | Self::KeyGen { context, .. }
            | Self::Encoding { context, .. }
            | Self::BufferTooSmall { context, .. }
            | Self::NotAnEcKey { context, .. }
            | Self::InvalidPoint { context, .. }
            | Self::SignatureFormat { context, .. }
            | Self::InvalidKey { context, .. }
            | Self::SignFailure { context, .. }
            | Self::VerificationFailed { context }
            | Self::HashUnavailable { context, .. }
            | Self::Storage { context, .. } => context,
        }
    }
}
