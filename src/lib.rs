//! # bridge-se
//!
//! The software secure element of the USB bridge firmware: one P-256 key
//! pair at a time, SEC1/SPKI key containers, SHA-256 and ECDSA with a fixed
//! 64-byte raw signature wire format.
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`bridge-se-api`]: error taxonomy, wire types, boundary traits
//! - [`bridge-se-params`]: sizes, tags, OIDs and device defaults
//! - [`bridge-se-algorithms`]: random source and SHA-256
//! - [`bridge-se-codec`]: key containers and signature encodings
//! - [`bridge-se-service`]: the secure element operations
//!
//! ## Features
//!
//! - `std` (default): OS entropy source
//! - `serde`: (de)serializable [`SecureElementConfig`](service::SecureElementConfig)
//! - `full`: all features enabled
//!
//! ## Example
//!
//! ```
//! use bridge_se::prelude::*;
//!
//! let mut se = SecureElement::new();
//! let (private_blob, public) = se.generate_key_pair(PRIVATE_KEY_DER_MAX)?;
//! let public_blob = se.import_public_key_as_der(&public, PUBLIC_KEY_DER_MAX)?;
//!
//! let digest = se.hash(b"test")?;
//! let signature = se.sign(&private_blob, &digest)?;
//! se.verify(&public_blob, &digest, &signature)?;
//! # Ok::<(), bridge_se::api::Error>(())
//! ```

pub use bridge_se_algorithms as algorithms;
pub use bridge_se_api as api;
pub use bridge_se_codec as codec;
pub use bridge_se_params as params;
pub use bridge_se_service as service;

pub use zeroize;

/// Common imports for bridge-se users
pub mod prelude {
    pub use crate::api::{
        Digest, EntropySource, Error, KeyBlob, KeyStore, RawPublicKey, RawSignature, Result,
    };
    pub use crate::params::{PRIVATE_KEY_DER_MAX, PUBLIC_KEY_DER_MAX};
    pub use crate::service::{MemoryKeyStore, SecureElement, SecureElementConfig};
}
