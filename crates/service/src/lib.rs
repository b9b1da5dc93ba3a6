//! Secure element service for the bridge-se core
//!
//! [`SecureElement`] exposes the six operations of the software secure
//! element (key generation, public key export and import, sign, verify and
//! hash) over opaque [`KeyBlob`](bridge_se_api::KeyBlob) containers, plus the
//! key-slot operations that persist blobs through a [`KeyStore`].
//!
//! The service holds no key material between calls. Every operation seeds,
//! decodes and operates on local state that is dropped, and wiped, before it
//! returns.

pub mod config;
pub mod element;
pub mod store;

pub use config::SecureElementConfig;
pub use element::SecureElement;
pub use store::{KeyStoreSession, MemoryKeyStore};

pub use bridge_se_api::KeyStore;
