//! Boundary traits of the secure element core
//!
//! These are the capabilities the core consumes but does not implement:
//! the hardware entropy source and the persistent key store.

pub mod entropy;
pub mod keystore;

pub use entropy::EntropySource;
pub use keystore::KeyStore;
