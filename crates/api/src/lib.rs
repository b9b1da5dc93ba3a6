//! Public API types for the bridge-se secure element
//!
//! This crate provides the API surface shared by every bridge-se crate: the
//! error taxonomy, the fixed-width wire types and the boundary traits the core
//! consumes (entropy source, key store).

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, SignatureFormatKind};
pub use types::*;

pub use traits::{EntropySource, KeyStore};
