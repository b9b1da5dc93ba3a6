//! Error handling for the secure element core

pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result, SignatureFormatKind};
