//! Parameters for the P-256 ECDSA key pair and its encodings

pub mod ecdsa;
pub mod encoding;
