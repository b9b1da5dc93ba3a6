//! Constant values for the bridge-se secure element
//!
//! Everything here is a plain `const`; the crate has no dependencies and is
//! always `no_std` compatible.

#![no_std]

pub mod traditional;
pub mod utils;

pub use traditional::ecdsa::*;
pub use traditional::encoding::*;
pub use utils::device::*;
pub use utils::hash::*;
