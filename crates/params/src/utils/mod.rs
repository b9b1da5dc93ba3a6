//! Parameters that are not specific to the curve

pub mod device;
pub mod hash;
