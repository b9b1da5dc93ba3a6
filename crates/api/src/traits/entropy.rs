//! Hardware entropy source

use crate::Result;

/// A source of raw entropy used to seed the DRBG
///
/// The entropy source is a shared physical resource; callers serialize
/// access to it, which is why every method takes `&mut self`.
pub trait EntropySource {
    /// Fill `dest` with fresh entropy
    ///
    /// Failures are reported as [`Error::RngSeed`](crate::Error::RngSeed).
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<T: EntropySource + ?Sized> EntropySource for &mut T {
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_entropy(dest)
    }
}
