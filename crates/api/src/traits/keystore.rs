//! Persistent named-blob storage

use crate::Result;

/// Opaque named-blob storage on the device
///
/// A store is opened on one namespace at a time. Every method may perform
/// blocking I/O; the core calls them synchronously, never retries, and
/// propagates failures as [`Error::Storage`](crate::Error::Storage).
pub trait KeyStore {
    /// Open `namespace` for reading and writing
    fn open(&mut self, namespace: &str) -> Result<()>;

    /// Read the blob stored under `id`
    ///
    /// Fails if the blob does not exist or is longer than `max_len`.
    fn read_bytes(&mut self, id: &str, max_len: usize) -> Result<Vec<u8>>;

    /// Store `bytes` under `id`, returning the number of bytes written
    fn write_bytes(&mut self, id: &str, bytes: &[u8]) -> Result<usize>;

    /// Close the currently open namespace
    fn close(&mut self);
}
