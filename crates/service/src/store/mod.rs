//! Key store plumbing: a scoped session guard and an in-memory store

use std::collections::HashMap;

use bridge_se_api::{Error, KeyStore, Result};
use zeroize::Zeroizing;

/// An open key store namespace
///
/// Opening happens in [`KeyStoreSession::open`]; closing happens when the
/// session is dropped, on every exit path of the caller.
pub struct KeyStoreSession<'a, S: KeyStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyStore + ?Sized> KeyStoreSession<'a, S> {
    pub fn open(store: &'a mut S, namespace: &str) -> Result<Self> {
        store.open(namespace)?;
        Ok(Self { store })
    }

    pub fn read_bytes(&mut self, id: &str, max_len: usize) -> Result<Vec<u8>> {
        self.store.read_bytes(id, max_len)
    }

    pub fn write_bytes(&mut self, id: &str, bytes: &[u8]) -> Result<usize> {
        self.store.write_bytes(id, bytes)
    }
}

impl<S: KeyStore + ?Sized> Drop for KeyStoreSession<'_, S> {
    fn drop(&mut self) {
        self.store.close();
    }
}

/// Namespaced blob store kept in process memory
///
/// Stored values are wiped when they are overwritten or the store is
/// dropped.
#[derive(Default)]
pub struct MemoryKeyStore {
    namespaces: HashMap<String, HashMap<String, Zeroizing<Vec<u8>>>>,
    open: Option<String>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a namespace is currently open
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Whether `namespace` holds a value under `id`
    pub fn contains(&self, namespace: &str, id: &str) -> bool {
        self.namespaces
            .get(namespace)
            .map_or(false, |entries| entries.contains_key(id))
    }

    fn current(&mut self, context: &'static str) -> Result<&mut HashMap<String, Zeroizing<Vec<u8>>>> {
        let namespace = self
            .open
            .as_ref()
            .ok_or_else(|| Error::storage(context, "store is not open"))?;
        Ok(self.namespaces.entry(namespace.clone()).or_default())
    }
}

impl KeyStore for MemoryKeyStore {
    fn open(&mut self, namespace: &str) -> Result<()> {
        if namespace.is_empty() {
            return Err(Error::storage("MemoryKeyStore::open", "empty namespace"));
        }
        tracing::trace!(namespace, "opening key store");
        self.open = Some(namespace.to_string());
        Ok(())
    }

    fn read_bytes(&mut self, id: &str, max_len: usize) -> Result<Vec<u8>> {
        const CONTEXT: &str = "MemoryKeyStore::read_bytes";

        let value = self
            .current(CONTEXT)?
            .get(id)
            .ok_or_else(|| Error::storage(CONTEXT, format!("no value stored under {id:?}")))?;
        if value.len() > max_len {
            return Err(Error::storage(
                CONTEXT,
                format!("stored value is {} bytes, max {max_len}", value.len()),
            ));
        }
        Ok(value.to_vec())
    }

    fn write_bytes(&mut self, id: &str, bytes: &[u8]) -> Result<usize> {
        let entries = self.current("MemoryKeyStore::write_bytes")?;
        entries.insert(id.to_string(), Zeroizing::new(bytes.to_vec()));
        Ok(bytes.len())
    }

    fn close(&mut self) {
        self.open = None;
    }
}
