//! Runtime configuration of the secure element

use bridge_se_params::{DEFAULT_KEY_NAMESPACE, PRIVATE_KEY_DER_MAX, PUBLIC_KEY_DER_MAX};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for the key-slot operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SecureElementConfig {
    /// Key store namespace the slots live in
    pub namespace: String,
    /// Upper bound for encoded private key blobs
    pub private_key_max_len: usize,
    /// Upper bound for encoded public key blobs
    pub public_key_max_len: usize,
}

impl SecureElementConfig {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

impl Default for SecureElementConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_KEY_NAMESPACE.to_string(),
            private_key_max_len: PRIVATE_KEY_DER_MAX,
            public_key_max_len: PUBLIC_KEY_DER_MAX,
        }
    }
}
