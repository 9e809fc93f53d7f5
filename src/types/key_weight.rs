use serde::{Deserialize, Serialize};

use crate::crypto::keys::PublicKey;

/// One signer's contribution toward an authority threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct KeyWeight {
    key: String,
    weight: u32,
}

impl KeyWeight {
    pub fn new(key: impl Into<String>, weight: u32) -> Self {
        Self {
            key: key.into(),
            weight,
        }
    }

    pub fn from_public_key(key: &PublicKey, weight: u32) -> Self {
        Self::new(key.to_string(), weight)
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: u32) {
        self.weight = weight;
    }
}
