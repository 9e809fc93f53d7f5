use std::fmt::{Display, Formatter};
use std::str::FromStr;

use secp256k1::PublicKey as SecpPublicKey;

use crate::crypto::utils::key_checksum;
use crate::error::{PbtxError, Result};

const K1_PREFIX: &str = "PUB_K1_";
const LEGACY_PREFIX: &str = "EOS";
const K1_CHECKSUM_SUFFIX: &[u8] = b"K1";
const COMPRESSED_LEN: usize = 33;

/// Key type tag carried in front of raw key bytes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Eosio,
}

impl KeyType {
    pub fn tag(self) -> u8 {
        match self {
            Self::Eosio => 1,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(Self::Eosio),
            other => Err(PbtxError::InvalidKey(format!("unknown key type tag {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    pub(crate) key: SecpPublicKey,
}

impl PublicKey {
    pub fn from_secp256k1(key: SecpPublicKey) -> Self {
        Self { key }
    }

    pub fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPRESSED_LEN {
            return Err(PbtxError::InvalidKey(format!(
                "expected {COMPRESSED_LEN} compressed key bytes, got {}",
                bytes.len()
            )));
        }
        let key = SecpPublicKey::from_slice(bytes)
            .map_err(|err| PbtxError::InvalidKey(format!("invalid public key bytes: {err}")))?;
        Ok(Self { key })
    }

    /// Parses `PUB_K1_...` or legacy `EOS...` key strings.
    pub fn from_string(value: &str) -> Result<Self> {
        if let Some(encoded) = value.strip_prefix(K1_PREFIX) {
            Self::from_checked_base58(encoded, K1_CHECKSUM_SUFFIX)
        } else if let Some(encoded) = value.strip_prefix(LEGACY_PREFIX) {
            Self::from_checked_base58(encoded, b"")
        } else {
            Err(PbtxError::InvalidKey(format!(
                "public key '{value}' has no known prefix"
            )))
        }
    }

    /// Key type tag followed by the compressed key.
    pub fn from_typed_bytes(bytes: &[u8]) -> Result<Self> {
        let (tag, key) = bytes
            .split_first()
            .ok_or_else(|| PbtxError::InvalidKey("empty key bytes".to_string()))?;
        KeyType::from_tag(*tag)?;
        Self::from_compressed_bytes(key)
    }

    pub fn key_type(&self) -> KeyType {
        KeyType::Eosio
    }

    pub fn compressed_bytes(&self) -> [u8; 33] {
        self.key.serialize()
    }

    pub fn to_typed_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(COMPRESSED_LEN + 1);
        bytes.push(self.key_type().tag());
        bytes.extend_from_slice(&self.compressed_bytes());
        bytes
    }

    pub fn to_legacy_string(&self) -> String {
        format!("{LEGACY_PREFIX}{}", self.checked_base58(b""))
    }

    fn checked_base58(&self, suffix: &[u8]) -> String {
        let key = self.compressed_bytes();
        let mut payload = Vec::with_capacity(COMPRESSED_LEN + 4);
        payload.extend_from_slice(&key);
        payload.extend_from_slice(&key_checksum(&key, suffix));
        bs58::encode(payload).into_string()
    }

    fn from_checked_base58(encoded: &str, suffix: &[u8]) -> Result<Self> {
        let decoded = bs58::decode(encoded)
            .into_vec()
            .map_err(|err| PbtxError::InvalidKey(format!("invalid base58 key: {err}")))?;
        if decoded.len() != COMPRESSED_LEN + 4 {
            return Err(PbtxError::InvalidKey(format!(
                "expected {} decoded key bytes, got {}",
                COMPRESSED_LEN + 4,
                decoded.len()
            )));
        }

        let (key, checksum) = decoded.split_at(COMPRESSED_LEN);
        if checksum != key_checksum(key, suffix) {
            return Err(PbtxError::InvalidKey("public key checksum mismatch".to_string()));
        }
        Self::from_compressed_bytes(key)
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{K1_PREFIX}{}", self.checked_base58(K1_CHECKSUM_SUFFIX))
    }
}

impl FromStr for PublicKey {
    type Err = PbtxError;

    fn from_str(value: &str) -> Result<Self> {
        Self::from_string(value)
    }
}
