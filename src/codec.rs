use crate::error::{PbtxError, Result};
use crate::serialization::{deserialize_authority, serialize_authority};
use crate::types::Authority;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// Upper bound on entries in one authority's key list.
    pub max_keys: usize,
    /// Upper bound on the byte length of a single key.
    pub max_key_len: usize,
    /// Run [`Authority::validate`] before encoding and after decoding.
    pub validate: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_keys: 1024,
            max_key_len: 256,
            validate: true,
        }
    }
}

pub fn encode(authority: &Authority) -> Result<Vec<u8>> {
    encode_with(authority, &CodecOptions::default())
}

pub fn decode(bytes: &[u8]) -> Result<Authority> {
    decode_with(bytes, &CodecOptions::default())
}

pub fn encode_with(authority: &Authority, options: &CodecOptions) -> Result<Vec<u8>> {
    if options.validate {
        authority.validate()?;
    }
    check_limits(authority, options)?;

    let bytes = serialize_authority(authority)?;
    tracing::debug!(
        actor = authority.actor(),
        keys = authority.len(),
        len = bytes.len(),
        "encoded authority"
    );
    Ok(bytes)
}

pub fn decode_with(bytes: &[u8], options: &CodecOptions) -> Result<Authority> {
    let authority = match deserialize_authority(bytes, options) {
        Ok(authority) => authority,
        Err(err) => {
            tracing::warn!(len = bytes.len(), error = %err, "rejected authority bytes");
            return Err(err);
        }
    };
    if options.validate {
        authority.validate()?;
    }

    tracing::debug!(
        actor = authority.actor(),
        keys = authority.len(),
        len = bytes.len(),
        "decoded authority"
    );
    Ok(authority)
}

fn check_limits(authority: &Authority, options: &CodecOptions) -> Result<()> {
    if authority.len() > options.max_keys {
        return Err(PbtxError::Serialization(format!(
            "authority has {} keys, limit is {}",
            authority.len(),
            options.max_keys
        )));
    }
    if let Some(entry) = authority
        .iter()
        .find(|entry| entry.key().len() > options.max_key_len)
    {
        return Err(PbtxError::Serialization(format!(
            "key of {} bytes exceeds limit {}",
            entry.key().len(),
            options.max_key_len
        )));
    }
    Ok(())
}
