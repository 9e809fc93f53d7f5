use crate::codec::CodecOptions;
use crate::error::{PbtxError, Result};
use crate::serialization::types::{read_string, read_varint32, read_varint64};
use crate::types::{Authority, KeyWeight};

/// Smallest wire size of one key entry: an empty length prefix and a
/// one-byte weight.
const MIN_KEY_WEIGHT_LEN: usize = 2;

pub trait PbtxDeserialize: Sized {
    fn pbtx_deserialize(cursor: &mut &[u8], options: &CodecOptions) -> Result<Self>;
}

impl PbtxDeserialize for KeyWeight {
    fn pbtx_deserialize(cursor: &mut &[u8], options: &CodecOptions) -> Result<Self> {
        let key = read_string(cursor, options.max_key_len)?;
        let weight = read_varint32(cursor)?;
        Ok(KeyWeight::new(key, weight))
    }
}

impl PbtxDeserialize for Authority {
    fn pbtx_deserialize(cursor: &mut &[u8], options: &CodecOptions) -> Result<Self> {
        let actor = read_varint64(cursor)?;
        let threshold = read_varint32(cursor)?;
        let count = read_varint32(cursor)? as usize;
        if count > options.max_keys {
            return Err(PbtxError::MalformedInput(format!(
                "key count {count} exceeds limit {}",
                options.max_keys
            )));
        }
        if count > cursor.len() / MIN_KEY_WEIGHT_LEN {
            return Err(PbtxError::MalformedInput(format!(
                "key count {count} exceeds remaining {} bytes",
                cursor.len()
            )));
        }

        let mut authority = Authority::new(actor, threshold);
        authority.keys_mut().reserve_exact(count);
        for _ in 0..count {
            authority.add_key(KeyWeight::pbtx_deserialize(cursor, options)?);
        }
        Ok(authority)
    }
}

/// Deserializes one authority and requires the input to end with it.
pub fn deserialize_authority(bytes: &[u8], options: &CodecOptions) -> Result<Authority> {
    let mut cursor = bytes;
    let authority = Authority::pbtx_deserialize(&mut cursor, options)?;
    if !cursor.is_empty() {
        return Err(PbtxError::MalformedInput(format!(
            "{} trailing bytes after authority",
            cursor.len()
        )));
    }
    Ok(authority)
}
