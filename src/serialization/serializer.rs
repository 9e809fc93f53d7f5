use crate::crypto::utils::sha256;
use crate::error::Result;
use crate::serialization::types::{write_array, write_string, write_varint32, write_varint64};
use crate::types::{Authority, KeyWeight};

pub trait PbtxSerialize {
    fn pbtx_serialize(&self, buf: &mut Vec<u8>) -> Result<()>;
}

impl PbtxSerialize for KeyWeight {
    fn pbtx_serialize(&self, buf: &mut Vec<u8>) -> Result<()> {
        write_string(buf, self.key())?;
        write_varint32(buf, self.weight());
        Ok(())
    }
}

impl PbtxSerialize for Authority {
    fn pbtx_serialize(&self, buf: &mut Vec<u8>) -> Result<()> {
        write_varint64(buf, self.actor());
        write_varint32(buf, self.threshold());
        write_array(buf, self.keys(), |b, entry| entry.pbtx_serialize(b))
    }
}

/// Serializes without validating or applying codec limits.
pub fn serialize_authority(authority: &Authority) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    authority.pbtx_serialize(&mut buf)?;
    Ok(buf)
}

pub fn authority_digest(authority: &Authority) -> Result<[u8; 32]> {
    let bytes = crate::codec::encode(authority)?;
    Ok(sha256(&bytes))
}

pub fn authority_id(authority: &Authority) -> Result<String> {
    let digest = authority_digest(authority)?;
    Ok(hex::encode(digest)[..40].to_string())
}
