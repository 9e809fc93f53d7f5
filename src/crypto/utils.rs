use ripemd::{Digest as RipemdDigest, Ripemd160};
use sha2::Sha256;

pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// First four bytes of `ripemd160(data || suffix)`, the EOSIO key checksum.
pub fn key_checksum(data: &[u8], suffix: &[u8]) -> [u8; 4] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.update(suffix);
    let digest: [u8; 20] = hasher.finalize().into();
    [digest[0], digest[1], digest[2], digest[3]]
}

#[cfg(test)]
mod tests {
    use super::{key_checksum, ripemd160, sha256};

    #[test]
    fn known_hash_vectors() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            hex::encode(ripemd160(b"abc")),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn checksum_is_ripemd_prefix() {
        assert_eq!(key_checksum(b"ab", b"c"), ripemd160(b"abc")[..4]);
        assert_eq!(key_checksum(b"abc", b""), ripemd160(b"abc")[..4]);
    }
}
