//! Codec laws over generated authorities.

use pbtx_rs::{authority_digest, decode, encode, Authority, PbtxError};
use proptest::prelude::*;

fn valid_authority() -> impl Strategy<Value = Authority> {
    (
        any::<u64>(),
        prop::collection::vec(("[A-Za-z0-9_]{1,24}", 1_u32..=u32::MAX / 64), 0..16),
        any::<prop::sample::Index>(),
    )
        .prop_map(|(actor, entries, pick)| {
            let mut authority = Authority::new(actor, 0);
            for (key, weight) in entries {
                if !authority.contains_key(&key) {
                    authority.push_key(key, weight);
                }
            }
            let total = authority.total_weight() as usize;
            authority.set_threshold(pick.index(total + 1) as u32);
            authority
        })
}

proptest! {
    #[test]
    fn decode_inverts_encode(authority in valid_authority()) {
        let bytes = encode(&authority).expect("valid authority should encode");
        let decoded = decode(&bytes).expect("encoded authority should decode");
        prop_assert_eq!(&decoded, &authority);
        prop_assert_eq!(decoded.keys(), authority.keys());
    }

    #[test]
    fn encode_is_byte_stable(authority in valid_authority()) {
        let first = encode(&authority).expect("valid authority should encode");
        let copy = authority.clone();
        let second = encode(&copy).expect("valid authority should encode");
        prop_assert_eq!(first, second);
        prop_assert_eq!(
            authority_digest(&authority).expect("digest should compute"),
            authority_digest(&copy).expect("digest should compute")
        );
    }

    #[test]
    fn dropping_the_last_byte_is_malformed(authority in valid_authority()) {
        let bytes = encode(&authority).expect("valid authority should encode");
        let result = decode(&bytes[..bytes.len() - 1]);
        prop_assert!(matches!(result, Err(PbtxError::MalformedInput(_))));
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        // Either outcome is fine; decoding must simply return.
        let _ = decode(&bytes);
    }
}

#[test]
fn satisfaction_follows_weighted_sum() {
    let authority = Authority::new(1, 5).with_key("k1", 3).with_key("k2", 4);
    let decoded = decode(&encode(&authority).expect("authority should encode"))
        .expect("authority should decode");

    assert!(decoded.is_satisfied([("k1", 3), ("k2", 4)]));
    assert!(!decoded.is_satisfied([("k1", 3)]));
}

#[test]
fn unreachable_threshold_is_never_encoded() {
    let authority = Authority::new(1, 10).with_key("k1", 3).with_key("k2", 4);
    assert!(matches!(encode(&authority), Err(PbtxError::Validation(_))));
}
