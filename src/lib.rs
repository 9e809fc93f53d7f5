pub mod codec;
pub mod crypto;
pub mod error;
pub mod serialization;
pub mod types;

pub use codec::{decode, decode_with, encode, encode_with, CodecOptions};
pub use crypto::{KeyType, PublicKey};
pub use error::{PbtxError, Result, ValidationError};
pub use serialization::{authority_digest, authority_id};
pub use types::{Authority, KeyWeight};
