pub mod deserializer;
pub mod serializer;
pub mod types;

pub use deserializer::{deserialize_authority, PbtxDeserialize};
pub use serializer::{authority_digest, authority_id, serialize_authority, PbtxSerialize};
