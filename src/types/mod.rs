mod authority;
mod key_weight;

pub use authority::Authority;
pub use key_weight::KeyWeight;
