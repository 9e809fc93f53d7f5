pub mod keys;
pub mod utils;

pub use keys::*;
