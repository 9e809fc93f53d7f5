use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("duplicate key '{0}' in authority")]
    DuplicateKey(String),

    #[error("key '{0}' has zero weight")]
    ZeroWeight(String),

    #[error("key at index {0} is empty")]
    EmptyKey(usize),

    #[error("threshold {threshold} is unreachable, total key weight is {total}")]
    UnreachableThreshold { threshold: u32, total: u64 },
}

#[derive(Debug, Error)]
pub enum PbtxError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, PbtxError>;
