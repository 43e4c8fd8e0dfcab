use thiserror::Error;

use ballast_store::StoreError;

/// Errors emitted by the dataset generator.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid generator options: {0}")]
    InvalidOptions(String),
    #[error("failed to draw a unique record id after {0} attempts")]
    IdSpaceExhausted(u32),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
