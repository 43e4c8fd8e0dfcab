use thiserror::Error;

/// Core error type shared across ballast crates.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation the dataset contract deliberately leaves out.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// The dataset violates its one cross-record invariant.
    #[error("duplicate record id: {0}")]
    DuplicateId(String),
}

/// Convenience alias for results returned by ballast crates.
pub type Result<T> = std::result::Result<T, Error>;
