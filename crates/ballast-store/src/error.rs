use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::capability::Capability;

/// Errors surfaced by the storage gateway.
///
/// The gateway reports raw outcomes and leaves policy to its callers: the
/// bulk emitter treats every read-side failure as the signal to degrade,
/// while the update service treats every variant as terminal.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No persistent storage in this environment.
    #[error("persistent storage is unavailable in this environment")]
    Unavailable,
    /// No dataset document has been generated yet.
    #[error("no dataset document at {0}")]
    NotFound(PathBuf),
    /// A write was attempted without write capability.
    #[error("write denied: storage capability is {0}")]
    PermissionDenied(Capability),
    /// The document exists but does not parse as a record array.
    #[error("dataset document is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    /// The document could not be read for reasons other than absence.
    #[error("failed to read dataset document: {0}")]
    ReadFailed(#[source] io::Error),
    /// The document write itself failed. The temp-then-rename write path
    /// leaves any previous document in place.
    #[error("failed to write dataset document: {0}")]
    WriteFailed(#[source] io::Error),
}

/// Convenience alias for gateway results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
