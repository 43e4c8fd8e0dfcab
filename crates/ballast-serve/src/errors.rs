use std::io;

use thiserror::Error;

use ballast_store::{Capability, StoreError};

/// Errors emitted while streaming the bulk payload.
///
/// Storage read failures never appear here. The emitter treats every one of
/// them as the signal to fall back to synthetic output, so the only
/// failures left are the sink and the encoder.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The sink rejected a write. Batch production stops as soon as this
    /// surfaces.
    #[error("sink write failed: {0}")]
    Sink(#[from] io::Error),
    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted by the monolithic update service.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Write capability is absent. Checked before any read happens, so a
    /// denied update proves the document was never touched.
    #[error("update denied: storage capability is {0}")]
    PermissionDenied(Capability),
    /// No record carries the target id; storage is left as it was.
    #[error("no record with id '{0}'")]
    RecordNotFound(String),
    /// Malformed update payload.
    #[error("bad update request: {0}")]
    BadRequest(String),
    /// Gateway failure, surfaced verbatim. Any in-memory merge is
    /// discarded with it.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
