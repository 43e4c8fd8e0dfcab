use serde::{Deserialize, Serialize};
use tracing::info;

use ballast_core::{Record, RecordPatch};
use ballast_store::DocumentStore;

use crate::errors::UpdateError;

/// Wire shape of an update request: the target id alongside the partial
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub id: String,
    #[serde(default)]
    pub updates: RecordPatch,
}

impl UpdateRequest {
    pub fn new(id: impl Into<String>, updates: RecordPatch) -> Self {
        Self {
            id: id.into(),
            updates,
        }
    }

    /// Parse a raw request body; malformed payloads become `BadRequest`.
    pub fn from_json(body: &str) -> Result<Self, UpdateError> {
        serde_json::from_str(body).map_err(|err| UpdateError::BadRequest(err.to_string()))
    }
}

/// Applies single-record patches through the whole-document round trip.
///
/// The read-everything, scan, merge, rewrite-everything shape is the
/// contract here. Update latency scales with dataset size no matter how
/// small the patch, and two concurrent updates race at document granularity
/// with the later write winning. Do not add locking or partial writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateService;

impl UpdateService {
    pub fn new() -> Self {
        Self
    }

    /// Apply one patch and return the updated record.
    ///
    /// The capability gate runs before any read, so an update denied for
    /// permissions proves the document was never opened.
    pub fn apply(
        &self,
        store: &DocumentStore,
        request: &UpdateRequest,
    ) -> Result<Record, UpdateError> {
        let capability = store.capability();
        if !capability.can_write() {
            return Err(UpdateError::PermissionDenied(capability));
        }

        let mut dataset = store.read_all()?;
        let record = dataset
            .find_mut(&request.id)
            .ok_or_else(|| UpdateError::RecordNotFound(request.id.clone()))?;
        request.updates.apply_to(record);
        let updated = record.clone();

        store.write_all(&dataset)?;
        info!(
            id = %updated.id,
            records = dataset.len(),
            "record updated via full document rewrite"
        );
        Ok(updated)
    }
}
