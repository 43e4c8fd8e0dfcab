//! Serving layer for the ballast dataset: the streaming bulk emitter and
//! the monolithic update service.
//!
//! The two halves take opposite stances toward storage trouble. Bulk reads
//! never fail for storage reasons, they degrade to a synthetic stream.
//! Updates fail loudly, surfacing every gateway error as terminal.

pub mod emit;
pub mod errors;
pub mod update;

pub use emit::{BulkEmitter, EmitOptions, EmitReport, EmitSource};
pub use errors::{EmitError, UpdateError};
pub use update::{UpdateRequest, UpdateService};
