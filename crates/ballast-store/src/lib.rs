//! Capability-gated storage gateway for the ballast dataset document.
//!
//! The entire dataset lives in one JSON array document, and both gateway
//! operations move the whole document at once. That shape is the point of
//! this codebase, so the gateway reproduces it faithfully instead of hiding
//! it behind finer-grained access.

pub mod capability;
pub mod document;
pub mod error;

pub use capability::{Capability, CapabilitySource, FixedCapability, SharedCapability};
pub use document::DocumentStore;
pub use error::{StoreError, StoreResult};
