//! Core contracts for the ballast dataset.
//!
//! This crate defines the record shape, the single-document dataset
//! container, and the patch merge semantics shared by the generator, the
//! storage gateway, and the serving layer.

pub mod dataset;
pub mod error;
pub mod record;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use record::{Record, RecordPatch, Status};
