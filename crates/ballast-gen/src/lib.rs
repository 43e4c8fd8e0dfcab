//! Synthetic dataset generation for ballast.
//!
//! Owns the deterministic record fabricator (shared with the serving
//! layer's fallback stream), the cooperative pacing contract the
//! long-running loops honor, and the offline generator that materializes
//! and persists the dataset document.

pub mod engine;
pub mod errors;
pub mod fabric;
pub mod pace;

pub use engine::{GenerateOptions, GenerationReport, GenerationResult, GeneratorEngine};
pub use errors::GenerateError;
pub use fabric::RecordFabricator;
pub use pace::{Pacer, SchedulerYield, Unpaced};
