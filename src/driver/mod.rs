//! Orchestrates key universes, subsets and workloads into artifact files.

mod crop;
mod generate;
mod inspect;

pub use crop::{CropRequest, infer_width};
pub use generate::{DatasetGenerator, GenerationReport, WorkloadSpec};
pub use inspect::{ArtifactSummary, inspect};
