pub(crate) mod format;
mod name;
mod read;
mod write;

pub use name::{ArtifactName, Purpose, format_selectivity};
pub use read::{ArtifactFile, decode};
pub use write::{encode, write_artifact, write_artifact_file};
