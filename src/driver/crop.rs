use std::path::PathBuf;

use log::info;

use crate::core::BenchgenError;
use crate::io::artifact::ArtifactFile;
use crate::keys::{Key, KeyUniverse, KeyWidth};

use super::{DatasetGenerator, GenerationReport, WorkloadSpec};

/// Derive a smaller dataset and its workloads from an existing artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct CropRequest {
    pub source: PathBuf,
    pub size: usize,
    pub width: Option<KeyWidth>,
    pub label: Option<String>,
    pub spec: WorkloadSpec,
}

/// Find the `uint32`/`uint64` token in an underscore-separated file name.
pub fn infer_width(file_name: &str) -> Result<KeyWidth, BenchgenError> {
    file_name
        .split('_')
        .find(|t| t.starts_with("uint"))
        .ok_or_else(|| {
            BenchgenError::UnsupportedWidth(format!("cannot infer key width from '{file_name}'"))
        })?
        .parse()
}

impl DatasetGenerator {
    pub fn crop(&self, request: &CropRequest) -> Result<GenerationReport, BenchgenError> {
        let file_name = request
            .source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                BenchgenError::InvalidParameter(format!(
                    "invalid source path: {}",
                    request.source.display()
                ))
            })?;
        let width = match request.width {
            Some(width) => width,
            None => infer_width(file_name)?,
        };
        let label = match &request.label {
            Some(label) => label.clone(),
            None => file_name.split('_').next().unwrap_or(file_name).to_string(),
        };
        info!(
            "cropping {} ({width}) to {} keys as '{label}'",
            request.source.display(),
            request.size
        );

        match width {
            KeyWidth::W32 => self.crop_typed::<u32>(request, &label),
            KeyWidth::W64 => self.crop_typed::<u64>(request, &label),
        }
    }

    fn crop_typed<K: Key>(
        &self,
        request: &CropRequest,
        label: &str,
    ) -> Result<GenerationReport, BenchgenError> {
        let keys = ArtifactFile::open(&request.source)?.values::<K>()?;
        let universe = KeyUniverse::from_keys(label, keys, request.size)
            .map_err(|e| e.for_artifact(request.source.display().to_string()))?;
        self.emit_universe(&universe, &request.spec)
    }
}
