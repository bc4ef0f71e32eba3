use std::fmt;
use std::path::Path;

use crate::core::BenchgenError;
use crate::io::artifact::{ArtifactFile, ArtifactName, Purpose};
use crate::keys::{Key, KeyWidth, is_strictly_ascending};
use crate::workload::RangePair;

use super::infer_width;

/// What `inspect` reports about one artifact file.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSummary {
    pub name: Option<ArtifactName>,
    pub width: KeyWidth,
    pub count: usize,
    pub first: Option<u64>,
    pub last: Option<u64>,
    pub ascending: bool,
    /// Set for range workloads.
    pub pairs: Option<usize>,
}

pub fn inspect(path: &Path, width: Option<KeyWidth>) -> Result<ArtifactSummary, BenchgenError> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let name = file_name.parse::<ArtifactName>().ok();
    let width = match (width, &name) {
        (Some(width), _) => width,
        (None, Some(name)) => name.width,
        (None, None) => infer_width(file_name)?,
    };
    let file = ArtifactFile::open(path)?;
    match width {
        KeyWidth::W32 => summarize::<u32>(&file, name),
        KeyWidth::W64 => summarize::<u64>(&file, name),
    }
}

fn summarize<K: Key>(
    file: &ArtifactFile,
    name: Option<ArtifactName>,
) -> Result<ArtifactSummary, BenchgenError> {
    let values = file.values::<K>()?;
    let pairs = match name.as_ref().map(|n| &n.purpose) {
        Some(Purpose::Range { .. }) => Some(RangePair::from_flat(&values)?.len()),
        _ => None,
    };
    Ok(ArtifactSummary {
        name,
        width: K::WIDTH,
        count: values.len(),
        first: values.first().map(|v| v.to_u64()),
        last: values.last().map(|v| v.to_u64()),
        ascending: is_strictly_ascending(&values),
        pairs,
    })
}

impl fmt::Display for ArtifactSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "dataset:   {}", name.dataset)?;
            writeln!(f, "size:      {}", name.size)?;
            writeln!(f, "purpose:   {}", name.purpose)?;
        }
        writeln!(f, "width:     {}", self.width)?;
        writeln!(f, "count:     {}", self.count)?;
        if let (Some(first), Some(last)) = (self.first, self.last) {
            writeln!(f, "first:     {first}")?;
            writeln!(f, "last:      {last}")?;
        }
        if let Some(pairs) = self.pairs {
            writeln!(f, "pairs:     {pairs}")?;
        }
        write!(f, "ascending: {}", self.ascending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::artifact::write_artifact_file;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_sorted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dense_uint32_3_asc_sorted");
        write_artifact_file(&path, &[1u32, 2, 3]).unwrap();

        let summary = inspect(&path, None).unwrap();
        assert_eq!(summary.width, KeyWidth::W32);
        assert_eq!(summary.count, 3);
        assert_eq!((summary.first, summary.last), (Some(1), Some(3)));
        assert!(summary.ascending);
        assert_eq!(summary.pairs, None);
        assert!(summary.to_string().contains("purpose:   asc_sorted"));
    }

    #[test]
    fn test_inspect_range_counts_pairs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sparse_uint64_10_rg_4_select_0.2");
        write_artifact_file(&path, &[9u64, 7, 1, 3]).unwrap();
        let summary = inspect(&path, None).unwrap();
        assert_eq!(summary.pairs, Some(2));
        assert!(!summary.ascending);
    }

    #[test]
    fn test_inspect_odd_range_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sparse_uint64_10_rg_3_select_0.2");
        write_artifact_file(&path, &[9u64, 7, 1]).unwrap();
        assert!(matches!(
            inspect(&path, None),
            Err(BenchgenError::MalformedArtifact(_))
        ));
    }

    #[test]
    fn test_inspect_unnamed_file_needs_width() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keys.bin");
        write_artifact_file(&path, &[4u64]).unwrap();
        assert!(inspect(&path, None).is_err());
        assert_eq!(inspect(&path, Some(KeyWidth::W64)).unwrap().count, 1);
    }
}
