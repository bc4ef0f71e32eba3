//! Test and benchmark utilities.
//!
//! This module is only available when the `testutil` feature is enabled.

use std::path::Path;

use tempfile::TempDir;

use crate::conf::GeneratorConfig;
use crate::driver::{DatasetGenerator, WorkloadSpec};
use crate::io::artifact::ArtifactFile;
use crate::keys::Key;

/// RNG seed for deterministic test and benchmark data.
pub const TEST_SEED: u64 = 42;

/// Generator writing into a fresh temp directory.
/// Returns the TempDir as well - keep it alive!
pub fn temp_generator() -> (DatasetGenerator, TempDir) {
    let dir = TempDir::new().unwrap();
    let generator = DatasetGenerator::new(GeneratorConfig {
        output_dir: dir.path().to_path_buf(),
        seed: TEST_SEED,
        ..GeneratorConfig::default()
    });
    (generator, dir)
}

pub fn workload_spec(subset_count: usize, eq_count: usize, selectivities: &[f64], rg_count: usize) -> WorkloadSpec {
    WorkloadSpec {
        subset_count,
        eq_count,
        selectivities: selectivities.to_vec(),
        rg_count,
    }
}

/// Read an artifact back from `dir` by file name.
pub fn read_artifact<K: Key>(dir: &Path, name: &str) -> Vec<K> {
    ArtifactFile::open(dir.join(name))
        .unwrap_or_else(|e| panic!("opening {name}: {e}"))
        .values::<K>()
        .unwrap_or_else(|e| panic!("decoding {name}: {e}"))
}

/// Position of `key` in a strictly ascending slice.
pub fn index_of<K: Key>(keys: &[K], key: K) -> usize {
    keys.binary_search(&key)
        .unwrap_or_else(|_| panic!("{key} is not in the subset"))
}

/// Pearson chi-square statistic of `counts` against a uniform expectation.
pub fn chi_square_uniform(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    let expected = total as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum()
}
