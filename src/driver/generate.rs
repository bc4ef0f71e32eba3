use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use crate::conf::GeneratorConfig;
use crate::core::{BenchgenError, RandomSource};
use crate::io::artifact::{ArtifactName, Purpose, write_artifact_file};
use crate::keys::{Distribution, Key, KeyUniverse, KeyWidth, Subset, subsets};
use crate::workload::{RangeWorkload, equality_lookups, shuffled, validate_selectivity};

/// Per-subset workload parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadSpec {
    pub subset_count: usize,
    pub eq_count: usize,
    pub selectivities: Vec<f64>,
    /// Range lookups per selectivity, in pairs.
    pub rg_count: usize,
}

impl WorkloadSpec {
    fn validate(&self) -> Result<(), BenchgenError> {
        if self.subset_count == 0 {
            return Err(BenchgenError::InvalidParameter(
                "subset count must be positive".into(),
            ));
        }
        for &selectivity in &self.selectivities {
            validate_selectivity(selectivity)?;
        }
        Ok(())
    }
}

/// Paths written and skipped by one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn merge(&mut self, other: GenerationReport) {
        self.written.extend(other.written);
        self.skipped.extend(other.skipped);
    }
}

pub struct DatasetGenerator {
    config: GeneratorConfig,
    root: RandomSource,
}

impl DatasetGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let root = RandomSource::new(config.seed);
        Self { config, root }
    }

    /// Generate every width and both synthetic distributions.
    pub fn generate_all(
        &self,
        size: usize,
        spec: &WorkloadSpec,
    ) -> Result<GenerationReport, BenchgenError> {
        let mut report = GenerationReport::default();
        for width in KeyWidth::ALL {
            for distribution in &Distribution::GENERATED {
                report.merge(self.generate(distribution, width, size, spec)?);
            }
        }
        info!(
            "generation finished: {} written, {} skipped",
            report.written.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    pub fn generate(
        &self,
        distribution: &Distribution,
        width: KeyWidth,
        size: usize,
        spec: &WorkloadSpec,
    ) -> Result<GenerationReport, BenchgenError> {
        match width {
            KeyWidth::W32 => self.generate_typed::<u32>(distribution, size, spec),
            KeyWidth::W64 => self.generate_typed::<u64>(distribution, size, spec),
        }
    }

    fn generate_typed<K: Key>(
        &self,
        distribution: &Distribution,
        size: usize,
        spec: &WorkloadSpec,
    ) -> Result<GenerationReport, BenchgenError> {
        spec.validate()?;
        let label = format!("{distribution}_{}_{size}_universe", K::WIDTH);
        let mut rng = self.root.derive(&label);
        let universe = KeyUniverse::<K>::build(distribution, size, self.config.oversample, &mut rng)
            .map_err(|e| e.for_artifact(label))?;
        self.emit_universe(&universe, spec)
    }

    /// Write the sorted, shuffled, equality and range artifacts for every
    /// subset of `universe`.
    pub fn emit_universe<K: Key>(
        &self,
        universe: &KeyUniverse<K>,
        spec: &WorkloadSpec,
    ) -> Result<GenerationReport, BenchgenError> {
        spec.validate()?;
        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|e| {
            BenchgenError::IoError(format!("creating {}: {}", dir.display(), e))
        })?;

        let subsets = subsets(universe, spec.subset_count)?;
        info!(
            "generating {} subsets of {} {} (step {})",
            subsets.len(),
            universe.distribution(),
            K::WIDTH,
            universe.len() / spec.subset_count
        );

        let mut report = GenerationReport::default();
        let mut repeats = 0;
        for (i, subset) in subsets.iter().enumerate() {
            // A zero step repeats the full universe; its artifacts share one name.
            if i > 0 && subset.len() == subsets[i - 1].len() {
                repeats += 1;
                continue;
            }
            self.emit_subset(subset, spec, &mut report)?;
        }
        if repeats > 0 {
            warn!(
                "{repeats} subsets repeat size {}, their artifacts were written once",
                universe.len()
            );
        }
        Ok(report)
    }

    fn emit_subset<K: Key>(
        &self,
        subset: &Subset<'_, K>,
        spec: &WorkloadSpec,
        report: &mut GenerationReport,
    ) -> Result<(), BenchgenError> {
        let size = subset.len();
        let name = |purpose| ArtifactName::new(subset.distribution(), K::WIDTH, size, purpose);
        info!("generating artifacts for subset of size {size}");

        self.emit(name(Purpose::AscSorted), report, |_| {
            Ok(Cow::Borrowed(subset.keys()))
        })?;

        self.emit(
            name(Purpose::Equality {
                count: spec.eq_count,
            }),
            report,
            |rng| equality_lookups(subset, spec.eq_count, rng).map(Cow::Owned),
        )?;

        for &selectivity in &spec.selectivities {
            let purpose = Purpose::Range {
                count: spec.rg_count * 2,
                selectivity,
            };
            self.emit(name(purpose), report, |rng| {
                RangeWorkload::generate(subset, selectivity, spec.rg_count, rng)
                    .map(|rg| Cow::Owned(rg.to_flat()))
            })?;
        }

        self.emit(name(Purpose::Shuffled), report, |rng| {
            Ok(Cow::Owned(shuffled(subset, rng)))
        })?;
        Ok(())
    }

    /// Produce and write one artifact unless a file with its name exists.
    /// Each artifact draws from its own stream derived from its name.
    fn emit<'a, K: Key>(
        &self,
        name: ArtifactName,
        report: &mut GenerationReport,
        make: impl FnOnce(&mut RandomSource) -> Result<Cow<'a, [K]>, BenchgenError>,
    ) -> Result<(), BenchgenError> {
        let file_name = name.to_string();
        let path = self.config.output_dir.join(&file_name);
        if path.exists() {
            info!("skipping existing {}", path.display());
            report.skipped.push(path);
            return Ok(());
        }

        let mut rng = self.root.derive(&file_name);
        let values = make(&mut rng).map_err(|e| e.for_artifact(&file_name))?;
        write_artifact_file(&path, &values).map_err(|e| e.for_artifact(&file_name))?;
        info!("file was saved: {} ({} values)", path.display(), values.len());
        report.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::artifact::ArtifactFile;
    use tempfile::TempDir;

    fn generator(dir: &TempDir) -> DatasetGenerator {
        DatasetGenerator::new(GeneratorConfig {
            output_dir: dir.path().to_path_buf(),
            ..GeneratorConfig::default()
        })
    }

    fn spec() -> WorkloadSpec {
        WorkloadSpec {
            subset_count: 2,
            eq_count: 4,
            selectivities: vec![0.5],
            rg_count: 3,
        }
    }

    #[test]
    fn test_artifact_family_per_subset() {
        let dir = TempDir::new().unwrap();
        let report = generator(&dir)
            .generate(&Distribution::Dense, KeyWidth::W32, 10, &spec())
            .unwrap();
        let mut names: Vec<String> = report
            .written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "dense_uint32_10_asc_sorted",
                "dense_uint32_10_eq_4",
                "dense_uint32_10_rg_6_select_0.5",
                "dense_uint32_10_shuffled",
                "dense_uint32_5_asc_sorted",
                "dense_uint32_5_eq_4",
                "dense_uint32_5_rg_6_select_0.5",
                "dense_uint32_5_shuffled",
            ]
        );
        let sorted = ArtifactFile::open(dir.path().join("dense_uint32_5_asc_sorted")).unwrap();
        assert_eq!(sorted.values::<u32>().unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rerun_skips_existing() {
        let dir = TempDir::new().unwrap();
        let first = generator(&dir)
            .generate(&Distribution::Sparse, KeyWidth::W64, 20, &spec())
            .unwrap();
        let second = generator(&dir)
            .generate(&Distribution::Sparse, KeyWidth::W64, 20, &spec())
            .unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.skipped, first.written);
    }

    #[test]
    fn test_regenerated_artifact_is_identical() {
        let dir = TempDir::new().unwrap();
        let generator = generator(&dir);
        generator
            .generate(&Distribution::Sparse, KeyWidth::W32, 50, &spec())
            .unwrap();
        let path = dir.path().join("sparse_uint32_50_shuffled");
        let before = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let report = generator
            .generate(&Distribution::Sparse, KeyWidth::W32, 50, &spec())
            .unwrap();
        assert_eq!(report.written, vec![path.clone()]);
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_more_subsets_than_keys_writes_each_artifact_once() {
        let dir = TempDir::new().unwrap();
        let many = WorkloadSpec {
            subset_count: 5,
            ..spec()
        };
        let report = generator(&dir)
            .generate(&Distribution::Dense, KeyWidth::W64, 3, &many)
            .unwrap();
        assert_eq!(report.written.len(), 4);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let dir = TempDir::new().unwrap();
        let bad = WorkloadSpec {
            selectivities: vec![0.0],
            ..spec()
        };
        assert_eq!(
            generator(&dir).generate(&Distribution::Dense, KeyWidth::W32, 10, &bad),
            Err(BenchgenError::InvalidSelectivity(0.0))
        );
    }

    #[test]
    fn test_universe_failure_names_dataset() {
        let dir = TempDir::new().unwrap();
        let err = generator(&dir)
            .generate(&Distribution::Sparse, KeyWidth::W32, u32::MAX as usize, &spec())
            .unwrap_err();
        match err {
            BenchgenError::Artifact { name, source } => {
                assert_eq!(name, format!("sparse_uint32_{}_universe", u32::MAX));
                assert!(matches!(*source, BenchgenError::InsufficientUniqueValues { .. }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
