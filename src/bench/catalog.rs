use std::path::{Path, PathBuf};

use log::debug;

use crate::core::BenchgenError;
use crate::io::artifact::ArtifactName;
use crate::keys::{Distribution, KeyWidth};

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: ArtifactName,
    pub path: PathBuf,
}

/// Index of the artifacts found in a data directory, keyed by parsed name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Scan `dir` for artifact files. Files whose names do not parse are
    /// ignored.
    pub fn scan(dir: &Path) -> Result<Self, BenchgenError> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| BenchgenError::IoError(format!("reading directory {}: {}", dir.display(), e)))?
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if !path.is_file() {
                    return None;
                }
                let file_name = path.file_name()?.to_str()?;
                match file_name.parse::<ArtifactName>() {
                    Ok(name) => Some(CatalogEntry { name, path }),
                    Err(e) => {
                        debug!("ignoring {}: {e}", path.display());
                        None
                    }
                }
            })
            .collect();
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dataset labels, sorted.
    pub fn datasets(&self) -> Vec<&Distribution> {
        let mut datasets: Vec<&Distribution> = self.entries.iter().map(|e| &e.name.dataset).collect();
        datasets.sort();
        datasets.dedup();
        datasets
    }

    /// Key widths, widest first.
    pub fn widths(&self) -> Vec<KeyWidth> {
        let mut widths: Vec<KeyWidth> = self.entries.iter().map(|e| e.name.width).collect();
        widths.sort_by(|a, b| b.cmp(a));
        widths.dedup();
        widths
    }

    /// Subset sizes of one dataset and width, ascending.
    pub fn sizes(&self, dataset: &Distribution, width: KeyWidth) -> Vec<usize> {
        let mut sizes: Vec<usize> = self
            .entries
            .iter()
            .filter(|e| &e.name.dataset == dataset && e.name.width == width)
            .map(|e| e.name.size)
            .collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Entries of one dataset, width and size whose purpose kind is `kind`
    /// (`asc_sorted`, `shuffled`, `eq` or `rg`).
    pub fn find<'a>(
        &'a self,
        dataset: &'a Distribution,
        width: KeyWidth,
        size: usize,
        kind: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |e| {
            &e.name.dataset == dataset
                && e.name.width == width
                && e.name.size == size
                && e.name.purpose.kind() == kind
        })
    }
}
