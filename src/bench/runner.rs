use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::conf::BenchConfig;
use crate::core::BenchgenError;
use crate::io::artifact::{Purpose, format_selectivity};

use super::Catalog;

/// One run of the external benchmark binary:
/// `<executable> <key_type>_t <iterations> <data> <eq> <rg> <result_prefix>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub executable: PathBuf,
    pub key_type: String,
    pub iterations: u32,
    pub data_file: PathBuf,
    pub eq_file: PathBuf,
    pub rg_file: PathBuf,
    pub result_prefix: PathBuf,
}

impl Invocation {
    pub fn args(&self) -> Vec<OsString> {
        vec![
            format!("{}_t", self.key_type).into(),
            self.iterations.to_string().into(),
            self.data_file.clone().into(),
            self.eq_file.clone().into(),
            self.rg_file.clone().into(),
            self.result_prefix.clone().into(),
        ]
    }

    pub fn run(&self) -> Result<(), BenchgenError> {
        let status = Command::new(&self.executable)
            .args(self.args())
            .status()
            .map_err(|e| {
                BenchgenError::BenchmarkError(format!(
                    "starting {}: {}",
                    self.executable.display(),
                    e
                ))
            })?;
        if !status.success() {
            return Err(BenchgenError::BenchmarkError(format!("{self} exited with {status}")));
        }
        Ok(())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.executable.display())?;
        for arg in self.args() {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchPlan {
    pub invocations: Vec<Invocation>,
    /// Result prefixes that already have a JSON result.
    pub skipped: Vec<String>,
}

/// File names of the `*.json` results in `dir`; empty if `dir` does not exist.
pub fn existing_results(dir: &Path) -> Result<Vec<String>, BenchgenError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map_err(|e| BenchgenError::IoError(format!("reading directory {}: {}", dir.display(), e)))?
        .filter_map(|entry| {
            let name = entry.ok()?.file_name().into_string().ok()?;
            name.ends_with(".json").then_some(name)
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Ordering token used in result prefixes; result grouping splits on `_`,
/// so the ascending kind is shortened to `asc`.
fn result_ordering(kind: &str) -> &str {
    match kind {
        "asc_sorted" => "asc",
        other => other,
    }
}

fn has_result(existing: &[String], prefix: &str) -> bool {
    existing.iter().any(|name| {
        name.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') || rest.starts_with('.'))
    })
}

/// Pair every dataset artifact with the equality and range lookups of the
/// same dataset, width and size.
///
/// Runs are ordered by dataset, then ordering, then width (widest first),
/// then size (ascending), then selectivity as found on disk. Combinations
/// missing a data or lookup file are left out.
pub fn plan(catalog: &Catalog, config: &BenchConfig, existing: &[String]) -> BenchPlan {
    let mut out = BenchPlan::default();
    for dataset in catalog.datasets() {
        for ordering in &config.orderings {
            for width in catalog.widths() {
                for size in catalog.sizes(dataset, width) {
                    let Some(data) = catalog.find(dataset, width, size, ordering).next() else {
                        debug!("no {ordering} data for {dataset} {width} {size}");
                        continue;
                    };
                    let Some(eq) = catalog.find(dataset, width, size, "eq").next() else {
                        debug!("no equality lookups for {dataset} {width} {size}");
                        continue;
                    };
                    for rg in catalog.find(dataset, width, size, "rg") {
                        let Purpose::Range { selectivity, .. } = rg.name.purpose else {
                            continue;
                        };
                        let prefix = format!(
                            "{dataset}_{}_{width}_{}_{size:09}_select_{}",
                            result_ordering(ordering),
                            config.value_type,
                            format_selectivity(selectivity)
                        );
                        if has_result(existing, &prefix) {
                            out.skipped.push(prefix);
                            continue;
                        }
                        out.invocations.push(Invocation {
                            executable: config.executable.clone(),
                            key_type: width.to_string(),
                            iterations: config.iterations,
                            data_file: data.path.clone(),
                            eq_file: eq.path.clone(),
                            rg_file: rg.path.clone(),
                            result_prefix: config.results_dir.join(prefix),
                        });
                    }
                }
            }
        }
    }
    out
}

/// Scan, plan and run. With `dry_run` the invocations are only logged.
pub fn run_benchmarks(config: &BenchConfig, dry_run: bool) -> Result<BenchPlan, BenchgenError> {
    let catalog = Catalog::scan(&config.data_dir)?;
    info!(
        "found {} artifacts in {}",
        catalog.len(),
        config.data_dir.display()
    );
    let existing = existing_results(&config.results_dir)?;
    let plan = plan(&catalog, config, &existing);
    for prefix in &plan.skipped {
        info!("skipped {prefix}");
    }
    for invocation in &plan.invocations {
        if dry_run {
            info!("would run: {invocation}");
            continue;
        }
        info!("running: {invocation}");
        invocation.run()?;
    }
    Ok(plan)
}
