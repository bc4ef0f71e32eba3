use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use log::kv::{ToValue, Value};

use crate::core::BenchgenError;
use crate::keys::KeyWidth;
use crate::workload::validate_selectivity;

#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
pub struct CliArgs {
    /// TOML config file; `BENCHGEN_*` environment variables override it.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

impl ToValue for CliArgs {
    fn to_value(&self) -> Value<'_> {
        Value::from_debug(self)
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Generate dense and sparse datasets for both key widths, with lookups.
    Generate(GenerateArgs),
    /// Crop an existing dataset artifact and derive lookups from it.
    Crop(CropArgs),
    /// Print a summary of an artifact file.
    Inspect(InspectArgs),
    /// Run the external benchmark binary over the generated artifacts.
    Bench(BenchArgs),
}

#[derive(Args, Debug, PartialEq)]
pub struct GenerateArgs {
    /// Number of keys in the largest dataset.
    pub size: usize,
    /// Number of nested subsets, the full dataset included.
    pub subset_count: usize,
    /// Number of equality lookups per subset.
    pub eq_count: usize,
    /// Comma-separated range lookup selectivities, e.g. `0.001,0.01`.
    pub selectivities: SelectivityList,
    /// Number of range lookups per subset and selectivity.
    pub rg_count: usize,
}

#[derive(Args, Debug, PartialEq)]
pub struct CropArgs {
    /// Source artifact, e.g. `resources/data/books_200M_uint64`.
    pub source: PathBuf,
    /// Number of keys to keep.
    pub size: usize,
    pub eq_count: usize,
    pub selectivities: SelectivityList,
    pub rg_count: usize,
    /// Key width; inferred from the `uint32`/`uint64` token of the file name when omitted.
    #[arg(long)]
    pub width: Option<KeyWidth>,
    /// Dataset label used in output names; defaults to the file name prefix.
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub subsets: usize,
}

#[derive(Args, Debug, PartialEq)]
pub struct InspectArgs {
    pub file: PathBuf,
    /// Key width; inferred from the file name when omitted.
    #[arg(long)]
    pub width: Option<KeyWidth>,
}

#[derive(Args, Debug, PartialEq)]
pub struct BenchArgs {
    /// Log the planned invocations without running them.
    #[arg(long)]
    pub dry_run: bool,
    #[arg(long)]
    pub executable: Option<PathBuf>,
    #[arg(long)]
    pub iterations: Option<u32>,
}

/// Comma-separated list of selectivities in `(0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectivityList(pub Vec<f64>);

impl FromStr for SelectivityList {
    type Err = BenchgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(|part| {
                let value: f64 = part.trim().parse().map_err(|_| {
                    BenchgenError::InvalidParameter(format!("not a selectivity: '{part}'"))
                })?;
                validate_selectivity(value)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SelectivityList)
    }
}
