use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::keys::KeyWidth;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    #[serde(default = "BenchConfig::default_executable")]
    pub executable: PathBuf,
    #[serde(default = "BenchConfig::default_iterations")]
    pub iterations: u32,
    #[serde(default = "BenchConfig::default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "BenchConfig::default_results_dir")]
    pub results_dir: PathBuf,
    /// Value (tuple identifier) type the benchmark binary was built for.
    #[serde(default = "BenchConfig::default_value_type")]
    pub value_type: KeyWidth,
    /// Dataset artifact kinds used as insertion order, in run order.
    #[serde(default = "BenchConfig::default_orderings")]
    pub orderings: Vec<String>,
}

impl BenchConfig {
    fn default_executable() -> PathBuf {
        PathBuf::from("./imiBench")
    }

    fn default_iterations() -> u32 {
        12
    }

    fn default_data_dir() -> PathBuf {
        PathBuf::from("resources/data/")
    }

    fn default_results_dir() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_value_type() -> KeyWidth {
        KeyWidth::W64
    }

    fn default_orderings() -> Vec<String> {
        vec!["shuffled".to_string(), "asc_sorted".to_string()]
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            executable: Self::default_executable(),
            iterations: Self::default_iterations(),
            data_dir: Self::default_data_dir(),
            results_dir: Self::default_results_dir(),
            value_type: Self::default_value_type(),
            orderings: Self::default_orderings(),
        }
    }
}
