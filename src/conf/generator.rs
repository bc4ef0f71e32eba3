use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_SEED;
use crate::keys::DEFAULT_OVERSAMPLE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default = "GeneratorConfig::default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "GeneratorConfig::default_seed")]
    pub seed: u64,
    #[serde(default = "GeneratorConfig::default_oversample")]
    pub oversample: f64,
}

impl GeneratorConfig {
    fn default_output_dir() -> PathBuf {
        PathBuf::from("resources/data/")
    }

    fn default_seed() -> u64 {
        DEFAULT_SEED
    }

    fn default_oversample() -> f64 {
        DEFAULT_OVERSAMPLE
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: Self::default_output_dir(),
            seed: Self::default_seed(),
            oversample: Self::default_oversample(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_default() {
        let conf = GeneratorConfig::default();
        assert_eq!(conf.output_dir, PathBuf::from("resources/data/"));
        assert_eq!(conf.seed, 1337);
        assert_eq!(conf.oversample, 1.1);
    }
}
