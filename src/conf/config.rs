use std::path::Path;

use config::{Config as CConfig, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::{
    conf::{BenchConfig, GeneratorConfig},
    core::BenchgenError::{self, ConfigParsingError},
};

/// Prefix of environment overrides, e.g. `BENCHGEN_GENERATOR__SEED=7`.
const ENV_PREFIX: &str = "BENCHGEN";
const ENV_SECTIONS: [&str; 2] = ["BENCHGEN_GENERATOR__", "BENCHGEN_BENCH__"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub bench: BenchConfig,
}

impl Config {
    pub fn from_str(toml_str: &str) -> Result<Config, BenchgenError> {
        let config = CConfig::builder()
            .add_source(File::from_str(toml_str, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigParsingError(e.to_string()))?
            .try_deserialize::<Config>()
            .map_err(|e| ConfigParsingError(e.to_string()))?;
        Ok(config)
    }

    /// Load defaults, then the optional TOML file, then `BENCHGEN_*`
    /// environment variables. Only `BENCHGEN_GENERATOR__*` and
    /// `BENCHGEN_BENCH__*` are read; other `BENCHGEN_*` variables are ignored.
    pub fn load(path: Option<&Path>) -> Result<Config, BenchgenError> {
        Self::load_with_env(path, env_overrides(std::env::vars()))
    }

    fn load_with_env(
        path: Option<&Path>,
        env: Map<String, String>,
    ) -> Result<Config, BenchgenError> {
        let mut builder = CConfig::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env)),
            )
            .build()?
            .try_deserialize::<Config>()?;
        Ok(config)
    }
}

/// Keep the variables that address a config section.
fn env_overrides(vars: impl Iterator<Item = (String, String)>) -> Map<String, String> {
    vars.filter(|(key, _)| {
        ENV_SECTIONS
            .iter()
            .any(|section| key.to_ascii_uppercase().starts_with(section))
    })
    .collect()
}
