mod bench;
mod config;
mod generator;

pub use bench::BenchConfig;
pub use config::Config;
pub use generator::GeneratorConfig;
