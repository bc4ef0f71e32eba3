mod args;
mod error;
mod logger;
mod random;

pub use args::{BenchArgs, CliArgs, Command, CropArgs, GenerateArgs, InspectArgs, SelectivityList};
pub use error::BenchgenError;
pub use logger::setup_logging;
pub use random::{DEFAULT_SEED, RandomSource};
