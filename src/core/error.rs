use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BenchgenError {
    #[error("Cannot parse config: {0}")]
    ConfigParsingError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Unsupported key width: {0} (expected 32 or 64)")]
    UnsupportedWidth(String),
    #[error("Insufficient unique values: requested {requested}, got {available}")]
    InsufficientUniqueValues { requested: u64, available: u64 },
    #[error("Invalid selectivity {0}: must be in (0, 1]")]
    InvalidSelectivity(f64),
    #[error("Range too large: range length {range_length} exceeds subset size {subset_size}")]
    RangeTooLarge {
        range_length: usize,
        subset_size: usize,
    },
    #[error("Truncated input: expected {expected} bytes, got {actual}")]
    TruncatedInput { expected: u64, actual: u64 },
    #[error("Malformed artifact: {0}")]
    MalformedArtifact(String),
    #[error("Benchmark error: {0}")]
    BenchmarkError(String),
    #[error("{name}: {source}")]
    Artifact {
        name: String,
        #[source]
        source: Box<BenchgenError>,
    },
}

impl BenchgenError {
    /// Attach the name of the artifact being produced when the error occurred.
    pub fn for_artifact(self, name: impl Into<String>) -> Self {
        BenchgenError::Artifact {
            name: name.into(),
            source: Box::new(self),
        }
    }
}

impl From<std::io::Error> for BenchgenError {
    fn from(err: std::io::Error) -> Self {
        BenchgenError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for BenchgenError {
    fn from(err: config::ConfigError) -> Self {
        BenchgenError::ConfigParsingError(err.to_string())
    }
}
