mod subset;
mod universe;

pub use subset::{Subset, subset_sizes, subsets};
pub use universe::{DEFAULT_OVERSAMPLE, KeyUniverse};

use std::fmt;
use std::str::FromStr;

use bytemuck::Pod;
use serde::{Deserialize, Serialize};

use crate::core::BenchgenError;

/// Bit width of the generated keys. Carries everything that varies with the
/// width: sampling bound, serialized size and the label used in file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyWidth {
    #[serde(rename = "uint32")]
    W32,
    #[serde(rename = "uint64")]
    W64,
}

impl KeyWidth {
    pub const ALL: [KeyWidth; 2] = [KeyWidth::W32, KeyWidth::W64];

    pub fn byte_size(self) -> usize {
        match self {
            KeyWidth::W32 => 4,
            KeyWidth::W64 => 8,
        }
    }

    pub fn max_value(self) -> u64 {
        match self {
            KeyWidth::W32 => u32::MAX as u64,
            KeyWidth::W64 => u64::MAX,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyWidth::W32 => "uint32",
            KeyWidth::W64 => "uint64",
        }
    }
}

impl fmt::Display for KeyWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for KeyWidth {
    type Err = BenchgenError;

    /// Accepts `uint32`/`uint64`, `u32`/`u64` or the bare bit count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uint32" | "u32" | "32" => Ok(KeyWidth::W32),
            "uint64" | "u64" | "64" => Ok(KeyWidth::W64),
            other => Err(BenchgenError::UnsupportedWidth(other.to_string())),
        }
    }
}

/// How keys are spread over the representable range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Distribution {
    /// The contiguous range `[1, N]`.
    Dense,
    /// N distinct values drawn uniformly from `[0, max_value]`.
    Sparse,
    /// Keys loaded from an existing dataset, tagged with its label.
    External(String),
}

impl Distribution {
    pub const GENERATED: [Distribution; 2] = [Distribution::Dense, Distribution::Sparse];

    pub fn label(&self) -> &str {
        match self {
            Distribution::Dense => "dense",
            Distribution::Sparse => "sparse",
            Distribution::External(label) => label,
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Distribution {
    type Err = BenchgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dense" => Ok(Distribution::Dense),
            "sparse" => Ok(Distribution::Sparse),
            "" => Err(BenchgenError::InvalidParameter(
                "empty dataset label".into(),
            )),
            other => Ok(Distribution::External(other.to_string())),
        }
    }
}

/// Fixed-width unsigned key type. Implemented for `u32` and `u64`; generic
/// code is instantiated once per width via [`KeyWidth`] dispatch.
pub trait Key: Pod + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const WIDTH: KeyWidth;

    /// Narrowing conversion. Callers keep `v <= Self::WIDTH.max_value()`.
    fn from_u64(v: u64) -> Self;

    fn to_u64(self) -> u64;

    fn to_le(self) -> Self;

    fn from_le(self) -> Self;
}

impl Key for u32 {
    const WIDTH: KeyWidth = KeyWidth::W32;

    fn from_u64(v: u64) -> Self {
        v as u32
    }

    fn to_u64(self) -> u64 {
        self as u64
    }

    fn to_le(self) -> Self {
        u32::to_le(self)
    }

    fn from_le(self) -> Self {
        u32::from_le(self)
    }
}

impl Key for u64 {
    const WIDTH: KeyWidth = KeyWidth::W64;

    fn from_u64(v: u64) -> Self {
        v
    }

    fn to_u64(self) -> u64 {
        self
    }

    fn to_le(self) -> Self {
        u64::to_le(self)
    }

    fn from_le(self) -> Self {
        u64::from_le(self)
    }
}

pub fn is_strictly_ascending<K: Key>(keys: &[K]) -> bool {
    keys.windows(2).all(|w| w[0] < w[1])
}
