use std::fmt;
use std::str::FromStr;

use crate::core::BenchgenError;
use crate::keys::{Distribution, KeyWidth};

/// What an artifact file holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Purpose {
    /// The subset itself, ascending.
    AscSorted,
    /// The subset in random order.
    Shuffled,
    /// Equality lookups; `count` values.
    Equality { count: usize },
    /// Range lookups as flat pairs; `count` values, i.e. `count / 2` pairs.
    Range { count: usize, selectivity: f64 },
}

impl Purpose {
    /// Short tag shared by all artifacts of the same kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Purpose::AscSorted => "asc_sorted",
            Purpose::Shuffled => "shuffled",
            Purpose::Equality { .. } => "eq",
            Purpose::Range { .. } => "rg",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Purpose::AscSorted | Purpose::Shuffled => f.write_str(self.kind()),
            Purpose::Equality { count } => write!(f, "eq_{count}"),
            Purpose::Range { count, selectivity } => {
                write!(f, "rg_{count}_select_{}", format_selectivity(*selectivity))
            }
        }
    }
}

/// Render a selectivity the way existing data and result files spell it:
/// shortest round-trip digits, `1.0` rather than `1`, and scientific
/// notation with a two-digit exponent below `1e-4` (`1e-05`).
pub fn format_selectivity(value: f64) -> String {
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if value.is_finite() && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }
    let fixed = value.to_string();
    if value.is_finite() && !fixed.contains('.') {
        format!("{fixed}.0")
    } else {
        fixed
    }
}

impl FromStr for Purpose {
    type Err = BenchgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || BenchgenError::MalformedArtifact(format!("unknown purpose '{s}'"));
        let parts: Vec<&str> = s.split('_').collect();
        match parts.as_slice() {
            ["asc", "sorted"] => Ok(Purpose::AscSorted),
            ["shuffled"] => Ok(Purpose::Shuffled),
            ["eq", count] => Ok(Purpose::Equality {
                count: count.parse().map_err(|_| malformed())?,
            }),
            ["rg", count, "select", selectivity] => Ok(Purpose::Range {
                count: count.parse().map_err(|_| malformed())?,
                selectivity: selectivity.parse().map_err(|_| malformed())?,
            }),
            _ => Err(malformed()),
        }
    }
}

/// Parsed form of `<dataset>_<width>_<size>_<purpose>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactName {
    pub dataset: Distribution,
    pub width: KeyWidth,
    pub size: usize,
    pub purpose: Purpose,
}

impl ArtifactName {
    pub fn new(dataset: &Distribution, width: KeyWidth, size: usize, purpose: Purpose) -> Self {
        Self {
            dataset: dataset.clone(),
            width,
            size,
            purpose,
        }
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.dataset, self.width, self.size, self.purpose
        )
    }
}

impl FromStr for ArtifactName {
    type Err = BenchgenError;

    /// The dataset label may itself contain underscores (`osm_cellids`); the
    /// first `uint*` token marks where it ends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split('_').collect();
        let pos = tokens
            .iter()
            .position(|t| t.starts_with("uint"))
            .ok_or_else(|| BenchgenError::MalformedArtifact(format!("no key width in '{s}'")))?;
        if pos == 0 {
            return Err(BenchgenError::MalformedArtifact(format!(
                "no dataset label in '{s}'"
            )));
        }
        let width: KeyWidth = tokens[pos].parse()?;
        let size = tokens
            .get(pos + 1)
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or_else(|| BenchgenError::MalformedArtifact(format!("no size in '{s}'")))?;
        let purpose: Purpose = tokens
            .get(pos + 2..)
            .map(|rest| rest.join("_"))
            .unwrap_or_default()
            .parse()?;

        Ok(Self {
            dataset: tokens[..pos].join("_").parse()?,
            width,
            size,
            purpose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        let sorted = ArtifactName::new(&Distribution::Sparse, KeyWidth::W64, 8_000_000, Purpose::AscSorted);
        assert_eq!(sorted.to_string(), "sparse_uint64_8000000_asc_sorted");

        let eq = ArtifactName::new(&Distribution::Dense, KeyWidth::W32, 100, Purpose::Equality { count: 5 });
        assert_eq!(eq.to_string(), "dense_uint32_100_eq_5");

        let rg = ArtifactName::new(
            &Distribution::Sparse,
            KeyWidth::W64,
            8_000_000,
            Purpose::Range {
                count: 2_000_000,
                selectivity: 0.0001,
            },
        );
        assert_eq!(rg.to_string(), "sparse_uint64_8000000_rg_2000000_select_0.0001");
    }

    #[test]
    fn test_parse_names() {
        let name: ArtifactName = "sparse_uint64_8000000_rg_2000000_select_0.0001".parse().unwrap();
        assert_eq!(name.dataset, Distribution::Sparse);
        assert_eq!(name.width, KeyWidth::W64);
        assert_eq!(name.size, 8_000_000);
        assert_eq!(
            name.purpose,
            Purpose::Range {
                count: 2_000_000,
                selectivity: 0.0001
            }
        );

        let name: ArtifactName = "osm_cellids_uint64_1000_shuffled".parse().unwrap();
        assert_eq!(name.dataset, Distribution::External("osm_cellids".into()));
        assert_eq!(name.purpose, Purpose::Shuffled);
        assert_eq!(name.to_string(), "osm_cellids_uint64_1000_shuffled");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "dense_uint16_10_asc_sorted".parse::<ArtifactName>(),
            Err(BenchgenError::UnsupportedWidth(_))
        ));
        assert!(matches!(
            "dense_uint32_10_dsc_sorted".parse::<ArtifactName>(),
            Err(BenchgenError::MalformedArtifact(_))
        ));
        assert!(matches!(
            "dense_uint32_ten_shuffled".parse::<ArtifactName>(),
            Err(BenchgenError::MalformedArtifact(_))
        ));
        assert!(matches!(
            "results.json".parse::<ArtifactName>(),
            Err(BenchgenError::MalformedArtifact(_))
        ));
        assert!(matches!(
            "dense_uint32_10".parse::<ArtifactName>(),
            Err(BenchgenError::MalformedArtifact(_))
        ));
    }

    #[test]
    fn test_purpose_kind() {
        assert_eq!(Purpose::Equality { count: 3 }.kind(), "eq");
        assert_eq!(Purpose::Range { count: 2, selectivity: 0.5 }.kind(), "rg");
    }

    #[test]
    fn test_format_selectivity() {
        assert_eq!(format_selectivity(1.0), "1.0");
        assert_eq!(format_selectivity(0.5), "0.5");
        assert_eq!(format_selectivity(0.1), "0.1");
        assert_eq!(format_selectivity(0.0001), "0.0001");
        assert_eq!(format_selectivity(0.00001), "1e-05");
        assert_eq!(format_selectivity(0.000025), "2.5e-05");
    }

    #[test]
    fn test_range_names_use_float_repr() {
        let range = |selectivity| {
            ArtifactName::new(
                &Distribution::Dense,
                KeyWidth::W32,
                100,
                Purpose::Range { count: 4, selectivity },
            )
            .to_string()
        };
        assert_eq!(range(1.0), "dense_uint32_100_rg_4_select_1.0");
        assert_eq!(range(1e-5), "dense_uint32_100_rg_4_select_1e-05");
        assert_eq!(range(0.5), "dense_uint32_100_rg_4_select_0.5");
    }

    #[test]
    fn test_parse_accepts_both_selectivity_spellings() {
        for (name, selectivity) in [
            ("dense_uint32_100_rg_4_select_1.0", 1.0),
            ("dense_uint32_100_rg_4_select_1", 1.0),
            ("dense_uint32_100_rg_4_select_1e-05", 1e-5),
            ("dense_uint32_100_rg_4_select_0.00001", 1e-5),
        ] {
            let parsed: ArtifactName = name.parse().unwrap();
            assert_eq!(parsed.purpose, Purpose::Range { count: 4, selectivity });
        }
    }
}
