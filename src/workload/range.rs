use log::{debug, warn};
use rand::Rng;

use crate::core::{BenchgenError, RandomSource};
use crate::keys::{Key, Subset};

/// Two keys bounding a range lookup, in draw order. `first` is not
/// necessarily the smaller one; use [`RangePair::bounds`] for `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePair<K> {
    pub first: K,
    pub second: K,
}

impl<K: Key> RangePair<K> {
    pub fn bounds(&self) -> (K, K) {
        (self.first.min(self.second), self.first.max(self.second))
    }

    /// Rebuild pairs from a flat `first, second, first, second, ...` sequence.
    pub fn from_flat(values: &[K]) -> Result<Vec<Self>, BenchgenError> {
        if values.len() % 2 != 0 {
            return Err(BenchgenError::MalformedArtifact(format!(
                "range lookups need an even number of values, got {}",
                values.len()
            )));
        }
        Ok(values
            .chunks_exact(2)
            .map(|c| RangePair {
                first: c[0],
                second: c[1],
            })
            .collect())
    }
}

pub fn validate_selectivity(selectivity: f64) -> Result<f64, BenchgenError> {
    if selectivity > 0.0 && selectivity <= 1.0 {
        Ok(selectivity)
    } else {
        Err(BenchgenError::InvalidSelectivity(selectivity))
    }
}

/// Number of consecutive keys a range at `selectivity` spans in a subset of
/// `subset_size` keys: `floor(selectivity * subset_size)`.
pub fn range_length(subset_size: usize, selectivity: f64) -> Result<usize, BenchgenError> {
    let selectivity = validate_selectivity(selectivity)?;
    let length = (selectivity * subset_size as f64).floor() as usize;
    if length > subset_size {
        return Err(BenchgenError::RangeTooLarge {
            range_length: length,
            subset_size,
        });
    }
    Ok(length)
}

/// Range lookups of one selectivity over one subset.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeWorkload<K> {
    range_length: usize,
    pairs: Vec<RangePair<K>>,
}

impl<K: Key> RangeWorkload<K> {
    /// Draw `count` pairs whose keys sit exactly `range_length - 1` positions
    /// apart in the subset.
    ///
    /// The first index is uniform over the subset. The range grows forward
    /// when it fits, else backward, else the index is redrawn.
    pub fn generate(
        subset: &Subset<'_, K>,
        selectivity: f64,
        count: usize,
        rng: &mut RandomSource,
    ) -> Result<Self, BenchgenError> {
        let keys = subset.keys();
        let size = keys.len();
        let length = range_length(size, selectivity)?;
        if size == 0 && count > 0 {
            return Err(BenchgenError::InvalidParameter(
                "cannot sample range lookups from an empty subset".into(),
            ));
        }
        let span = if length == 0 {
            warn!(
                "selectivity {selectivity} selects no keys out of {size}, emitting single-key ranges"
            );
            0
        } else {
            length - 1
        };
        debug!("range length for selectivity {selectivity} over {size} keys: {length}");

        let pairs = (0..count)
            .map(|_| {
                let (first, second) = draw_pair(size, span, rng);
                RangePair {
                    first: keys[first],
                    second: keys[second],
                }
            })
            .collect();

        Ok(Self {
            range_length: length,
            pairs,
        })
    }

    pub fn range_length(&self) -> usize {
        self.range_length
    }

    pub fn pairs(&self) -> &[RangePair<K>] {
        &self.pairs
    }

    /// Flatten to the serialized layout: `first0, second0, first1, ...`.
    pub fn to_flat(&self) -> Vec<K> {
        self.pairs
            .iter()
            .flat_map(|p| [p.first, p.second])
            .collect()
    }
}

/// Requires `span < size`, which `range_length` guarantees, so at least
/// one index always succeeds.
fn draw_pair(size: usize, span: usize, rng: &mut RandomSource) -> (usize, usize) {
    loop {
        let first = rng.gen_range(0..size);
        if first + span < size {
            return (first, first + span);
        }
        if first >= span {
            return (first, first - span);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyUniverse;

    fn index_of(keys: &[u32], key: u32) -> usize {
        keys.binary_search(&key).unwrap()
    }

    #[test]
    fn test_range_length() {
        assert_eq!(range_length(100, 0.1), Ok(10));
        assert_eq!(range_length(100, 1.0), Ok(100));
        assert_eq!(range_length(90, 0.25), Ok(22));
        assert_eq!(range_length(5, 0.1), Ok(0));
        assert_eq!(range_length(10, 0.0), Err(BenchgenError::InvalidSelectivity(0.0)));
        assert_eq!(range_length(10, 1.5), Err(BenchgenError::InvalidSelectivity(1.5)));
    }

    #[test]
    fn test_pairs_span_exact_distance() {
        let u = KeyUniverse::<u32>::dense(100).unwrap();
        let subset = Subset::from(&u);
        let mut rng = RandomSource::new(17);
        let rg = RangeWorkload::generate(&subset, 0.1, 500, &mut rng).unwrap();
        assert_eq!(rg.range_length(), 10);
        assert_eq!(rg.pairs().len(), 500);
        for p in rg.pairs() {
            let a = index_of(u.keys(), p.first);
            let b = index_of(u.keys(), p.second);
            assert_eq!(a.abs_diff(b), 9);
        }
    }

    #[test]
    fn test_large_selectivity_expands_both_ways() {
        let u = KeyUniverse::<u32>::dense(20).unwrap();
        let subset = Subset::from(&u);
        let mut rng = RandomSource::new(99);
        let rg = RangeWorkload::generate(&subset, 0.75, 200, &mut rng).unwrap();
        let mut forward = false;
        let mut backward = false;
        for p in rg.pairs() {
            let a = index_of(u.keys(), p.first);
            let b = index_of(u.keys(), p.second);
            assert_eq!(a.abs_diff(b), 14);
            forward |= b > a;
            backward |= b < a;
            // Indices 6..=13 fit neither way and are always redrawn.
            assert!(a <= 5 || a >= 14);
        }
        assert!(forward && backward);
    }

    #[test]
    fn test_full_selectivity_spans_subset() {
        let u = KeyUniverse::<u32>::dense(20).unwrap();
        let mut rng = RandomSource::new(1);
        let rg = RangeWorkload::generate(&Subset::from(&u), 1.0, 20, &mut rng).unwrap();
        for p in rg.pairs() {
            assert_eq!(p.bounds(), (1, 20));
        }
    }

    #[test]
    fn test_zero_length_degenerates_to_single_key() {
        let u = KeyUniverse::<u32>::dense(5).unwrap();
        let mut rng = RandomSource::new(1);
        let rg = RangeWorkload::generate(&Subset::from(&u), 0.01, 10, &mut rng).unwrap();
        assert_eq!(rg.range_length(), 0);
        assert!(rg.pairs().iter().all(|p| p.first == p.second));
    }

    #[test]
    fn test_flat_round_trip() {
        let u = KeyUniverse::<u32>::dense(50).unwrap();
        let mut rng = RandomSource::new(8);
        let rg = RangeWorkload::generate(&Subset::from(&u), 0.2, 7, &mut rng).unwrap();
        let flat = rg.to_flat();
        assert_eq!(flat.len(), 14);
        assert_eq!(RangePair::from_flat(&flat).unwrap(), rg.pairs());
    }

    #[test]
    fn test_from_flat_rejects_odd_length() {
        assert!(matches!(
            RangePair::<u64>::from_flat(&[1, 2, 3]),
            Err(BenchgenError::MalformedArtifact(_))
        ));
    }

    #[test]
    fn test_bounds_orders_pair() {
        let p = RangePair { first: 9u64, second: 2 };
        assert_eq!(p.bounds(), (2, 9));
    }
}
