use crate::core::BenchgenError;

use super::{Distribution, Key, KeyUniverse, KeyWidth, is_strictly_ascending};

/// Read-only prefix view of a [`KeyUniverse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subset<'a, K: Key> {
    distribution: &'a Distribution,
    keys: &'a [K],
}

impl<'a, K: Key> Subset<'a, K> {
    pub fn new(distribution: &'a Distribution, keys: &'a [K]) -> Self {
        Self { distribution, keys }
    }

    pub fn distribution(&self) -> &'a Distribution {
        self.distribution
    }

    pub fn width(&self) -> KeyWidth {
        K::WIDTH
    }

    pub fn keys(&self) -> &'a [K] {
        self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<'a, K: Key> From<&'a KeyUniverse<K>> for Subset<'a, K> {
    fn from(universe: &'a KeyUniverse<K>) -> Self {
        Subset::new(universe.distribution(), universe.keys())
    }
}

/// Sizes of the nested subsets of a universe with `total` keys.
///
/// The first size is `total`; each following one is `total / subset_count`
/// smaller (integer division). The remainder stays in the last subset, so
/// 105 keys in 10 subsets give `[105, 95, ..., 15]`.
pub fn subset_sizes(total: usize, subset_count: usize) -> Result<Vec<usize>, BenchgenError> {
    if subset_count == 0 {
        return Err(BenchgenError::InvalidParameter(
            "subset count must be positive".into(),
        ));
    }
    let step = total / subset_count;
    Ok((0..subset_count).map(|i| total - i * step).collect())
}

/// Split a universe into `subset_count` nested subsets of decreasing size.
/// Each subset is the previous one with its last `step` keys trimmed.
pub fn subsets<K: Key>(
    universe: &KeyUniverse<K>,
    subset_count: usize,
) -> Result<Vec<Subset<'_, K>>, BenchgenError> {
    let keys = universe.keys();
    subset_sizes(keys.len(), subset_count)?
        .into_iter()
        .map(|size| {
            let subset = Subset::new(universe.distribution(), &keys[..size]);
            if !is_strictly_ascending(subset.keys()) {
                return Err(BenchgenError::InvalidParameter(format!(
                    "subset of size {size} is not strictly ascending"
                )));
            }
            Ok(subset)
        })
        .collect()
}
