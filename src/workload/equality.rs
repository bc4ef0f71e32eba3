use rand::Rng;

use crate::core::{BenchgenError, RandomSource};
use crate::keys::{Key, Subset};

/// Sample `count` keys uniformly with replacement from `subset`.
pub fn equality_lookups<K: Key>(
    subset: &Subset<'_, K>,
    count: usize,
    rng: &mut RandomSource,
) -> Result<Vec<K>, BenchgenError> {
    let keys = subset.keys();
    if keys.is_empty() && count > 0 {
        return Err(BenchgenError::InvalidParameter(
            "cannot sample equality lookups from an empty subset".into(),
        ));
    }
    Ok((0..count)
        .map(|_| keys[rng.gen_range(0..keys.len())])
        .collect())
}
