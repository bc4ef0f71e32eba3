use log::{debug, info};
use rand::Rng;

use crate::core::{BenchgenError, RandomSource};

use super::{Distribution, Key, KeyWidth, is_strictly_ascending};

/// Oversampling factor applied to sparse draws before deduplication.
pub const DEFAULT_OVERSAMPLE: f64 = 1.1;

/// Full, strictly ascending key set of one distribution and width.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyUniverse<K: Key> {
    distribution: Distribution,
    keys: Vec<K>,
}

impl<K: Key> KeyUniverse<K> {
    /// Build a universe of `count` keys. `oversample` only applies to sparse
    /// universes.
    pub fn build(
        distribution: &Distribution,
        count: usize,
        oversample: f64,
        rng: &mut RandomSource,
    ) -> Result<Self, BenchgenError> {
        let universe = match distribution {
            Distribution::Dense => Self::dense(count)?,
            Distribution::Sparse => Self::sparse(count, oversample, rng)?,
            Distribution::External(label) => {
                return Err(BenchgenError::InvalidParameter(format!(
                    "cannot synthesize keys for external dataset '{label}'"
                )));
            }
        };
        info!(
            "built {} {} universe with {} keys",
            universe.distribution,
            K::WIDTH,
            universe.len()
        );
        Ok(universe)
    }

    /// `1..=count`.
    pub fn dense(count: usize) -> Result<Self, BenchgenError> {
        check_count(count)?;
        if count as u64 > K::WIDTH.max_value() {
            return Err(BenchgenError::InvalidParameter(format!(
                "dense {} universe cannot hold {count} keys",
                K::WIDTH
            )));
        }
        let keys = (1..=count as u64).map(K::from_u64).collect();
        Ok(Self {
            distribution: Distribution::Dense,
            keys,
        })
    }

    /// Draw `ceil(count * oversample)` values uniformly from the full range of
    /// the width, deduplicate, sort and keep the `count` smallest.
    ///
    /// Requests whose expected distinct count falls below `count` are
    /// rejected before drawing. The check is conservative: near that boundary
    /// a draw that would have yielded enough distinct values is still
    /// refused. Otherwise failure is decided by the actual distinct count.
    pub fn sparse(
        count: usize,
        oversample: f64,
        rng: &mut RandomSource,
    ) -> Result<Self, BenchgenError> {
        check_count(count)?;
        if !(oversample >= 1.0 && oversample.is_finite()) {
            return Err(BenchgenError::InvalidParameter(format!(
                "oversample factor must be >= 1.0, got {oversample}"
            )));
        }

        let max = K::WIDTH.max_value();
        let draws = oversampled_draws(count, oversample);
        let expected = expected_distinct(max, draws);
        // Conservative: rejects on the expected distinct count, before allocating.
        if draws > usize::MAX as f64 || expected < count as f64 {
            return Err(BenchgenError::InsufficientUniqueValues {
                requested: count as u64,
                available: expected.min(u64::MAX as f64) as u64,
            });
        }
        let draws = draws as usize;
        debug!("drawing {draws} {} values for {count} sparse keys", K::WIDTH);

        let mut keys: Vec<K> = (0..draws)
            .map(|_| K::from_u64(rng.gen_range(0..=max)))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        if keys.len() < count {
            return Err(BenchgenError::InsufficientUniqueValues {
                requested: count as u64,
                available: keys.len() as u64,
            });
        }
        keys.truncate(count);
        keys.shrink_to_fit();

        Ok(Self {
            distribution: Distribution::Sparse,
            keys,
        })
    }

    /// Take keys from an existing dataset: sort, drop duplicates and keep the
    /// `count` smallest.
    pub fn from_keys(label: &str, mut keys: Vec<K>, count: usize) -> Result<Self, BenchgenError> {
        check_count(count)?;
        let distribution: Distribution = label.parse()?;
        if !is_strictly_ascending(&keys) {
            let before = keys.len();
            keys.sort_unstable();
            keys.dedup();
            if keys.len() != before {
                info!(
                    "dropped {} duplicate keys from '{label}'",
                    before - keys.len()
                );
            }
        }
        if keys.len() < count {
            return Err(BenchgenError::InsufficientUniqueValues {
                requested: count as u64,
                available: keys.len() as u64,
            });
        }
        keys.truncate(count);
        Ok(Self { distribution, keys })
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn width(&self) -> KeyWidth {
        K::WIDTH
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn check_count(count: usize) -> Result<(), BenchgenError> {
    if count == 0 {
        return Err(BenchgenError::InvalidParameter(
            "key count must be positive".into(),
        ));
    }
    Ok(())
}

fn oversampled_draws(count: usize, oversample: f64) -> f64 {
    let exact = count as f64 * oversample;
    // 10 * 1.1 is 11.000000000000002 in binary floating point.
    if (exact - exact.round()).abs() < 1e-6 {
        exact.round()
    } else {
        exact.ceil()
    }
}

/// Expected number of distinct values after `draws` uniform draws from
/// `[0, max]`.
fn expected_distinct(max: u64, draws: f64) -> f64 {
    let range = max as f64 + 1.0;
    range * -(draws * (-1.0 / range).ln_1p()).exp_m1()
}
