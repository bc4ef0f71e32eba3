use rand::seq::SliceRandom;

use crate::core::RandomSource;
use crate::keys::{Key, Subset};

/// Uniformly random permutation of the subset (Fisher-Yates).
pub fn shuffled<K: Key>(subset: &Subset<'_, K>, rng: &mut RandomSource) -> Vec<K> {
    let mut keys = subset.keys().to_vec();
    keys.shuffle(rng);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyUniverse;

    #[test]
    fn test_same_multiset() {
        let u = KeyUniverse::<u32>::dense(1000).unwrap();
        let mut rng = RandomSource::new(11);
        let mut out = shuffled(&Subset::from(&u), &mut rng);
        assert_ne!(out.as_slice(), u.keys());
        out.sort_unstable();
        assert_eq!(out.as_slice(), u.keys());
    }

    /// Chi-square goodness of fit over the 6 permutations of 3 keys.
    #[test]
    fn test_permutations_are_uniform() {
        let u = KeyUniverse::<u64>::dense(3).unwrap();
        let subset = Subset::from(&u);
        let perms: [[u64; 3]; 6] = [
            [1, 2, 3],
            [1, 3, 2],
            [2, 1, 3],
            [2, 3, 1],
            [3, 1, 2],
            [3, 2, 1],
        ];
        let trials = 6000;
        let mut counts = [0usize; 6];
        let mut rng = RandomSource::new(2024);
        for _ in 0..trials {
            let out = shuffled(&subset, &mut rng);
            let idx = perms.iter().position(|p| p.as_slice() == out.as_slice()).unwrap();
            counts[idx] += 1;
        }
        let expected = trials as f64 / 6.0;
        let chi2: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        // 5 degrees of freedom, p = 0.001
        assert!(chi2 < 20.52, "chi2 = {chi2}, counts = {counts:?}");
    }
}
