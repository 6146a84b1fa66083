use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use super::SplitConfig;

/// row indices assigned to each split. the three sets are disjoint and
/// together cover every row exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitAssignment {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
    pub test: Vec<usize>,
}

/// shuffles `indices` with a generator seeded by `seed`, then splits off the
/// first `ceil(len * fraction)` of them.
///
/// # Returns
///
/// (remainder, split-off portion), both in shuffled order
pub fn split_off(indices: &[usize], fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let n = indices.len();
    let n_split = ((n as f64) * fraction).ceil().clamp(0.0, n as f64) as usize;
    let mut shuffled = indices.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);
    let remainder = shuffled.split_off(n_split);
    (remainder, shuffled)
}

/// two-stage split of `n_rows` rows: first the validation pool is split off
/// the full set, then the test set is split off the validation pool. both
/// stages use the same seed.
pub fn assign_splits(n_rows: usize, config: &SplitConfig) -> SplitAssignment {
    let all = (0..n_rows).collect::<Vec<_>>();
    let (train, pool) = split_off(&all, config.val_fraction, config.seed);
    let (validation, test) = split_off(&pool, config.test_fraction, config.seed);
    SplitAssignment {
        train,
        validation,
        test,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_sizes_follow_nested_fractions() {
        let assignment = assign_splits(1000, &SplitConfig::default());
        assert_eq!(assignment.validation.len() + assignment.test.len(), 200);
        assert_eq!(assignment.test.len(), 10);
        assert_eq!(assignment.validation.len(), 190);
        assert_eq!(assignment.train.len(), 800);
    }

    #[test]
    fn test_splits_are_disjoint_and_complete() {
        let assignment = assign_splits(537, &SplitConfig::default());
        let mut seen = HashSet::new();
        for idx in assignment
            .train
            .iter()
            .chain(assignment.validation.iter())
            .chain(assignment.test.iter())
        {
            assert!(seen.insert(*idx), "row {idx} assigned twice");
        }
        assert_eq!(seen.len(), 537);
        assert!(seen.iter().all(|idx| *idx < 537));
    }

    #[test]
    fn test_assignment_is_deterministic_for_a_seed() {
        let config = SplitConfig::default();
        assert_eq!(assign_splits(250, &config), assign_splits(250, &config));
        let other_seed = SplitConfig {
            seed: 7,
            ..SplitConfig::default()
        };
        assert_ne!(assign_splits(250, &config), assign_splits(250, &other_seed));
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = assign_splits(0, &SplitConfig::default());
        assert_eq!(empty, SplitAssignment::default());

        let one = assign_splits(1, &SplitConfig::default());
        assert!(one.train.is_empty());
        assert_eq!(one.test.len(), 1);

        let no_holdout = SplitConfig {
            val_fraction: 0.0,
            ..SplitConfig::default()
        };
        assert_eq!(assign_splits(10, &no_holdout).train.len(), 10);
    }
}
