//! Shot sampling from the Born-rule distribution of the live state.
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, WeightedIndex};
use serde::Serialize;

use super::engine::{bitstring, StateVectorEngine};
use crate::core::error::{Result, SimError};

/// Observed bitstring → number of shots. Only observed outcomes are stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, usize>);

impl Counts {
    /// Zero for outcomes never observed.
    pub fn get(&self, bits: &str) -> usize {
        self.0.get(bits).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Most frequent outcome; ties go to the lexicographically smallest.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.iter()
            .fold(None, |best: Option<(&str, usize)>, (k, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((k, v)),
            })
    }

    pub fn into_inner(self) -> BTreeMap<String, usize> {
        self.0
    }
}

impl StateVectorEngine {
    /// Draws `shots` independent outcomes with probability `|amplitude|²`.
    ///
    /// A fixed `seed` makes the result reproducible; `None` seeds from OS
    /// entropy. The state itself is not collapsed.
    pub fn sample_counts(&self, shots: usize, seed: Option<u64>) -> Result<Counts> {
        if shots == 0 {
            return Err(SimError::InvalidShotCount { shots });
        }
        let dist = WeightedIndex::new(self.probabilities()).map_err(|_| {
            SimError::NormalizationDrift {
                norm_sqr: self.norm_sqr(),
                tolerance: self.tolerance(),
            }
        })?;
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let mut tally = vec![0usize; self.dimension()];
        for _ in 0..shots {
            tally[dist.sample(&mut rng)] += 1;
        }
        let n = self.n_qubits();
        let counts = tally
            .into_iter()
            .enumerate()
            .filter(|&(_, c)| c > 0)
            .map(|(idx, c)| (bitstring(idx, n), c))
            .collect();
        Ok(Counts(counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quantum::gates::Gate;

    #[test]
    fn basis_state_always_measures_itself() {
        let e = StateVectorEngine::from_label("101").unwrap();
        let counts = e.sample_counts(250, Some(7)).unwrap();
        assert_eq!(counts.get("101"), 250);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn zero_shots_rejected() {
        let e = StateVectorEngine::initialize(1).unwrap();
        assert!(matches!(
            e.sample_counts(0, Some(1)),
            Err(SimError::InvalidShotCount { shots: 0 })
        ));
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let mut e = StateVectorEngine::initialize(3).unwrap();
        for q in 0..3 {
            e.apply(&Gate::H(q)).unwrap();
        }
        let a = e.sample_counts(500, Some(42)).unwrap();
        let b = e.sample_counts(500, Some(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total(), 500);
    }

    #[test]
    fn unseeded_sampling_still_sums_to_shots() {
        let mut e = StateVectorEngine::initialize(2).unwrap();
        e.apply(&Gate::H(1)).unwrap();
        let counts = e.sample_counts(321, None).unwrap();
        assert_eq!(counts.total(), 321);
        assert_eq!(counts.get("10"), 0);
        assert_eq!(counts.get("11"), 0);
    }

    #[test]
    fn most_frequent_prefers_larger_count() {
        let mut m = BTreeMap::new();
        m.insert("00".to_string(), 3);
        m.insert("11".to_string(), 9);
        m.insert("01".to_string(), 9);
        let counts = Counts(m);
        assert_eq!(counts.most_frequent(), Some(("01", 9)));
    }
}
