//! Minimal-sample drawing for plane hypotheses.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{RansacError, RansacResult};

/// Number of points that define a plane hypothesis.
pub const SAMPLE_SIZE: usize = 3;

/// Draws random triples of distinct point indices.
///
/// Every draw reshuffles the whole working array with a Fisher–Yates pass and
/// takes its first three entries, sorted in descending order. Draws are
/// independent, so the same triple can come up more than once.
#[derive(Debug, Clone)]
pub struct IndexSampler {
    indices: Vec<usize>,
}

impl IndexSampler {
    /// Create a sampler over the index range `0..size`.
    ///
    /// # Errors
    ///
    /// Returns [`RansacError::InsufficientPoints`] if `size < 3`.
    pub fn new(size: usize) -> RansacResult<Self> {
        if size < SAMPLE_SIZE {
            return Err(RansacError::InsufficientPoints {
                required: SAMPLE_SIZE,
                actual: size,
            });
        }
        Ok(Self {
            indices: (0..size).collect(),
        })
    }

    /// Size of the index range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always `false`: a sampler holds at least three indices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Draw three distinct indices, largest first.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> [usize; SAMPLE_SIZE] {
        self.indices.shuffle(rng);
        let mut triple = [self.indices[0], self.indices[1], self.indices[2]];
        triple.sort_unstable_by(|a, b| b.cmp(a));
        triple
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn rejects_small_ranges() {
        assert!(matches!(
            IndexSampler::new(2),
            Err(RansacError::InsufficientPoints {
                required: 3,
                actual: 2
            })
        ));
        assert!(IndexSampler::new(3).is_ok());
    }

    #[test]
    fn samples_are_distinct_descending_and_in_range() -> RansacResult<()> {
        let mut sampler = IndexSampler::new(10)?;
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let [i, j, k] = sampler.sample(&mut rng);
            assert!(i > j && j > k, "expected descending, got {i} {j} {k}");
            assert!(i < 10);
        }
        Ok(())
    }

    #[test]
    fn three_points_always_give_the_same_triple() -> RansacResult<()> {
        let mut sampler = IndexSampler::new(3)?;
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            assert_eq!(sampler.sample(&mut rng), [2, 1, 0]);
        }
        Ok(())
    }

    #[test]
    fn covers_every_index() -> RansacResult<()> {
        let mut sampler = IndexSampler::new(8)?;
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.extend(sampler.sample(&mut rng));
        }
        assert_eq!(seen.len(), 8);
        assert_eq!(sampler.len(), 8);
        assert!(!sampler.is_empty());
        Ok(())
    }

    #[test]
    fn same_seed_same_sequence() -> RansacResult<()> {
        let mut a = IndexSampler::new(50)?;
        let mut b = IndexSampler::new(50)?;
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(a.sample(&mut rng_a), b.sample(&mut rng_b));
        }
        Ok(())
    }
}
