use entropy::EntropySource;
use logging::info_log;

use crate::error::{SampleError, SampleResult};
use crate::membership::MembershipSet;
use crate::uniform::UniformSampler;

/// A random ordering of the indices `0..n`, each appearing exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Permutation {
    indices: Vec<u32>,
    draws: u64,
    collisions: u64,
}

impl Permutation {
    /// The permuted indices in output order.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of indices (`n`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Reports whether the permutation is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Entropy draws consumed while generating, including bias rejections.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Accepted uniform values discarded because the index was already taken.
    #[must_use]
    pub const fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Yields the items of `pool` in permutation order.
    ///
    /// # Panics
    ///
    /// Panics if `pool` is shorter than the permutation.
    pub fn apply<'a, T>(&'a self, pool: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        assert!(
            pool.len() >= self.indices.len(),
            "pool of {} items cannot be indexed by a permutation of {}",
            pool.len(),
            self.indices.len()
        );
        self.indices.iter().map(move |&index| &pool[index as usize])
    }

    /// Consumes the permutation and returns the indices.
    #[must_use]
    pub fn into_indices(self) -> Vec<u32> {
        self.indices
    }
}

impl AsRef<[u32]> for Permutation {
    fn as_ref(&self) -> &[u32] {
        &self.indices
    }
}

/// Builds permutations by rejection sampling without replacement.
///
/// Each step draws `v = uniform(n)` and keeps it only if `v` has not been
/// emitted yet. Late steps collide often: completing all `n` slots takes
/// `n * H(n)` accepted draws on average (`O(n log n)`). The simple structure
/// keeps the output exactly uniform given an unbiased source.
#[derive(Debug)]
pub struct PermutationGenerator<S> {
    sampler: UniformSampler<S>,
}

impl<S: EntropySource> PermutationGenerator<S> {
    /// Wraps a configured sampler.
    pub const fn new(sampler: UniformSampler<S>) -> Self {
        Self { sampler }
    }

    /// Convenience constructor for an unbounded sampler over `source`.
    pub const fn from_source(source: S) -> Self {
        Self::new(UniformSampler::new(source))
    }

    /// Generates a uniformly random permutation of `0..n`.
    ///
    /// `n = 0` and `n = 1` consume no entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::AttemptsExhausted`] when the sampler's attempt
    /// bound is reached before the next index is emitted, whether the draws
    /// were rejected for bias or collided with taken indices.
    pub fn generate(&mut self, n: u32) -> SampleResult<Permutation> {
        let mut indices = Vec::new();
        indices
            .try_reserve_exact(n as usize)
            .map_err(|source| SampleError::Allocation { len: n, source })?;
        let mut seen = MembershipSet::with_capacity(n)?;

        let draws_before = self.sampler.draws();
        let mut collisions = 0u64;
        // Draws since the last emitted index; collisions count toward the
        // attempt bound just like bias rejections.
        let mut stalled = 0u32;
        while !seen.is_full() {
            let (value, spent) = self.sampler.uniform_charged(n, stalled)?;
            if seen.insert(value)? {
                indices.push(value);
                stalled = 0;
            } else {
                collisions += 1;
                stalled = spent;
            }
        }

        let draws = self.sampler.draws() - draws_before;
        info_log!(
            Sample,
            "permuted {} indices using {} draws ({} collisions)",
            n,
            draws,
            collisions
        );

        Ok(Permutation {
            indices,
            draws,
            collisions,
        })
    }

    /// Returns the wrapped sampler.
    pub const fn sampler(&self) -> &UniformSampler<S> {
        &self.sampler
    }

    /// Consumes the generator and returns the sampler.
    pub fn into_sampler(self) -> UniformSampler<S> {
        self.sampler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniform::SamplerLimits;
    use entropy::{EntropyError, EntropyResult, SequenceSource};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::num::NonZeroU32;

    struct SeededSource(StdRng);

    impl SeededSource {
        fn new(seed: u64) -> Self {
            Self(StdRng::seed_from_u64(seed))
        }
    }

    impl EntropySource for SeededSource {
        fn next_u32(&mut self) -> EntropyResult<u32> {
            Ok(self.0.next_u32())
        }
    }

    fn assert_bijection(permutation: &Permutation, n: u32) {
        assert_eq!(permutation.len(), n as usize);
        let mut seen = vec![false; n as usize];
        for &index in permutation.indices() {
            assert!(index < n, "index {index} out of range for {n}");
            assert!(!seen[index as usize], "index {index} emitted twice");
            seen[index as usize] = true;
        }
        assert!(seen.into_iter().all(|hit| hit));
    }

    #[test]
    fn empty_and_singleton_consume_no_entropy() {
        let mut generator = PermutationGenerator::from_source(SequenceSource::new(Vec::new()));
        assert!(generator.generate(0).expect("n = 0").is_empty());
        let single = generator.generate(1).expect("n = 1");
        assert_eq!(single.indices(), &[0]);
        assert_eq!(single.draws(), 0);
        assert_eq!(generator.sampler().draws(), 0);
    }

    #[test]
    fn scripted_source_yields_expected_order() {
        // Bound 4 never rejects, so raw % 4 is the candidate index.
        let source = SequenceSource::new([2, 6, 1, 3, 4, 8, 0]);
        let mut generator = PermutationGenerator::from_source(source);
        let permutation = generator.generate(4).expect("generate");
        // 2, 6%4=2 (collision), 1, 3, 4%4=0
        assert_eq!(permutation.indices(), &[2, 1, 3, 0]);
        assert_eq!(permutation.draws(), 5);
        assert_eq!(permutation.collisions(), 1);
    }

    #[test]
    fn deterministic_source_is_reproducible() {
        let mut seeded = SeededSource::new(42);
        let script: Vec<u32> = (0..2000)
            .map(|_| seeded.next_u32().expect("seeded"))
            .collect();
        let first = PermutationGenerator::from_source(SequenceSource::new(script.clone()))
            .generate(17)
            .expect("first run");
        let second = PermutationGenerator::from_source(SequenceSource::new(script))
            .generate(17)
            .expect("second run");
        assert_eq!(first, second);
        assert_bijection(&first, 17);
    }

    #[test]
    fn exhausted_source_aborts_generation() {
        let mut generator = PermutationGenerator::from_source(SequenceSource::new([0, 1]));
        match generator.generate(4) {
            Err(SampleError::Entropy(EntropyError::Exhausted { consumed })) => {
                assert_eq!(consumed, 2);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn attempt_limit_surfaces_from_generate() {
        let limits = SamplerLimits {
            max_attempts: NonZeroU32::new(3),
            deadline: None,
        };
        // 2^32 mod 3 == 1: a source of zeros never clears the threshold.
        let sampler = UniformSampler::with_limits(SequenceSource::cycling([0]), limits);
        let mut generator = PermutationGenerator::new(sampler);
        assert!(matches!(
            generator.generate(3),
            Err(SampleError::AttemptsExhausted { attempts: 3, .. })
        ));
    }

    #[test]
    fn constant_source_exhausts_attempts_through_collisions() {
        let limits = SamplerLimits {
            max_attempts: NonZeroU32::new(5),
            deadline: None,
        };
        // 1 clears the threshold for 3 and always maps to index 1, so every
        // draw after the first collides.
        let sampler = UniformSampler::with_limits(SequenceSource::cycling([1]), limits);
        let mut generator = PermutationGenerator::new(sampler);
        match generator.generate(3) {
            Err(SampleError::AttemptsExhausted {
                upper_bound,
                attempts,
            }) => {
                assert_eq!(upper_bound, 3);
                assert_eq!(attempts, 5);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert_eq!(generator.sampler().draws(), 6);
    }

    #[test]
    fn attempt_budget_resets_after_each_emitted_index() {
        let limits = SamplerLimits {
            max_attempts: NonZeroU32::new(2),
            deadline: None,
        };
        // Bound 4 never rejects: 0, then 4 collides before 1, then 8 collides
        // before 2, then 3.
        let source = SequenceSource::new([0, 4, 1, 8, 2, 3]);
        let mut generator = PermutationGenerator::new(UniformSampler::with_limits(source, limits));
        let permutation = generator.generate(4).expect("each index lands within budget");
        assert_eq!(permutation.indices(), &[0, 1, 2, 3]);
        assert_eq!(permutation.collisions(), 2);
    }

    #[test]
    fn apply_maps_indices_onto_pool() {
        // 2^32 mod 3 == 1, so raw values start at 1: 2 -> 2, 3 -> 0, 1 -> 1.
        let permutation = PermutationGenerator::from_source(SequenceSource::new([2, 3, 1]))
            .generate(3)
            .expect("generate");
        let pool = ["a", "b", "c"];
        let ordered: Vec<&str> = permutation.apply(&pool).copied().collect();
        assert_eq!(ordered, vec!["c", "a", "b"]);
    }

    #[test]
    fn bijection_holds_across_sizes() {
        let mut generator = PermutationGenerator::from_source(SeededSource::new(7));
        for n in [2u32, 3, 5, 8, 31, 64, 65, 100] {
            let permutation = generator.generate(n).expect("generate");
            assert_bijection(&permutation, n);
        }
    }
}
