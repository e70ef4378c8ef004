use std::num::NonZeroU32;
use std::time::Instant;

use entropy::EntropySource;
use logging::trace_sample;

use crate::error::{SampleError, SampleResult};

/// Caller-imposed bounds on the rejection loop.
///
/// Both limits are optional; with neither set the sampler retries until the
/// source yields an acceptable value or fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SamplerLimits {
    /// Maximum number of consecutive draws that may pass without producing a
    /// usable value.
    ///
    /// For a single [`UniformSampler::uniform`] call this counts bias
    /// rejections. [`PermutationGenerator`](crate::PermutationGenerator)
    /// also charges collision redraws against it, and resets it only when a
    /// new index is emitted.
    pub max_attempts: Option<NonZeroU32>,
    /// Instant after which no further draws are started.
    pub deadline: Option<Instant>,
}

impl SamplerLimits {
    /// No limits.
    pub const UNBOUNDED: Self = Self {
        max_attempts: None,
        deadline: None,
    };
}

/// Lowest raw value that reduces without modulo bias.
///
/// Equals `2^32 mod upper_bound`, computed as `(2^32 - upper_bound) mod
/// upper_bound` so it stays within 32-bit arithmetic. Values in `[0, min)`
/// are rejected; the remaining `2^32 - min` values form a whole number of
/// copies of `[0, upper_bound)`.
#[must_use]
pub const fn rejection_threshold(upper_bound: u32) -> u32 {
    if upper_bound < 2 {
        return 0;
    }
    upper_bound.wrapping_neg() % upper_bound
}

/// Draws unbiased integers in `[0, upper_bound)` from an entropy source.
///
/// Each accepted value costs at least one draw; a draw is rejected with
/// probability `min / 2^32 < 1/2`, so the expected number of draws per call
/// is below two.
#[derive(Debug)]
pub struct UniformSampler<S> {
    source: S,
    limits: SamplerLimits,
    draws: u64,
    rejections: u64,
}

impl<S: EntropySource> UniformSampler<S> {
    /// Creates a sampler without limits.
    pub const fn new(source: S) -> Self {
        Self::with_limits(source, SamplerLimits::UNBOUNDED)
    }

    /// Creates a sampler that enforces `limits`.
    pub const fn with_limits(source: S, limits: SamplerLimits) -> Self {
        Self {
            source,
            limits,
            draws: 0,
            rejections: 0,
        }
    }

    /// Returns a value uniformly distributed over `[0, upper_bound)`.
    ///
    /// Bounds below two return `0` without touching the source.
    pub fn uniform(&mut self, upper_bound: u32) -> SampleResult<u32> {
        self.uniform_charged(upper_bound, 0).map(|(value, _)| value)
    }

    /// Like [`uniform`](Self::uniform), but starts the attempt budget at
    /// `spent` draws and returns the budget used after the accepted draw.
    pub(crate) fn uniform_charged(
        &mut self,
        upper_bound: u32,
        spent: u32,
    ) -> SampleResult<(u32, u32)> {
        if upper_bound < 2 {
            return Ok((0, spent));
        }

        let min = rejection_threshold(upper_bound);
        let mut attempts = spent;
        loop {
            if let Some(max) = self.limits.max_attempts {
                if attempts >= max.get() {
                    return Err(SampleError::AttemptsExhausted {
                        upper_bound,
                        attempts,
                    });
                }
            }
            if let Some(deadline) = self.limits.deadline {
                if Instant::now() >= deadline {
                    return Err(SampleError::DeadlineExceeded { draws: self.draws });
                }
            }

            let value = self.source.next_u32()?;
            attempts = attempts.saturating_add(1);
            self.draws += 1;
            if value >= min {
                return Ok((value % upper_bound, attempts));
            }
            self.rejections += 1;
            trace_sample!("rejected {} below threshold {} (bound {})", value, min, upper_bound);
        }
    }

    /// Total draws consumed from the source.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Draws discarded to avoid modulo bias.
    #[must_use]
    pub const fn rejections(&self) -> u64 {
        self.rejections
    }

    /// Limits enforced by this sampler.
    #[must_use]
    pub const fn limits(&self) -> SamplerLimits {
        self.limits
    }

    /// Replaces the enforced limits.
    pub const fn set_limits(&mut self, limits: SamplerLimits) {
        self.limits = limits;
    }

    /// Returns a mutable reference to the underlying source.
    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes the sampler and returns the source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entropy::{EntropyError, SequenceSource};
    use std::time::Duration;

    #[test]
    fn threshold_matches_wide_arithmetic() {
        for bound in [2u32, 3, 5, 7, 10, 1000, 65_537, u32::MAX / 2 + 1, u32::MAX] {
            let expected = ((1u64 << 32) % u64::from(bound)) as u32;
            assert_eq!(rejection_threshold(bound), expected, "bound {bound}");
        }
        assert_eq!(rejection_threshold(0), 0);
        assert_eq!(rejection_threshold(1), 0);
    }

    #[test]
    fn powers_of_two_never_reject() {
        for shift in 1..32 {
            assert_eq!(rejection_threshold(1 << shift), 0);
        }
    }

    #[test]
    fn degenerate_bounds_consume_no_entropy() {
        let mut sampler = UniformSampler::new(SequenceSource::new(Vec::new()));
        assert_eq!(sampler.uniform(0).expect("bound 0"), 0);
        assert_eq!(sampler.uniform(1).expect("bound 1"), 0);
        assert_eq!(sampler.draws(), 0);
    }

    #[test]
    fn values_below_threshold_are_rejected() {
        // 2^32 mod 3 == 1, so a raw 0 is biased and must be redrawn.
        let mut sampler = UniformSampler::new(SequenceSource::new([0, 0, 7]));
        assert_eq!(sampler.uniform(3).expect("value"), 7 % 3);
        assert_eq!(sampler.draws(), 3);
        assert_eq!(sampler.rejections(), 2);
    }

    #[test]
    fn threshold_value_itself_is_accepted() {
        let min = rejection_threshold(6);
        let mut sampler = UniformSampler::new(SequenceSource::new([min]));
        assert_eq!(sampler.uniform(6).expect("value"), min % 6);
        assert_eq!(sampler.rejections(), 0);
    }

    #[test]
    fn result_is_always_below_bound() {
        let raw = [0u32, 1, 2, 3, u32::MAX, u32::MAX - 1, 0x8000_0000, 12_345];
        for bound in [2u32, 3, 7, 100, u32::MAX] {
            let mut sampler = UniformSampler::new(SequenceSource::cycling(raw));
            for _ in 0..raw.len() {
                assert!(sampler.uniform(bound).expect("value") < bound);
            }
        }
    }

    #[test]
    fn entropy_failures_propagate_without_substitution() {
        let mut sampler = UniformSampler::new(SequenceSource::new(Vec::new()));
        match sampler.uniform(10) {
            Err(SampleError::Entropy(EntropyError::Exhausted { .. })) => {}
            other => panic!("expected entropy error, got {other:?}"),
        }
    }

    #[test]
    fn attempt_bound_reports_exhaustion() {
        let limits = SamplerLimits {
            max_attempts: NonZeroU32::new(2),
            deadline: None,
        };
        // Every value is below the threshold for bound 3.
        let mut sampler = UniformSampler::with_limits(SequenceSource::cycling([0]), limits);
        match sampler.uniform(3) {
            Err(SampleError::AttemptsExhausted {
                upper_bound,
                attempts,
            }) => {
                assert_eq!(upper_bound, 3);
                assert_eq!(attempts, 2);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert_eq!(sampler.draws(), 2);
    }

    #[test]
    fn attempt_bound_resets_per_call() {
        let limits = SamplerLimits {
            max_attempts: NonZeroU32::new(1),
            deadline: None,
        };
        let mut sampler = UniformSampler::with_limits(SequenceSource::new([4, 5, 6]), limits);
        assert_eq!(sampler.uniform(10).expect("first"), 4);
        assert_eq!(sampler.uniform(10).expect("second"), 5);
        assert_eq!(sampler.uniform(10).expect("third"), 6);
    }

    #[test]
    fn elapsed_deadline_stops_before_drawing() {
        let limits = SamplerLimits {
            max_attempts: None,
            deadline: Instant::now().checked_sub(Duration::from_millis(1)),
        };
        let mut sampler = UniformSampler::with_limits(SequenceSource::cycling([9]), limits);
        if limits.deadline.is_some() {
            assert!(matches!(
                sampler.uniform(10),
                Err(SampleError::DeadlineExceeded { draws: 0 })
            ));
        }
        sampler.set_limits(SamplerLimits::UNBOUNDED);
        assert_eq!(sampler.uniform(10).expect("unbounded"), 9);
    }
}
