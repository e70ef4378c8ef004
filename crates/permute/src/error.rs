//! crates/permute/src/error.rs
//!
//! Error types for sampling and membership tracking.

use std::collections::TryReserveError;

use entropy::EntropyError;
use thiserror::Error;

/// Result type for sampling operations.
pub type SampleResult<T> = Result<T, SampleError>;

/// Errors raised by [`MembershipSet`](crate::MembershipSet).
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The index does not fit the set's capacity.
    #[error("index {index} is outside membership set of capacity {capacity}")]
    OutOfRange {
        /// Offending index.
        index: u32,
        /// Capacity of the set.
        capacity: u32,
    },
    /// Storage for the bitmap could not be reserved.
    #[error("failed to allocate membership bitmap for {capacity} indices: {source}")]
    Allocation {
        /// Requested capacity.
        capacity: u32,
        /// Reservation failure.
        #[source]
        source: TryReserveError,
    },
}

/// Errors raised while drawing uniform values or generating permutations.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The entropy source failed; no value was substituted.
    #[error(transparent)]
    Entropy(#[from] EntropyError),
    /// The attempt bound was reached without an acceptable draw, counting
    /// bias rejections and, during permutation, collisions.
    #[error("no usable value below {upper_bound} after {attempts} draws")]
    AttemptsExhausted {
        /// Bound passed to the sampler.
        upper_bound: u32,
        /// Number of draws performed.
        attempts: u32,
    },
    /// The sampling deadline passed between two draws.
    #[error("sampling deadline exceeded after {draws} draws")]
    DeadlineExceeded {
        /// Draws performed before the deadline check failed.
        draws: u64,
    },
    /// Membership tracking failed.
    #[error(transparent)]
    Membership(#[from] MembershipError),
    /// The output buffer could not be reserved.
    #[error("failed to allocate permutation of {len} indices: {source}")]
    Allocation {
        /// Requested permutation length.
        len: u32,
        /// Reservation failure.
        #[source]
        source: TryReserveError,
    },
}

impl SampleError {
    /// Reports whether the failure originated from exhausting a caller limit.
    #[must_use]
    pub const fn is_limit(&self) -> bool {
        matches!(
            self,
            Self::AttemptsExhausted { .. } | Self::DeadlineExceeded { .. }
        )
    }
}
