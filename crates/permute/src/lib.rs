#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `permute` turns a stream of 32-bit entropy values into a uniformly random
//! permutation of `0..n`. It is the sampling engine behind trng-playlist.
//!
//! # Design
//!
//! - [`UniformSampler`] reduces raw values into `[0, upper_bound)` by
//!   rejection sampling: raw values below `2^32 mod upper_bound` are discarded
//!   so the remaining range divides evenly and no residue is favoured.
//! - [`MembershipSet`] is a bounds-checked bitmap with one bit per index,
//!   sized by ceiling division over 64-bit words.
//! - [`PermutationGenerator`] repeatedly draws `uniform(n)` and keeps values
//!   whose bit is still clear until every index has been emitted.
//!
//! # Invariants
//!
//! - [`UniformSampler::uniform`] never returns a value `>= upper_bound` and
//!   returns `0` without drawing when `upper_bound < 2`.
//! - A generated [`Permutation`] of length `n` contains every index in `0..n`
//!   exactly once.
//! - Entropy failures are propagated; no placeholder value is ever used.
//!
//! # Errors
//!
//! Sampling fails with [`SampleError`] when the entropy source fails, when a
//! caller limit ([`SamplerLimits`]) is reached, or when storage cannot be
//! reserved. Membership operations fail with [`MembershipError`] for
//! out-of-range indices.
//!
//! # Examples
//!
//! ```
//! use entropy::SequenceSource;
//! use permute::PermutationGenerator;
//!
//! // 2^32 mod 5 == 1, so raw 0 would be rejected; these values all pass.
//! let source = SequenceSource::new([3, 8, 1, 3, 2, 4, 10]);
//! let mut generator = PermutationGenerator::from_source(source);
//! let permutation = generator.generate(5).unwrap();
//!
//! let mut sorted = permutation.indices().to_vec();
//! sorted.sort_unstable();
//! assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
//! ```

mod error;
mod membership;
mod permutation;
mod uniform;

pub use crate::error::{MembershipError, SampleError, SampleResult};
pub use crate::membership::MembershipSet;
pub use crate::permutation::{Permutation, PermutationGenerator};
pub use crate::uniform::{SamplerLimits, UniformSampler, rejection_threshold};
