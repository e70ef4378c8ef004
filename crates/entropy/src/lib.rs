#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `entropy` provides the blocking sources of 32-bit random values consumed by
//! the sampling engine. A source is anything implementing [`EntropySource`]:
//! a character device such as `/dev/urandom` or a USB hardware generator
//! ([`DeviceSource`]), a fixed script of values for reproducible runs
//! ([`SequenceSource`]), or a wrapper that applies a retry policy to short
//! reads ([`RetryingSource`]).
//!
//! # Design
//!
//! Every read returns a [`Result`]. A read that yields fewer than four bytes
//! is reported as [`EntropyError::ShortRead`] instead of being replaced with a
//! placeholder value, so uniformity guarantees built on top of a source never
//! silently degrade. Callers decide whether to retry or abort by wrapping the
//! source in [`RetryingSource`] or by propagating the error.
//!
//! Device handles are owned by [`DeviceSource`] and closed on drop, so every
//! exit path releases the descriptor.
//!
//! # Examples
//!
//! ```
//! use entropy::{EntropySource, SequenceSource};
//!
//! let mut source = SequenceSource::new([7, 11]);
//! assert_eq!(source.next_u32().unwrap(), 7);
//! assert_eq!(source.next_u32().unwrap(), 11);
//! assert!(source.next_u32().is_err());
//! ```

mod device;
mod error;
mod retry;
mod sequence;

pub use crate::device::{DEFAULT_DEVICE, DeviceSource};
pub use crate::error::{EntropyError, EntropyResult};
pub use crate::retry::RetryingSource;
pub use crate::sequence::SequenceSource;

/// Blocking provider of 32-bit random values.
///
/// Implementations consume state from the underlying provider on every call;
/// sources are not rewindable.
pub trait EntropySource {
    /// Reads the next 32-bit value, blocking until it is available.
    fn next_u32(&mut self) -> EntropyResult<u32>;
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
    fn next_u32(&mut self) -> EntropyResult<u32> {
        (**self).next_u32()
    }
}

impl<S: EntropySource + ?Sized> EntropySource for Box<S> {
    fn next_u32(&mut self) -> EntropyResult<u32> {
        (**self).next_u32()
    }
}
