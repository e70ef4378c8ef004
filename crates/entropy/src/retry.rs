use logging::trace_entropy;

use crate::EntropySource;
use crate::error::EntropyResult;

/// Applies a bounded retry policy to short reads of an inner source.
///
/// A read that fails with a retryable error (see
/// [`EntropyError::is_retryable`](crate::EntropyError::is_retryable)) is
/// repeated up to `retries` additional times. When the budget is spent the
/// last error is returned unchanged. Non-retryable errors surface immediately.
#[derive(Debug)]
pub struct RetryingSource<S> {
    inner: S,
    retries: u32,
    retried: u64,
}

impl<S: EntropySource> RetryingSource<S> {
    /// Wraps `inner`, allowing `retries` extra attempts per value.
    pub const fn new(inner: S, retries: u32) -> Self {
        Self {
            inner,
            retries,
            retried: 0,
        }
    }

    /// Total number of retried reads across the source's lifetime.
    #[must_use]
    pub const fn retried(&self) -> u64 {
        self.retried
    }

    /// Returns a reference to the wrapped source.
    pub const fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Consumes the wrapper and returns the inner source.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EntropySource> EntropySource for RetryingSource<S> {
    fn next_u32(&mut self) -> EntropyResult<u32> {
        let mut attempt = 0;
        loop {
            match self.inner.next_u32() {
                Ok(value) => return Ok(value),
                Err(error) if error.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    self.retried += 1;
                    trace_entropy!("retrying entropy read ({attempt}/{}): {error}", self.retries);
                }
                Err(error) => return Err(error),
            }
        }
    }
}
