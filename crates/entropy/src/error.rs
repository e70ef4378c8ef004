//! crates/entropy/src/error.rs
//!
//! Error types for entropy sources.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for entropy reads.
pub type EntropyResult<T> = Result<T, EntropyError>;

/// Errors raised while opening or reading an entropy source.
#[derive(Debug, Error)]
pub enum EntropyError {
    /// The entropy device could not be opened.
    #[error("failed to open entropy device '{}': {source}", path.display())]
    Open {
        /// Device path that failed to open.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
    /// The provider returned fewer bytes than a full value requires.
    #[error("short entropy read: received {received} of {expected} bytes")]
    ShortRead {
        /// Number of bytes actually received.
        received: usize,
        /// Number of bytes a value requires.
        expected: usize,
    },
    /// Reading from the provider failed.
    #[error("entropy read failed: {0}")]
    Read(
        #[from]
        #[source]
        io::Error,
    ),
    /// A scripted source ran out of values.
    #[error("entropy source exhausted after {consumed} values")]
    Exhausted {
        /// Number of values handed out before exhaustion.
        consumed: u64,
    },
}

impl EntropyError {
    /// Reports whether a retry of the same read may succeed.
    ///
    /// Only short reads qualify; open failures, I/O errors, and exhausted
    /// scripts are permanent for the lifetime of the source.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ShortRead { .. })
    }
}
