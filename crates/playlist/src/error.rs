use std::io;

use entropy::EntropyError;
use permute::SampleError;
use thiserror::Error;
use walk::{WalkError, WalkErrorKind};

use crate::config::OutputTarget;
use crate::exit_code::ExitCode;

/// Failures that end a playlist run.
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// The entropy device could not be opened, primed or read.
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    /// The music tree could not be walked.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// Drawing the permutation failed.
    #[error(transparent)]
    Sample(#[from] SampleError),

    /// The pool holds more candidates than a 32-bit index can address.
    #[error("{len} candidates exceed the maximum of {max}", max = u32::MAX)]
    PoolTooLarge {
        /// Number of candidates found.
        len: usize,
    },

    /// The playlist could not be created or written.
    #[error("failed to write playlist to {target}: {source}")]
    Output {
        /// Destination being written.
        target: OutputTarget,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl PlaylistError {
    /// Maps the failure onto the process exit code.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Entropy(_) => ExitCode::Entropy,
            Self::Walk(error) => match error.kind() {
                WalkErrorKind::Allocation { .. } => ExitCode::Malloc,
                _ => ExitCode::FileSelect,
            },
            Self::Sample(error) => match error {
                SampleError::Entropy(_) => ExitCode::Entropy,
                SampleError::AttemptsExhausted { .. } | SampleError::DeadlineExceeded { .. } => {
                    ExitCode::Timeout
                }
                SampleError::Allocation { .. } | SampleError::Membership(_) => ExitCode::Malloc,
            },
            Self::PoolTooLarge { .. } => ExitCode::FileSelect,
            Self::Output { .. } => ExitCode::FileIo,
        }
    }
}
