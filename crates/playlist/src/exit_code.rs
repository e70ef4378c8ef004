//! Process exit codes reported by `trng-playlist`.
//!
//! The numeric values follow the classic rsync `errcode.h` numbering so
//! scripts wrapping either tool can share their status handling.

use std::fmt;

/// Exit codes returned by a playlist run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful completion.
    Ok = 0,

    /// Syntax or usage error.
    ///
    /// Returned when command-line arguments are invalid or a required
    /// argument is missing.
    Syntax = 1,

    /// Errors selecting input/output files or directories.
    ///
    /// Returned when the music tree cannot be walked or holds more
    /// candidates than can be indexed.
    FileSelect = 3,

    /// Error starting or reading the entropy device.
    Entropy = 5,

    /// Error in file I/O while writing the playlist.
    FileIo = 11,

    /// Error allocating the pool, bitmap or permutation buffers.
    Malloc = 22,

    /// The sampling attempt bound or deadline was reached.
    Timeout = 30,
}

impl ExitCode {
    /// Returns the numeric exit code value.
    ///
    /// # Examples
    ///
    /// ```
    /// use playlist::ExitCode;
    ///
    /// assert_eq!(ExitCode::Ok.as_i32(), 0);
    /// assert_eq!(ExitCode::Timeout.as_i32(), 30);
    /// ```
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns a human-readable description of this exit code.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Syntax => "syntax or usage error",
            Self::FileSelect => "errors selecting input/output files, dirs",
            Self::Entropy => "error reading random number generator",
            Self::FileIo => "error in file IO",
            Self::Malloc => "error allocating core memory buffers",
            Self::Timeout => "timeout drawing random values",
        }
    }

    /// Returns `true` if this represents a successful exit.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Creates an exit code from an i32 value.
    ///
    /// Returns `None` if the value doesn't correspond to a known exit code.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Ok),
            1 => Some(Self::Syntax),
            3 => Some(Self::FileSelect),
            5 => Some(Self::Entropy),
            11 => Some(Self::FileIo),
            22 => Some(Self::Malloc),
            30 => Some(Self::Timeout),
            _ => None,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}
