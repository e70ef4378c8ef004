//! crates/logging/src/levels.rs
//! Diagnostic subsystems and their tracing targets.

use std::fmt;
use std::str::FromStr;

/// Diagnostic categories that can be tuned independently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Subsystem {
    /// Directory traversal and candidate pool construction.
    Flist,
    /// Entropy device access.
    Entropy,
    /// Uniform sampling and permutation generation.
    Sample,
    /// Playlist output.
    Output,
    /// Phase timings.
    Timing,
}

impl Subsystem {
    /// Number of subsystems.
    pub const COUNT: usize = 5;

    /// All subsystems in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Flist,
        Self::Entropy,
        Self::Sample,
        Self::Output,
        Self::Timing,
    ];

    /// Tracing target used by events of this subsystem.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Flist => "trng_playlist::flist",
            Self::Entropy => "trng_playlist::entropy",
            Self::Sample => "trng_playlist::sample",
            Self::Output => "trng_playlist::output",
            Self::Timing => "trng_playlist::timing",
        }
    }

    /// Short name accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Flist => "flist",
            Self::Entropy => "entropy",
            Self::Sample => "sample",
            Self::Output => "output",
            Self::Timing => "timing",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subsystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|subsystem| subsystem.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown debug category '{s}'"))
    }
}

/// Maps a per-subsystem level (0-3) to the `EnvFilter` level keyword.
pub(crate) const fn level_keyword(level: u8) -> Option<&'static str> {
    match level {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
