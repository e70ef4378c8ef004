//! crates/logging/src/config.rs
//! Verbosity configuration mapped onto tracing filter directives.

use super::levels::{Subsystem, level_keyword};

/// Per-subsystem verbosity together with the global quiet switch.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    levels: [u8; Subsystem::COUNT],
    quiet: bool,
}

impl VerbosityConfig {
    /// Creates a configuration from the number of `--verbose` flags.
    ///
    /// - `0`: warnings and errors only.
    /// - `1`: phase timings and pool/permutation summaries.
    /// - `2`: per-directory and per-entry detail.
    /// - `3+`: everything, including individual entropy draws.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();
        match level {
            0 => {}
            1 => {
                config.set(Subsystem::Timing, 1);
                config.set(Subsystem::Flist, 1);
                config.set(Subsystem::Sample, 1);
                config.set(Subsystem::Output, 1);
            }
            2 => {
                for subsystem in Subsystem::ALL {
                    config.set(subsystem, 2);
                }
                config.set(Subsystem::Timing, 1);
            }
            _ => {
                for subsystem in Subsystem::ALL {
                    config.set(subsystem, 3);
                }
            }
        }
        config
    }

    /// Configuration that only lets errors through.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// Returns the level configured for `subsystem`.
    #[must_use]
    pub const fn get(&self, subsystem: Subsystem) -> u8 {
        self.levels[subsystem.index()]
    }

    /// Overrides the level for `subsystem`.
    pub const fn set(&mut self, subsystem: Subsystem, level: u8) {
        self.levels[subsystem.index()] = level;
    }

    /// Reports whether the quiet switch is active.
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Applies a `--debug` token such as `flist`, `sample2`, or `all`.
    ///
    /// A trailing digit selects the level; without one the level is `1`.
    /// Tokens may be comma separated.
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        for part in token.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let split = part
                .find(|c: char| c.is_ascii_digit())
                .unwrap_or(part.len());
            let (name, digits) = part.split_at(split);
            let level = if digits.is_empty() {
                1
            } else {
                digits
                    .parse::<u8>()
                    .map_err(|_| format!("invalid debug level in '{part}'"))?
            };

            if name.eq_ignore_ascii_case("all") {
                for subsystem in Subsystem::ALL {
                    self.set(subsystem, level);
                }
            } else {
                let subsystem: Subsystem = name.parse()?;
                self.set(subsystem, level);
            }
        }
        Ok(())
    }

    /// Renders the configuration as an `EnvFilter` directive string.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        let base = if self.quiet { "error" } else { "warn" };
        let mut directive = String::from(base);
        if self.quiet {
            return directive;
        }
        for subsystem in Subsystem::ALL {
            if let Some(keyword) = level_keyword(self.get(subsystem)) {
                directive.push(',');
                directive.push_str(subsystem.target());
                directive.push('=');
                directive.push_str(keyword);
            }
        }
        directive
    }
}
