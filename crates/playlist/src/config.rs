//! Explicit run configuration.
//!
//! A [`PlaylistConfig`] carries everything a run needs; nothing is read from
//! global state. Build one with [`PlaylistConfig::builder`] and pass it to
//! [`run_playlist`](crate::run_playlist).

use std::ffi::OsStr;
use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use entropy::DEFAULT_DEVICE;

/// Where the playlist lines are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// Create or truncate the named file.
    File(PathBuf),
    /// Write to the process's standard output.
    Stdout,
}

impl OutputTarget {
    /// Interprets a command-line value; `-` selects standard output.
    ///
    /// # Examples
    ///
    /// ```
    /// use playlist::OutputTarget;
    /// use std::ffi::OsStr;
    ///
    /// assert_eq!(OutputTarget::from_arg(OsStr::new("-")), OutputTarget::Stdout);
    /// assert!(matches!(
    ///     OutputTarget::from_arg(OsStr::new("list.m3u")),
    ///     OutputTarget::File(_)
    /// ));
    /// ```
    #[must_use]
    pub fn from_arg(value: &OsStr) -> Self {
        if value == "-" {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(value))
        }
    }

    /// Returns the file path, if the target is a file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Stdout => None,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "'{}'", path.display()),
            Self::Stdout => f.write_str("standard output"),
        }
    }
}

/// Complete description of one playlist run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistConfig {
    root: PathBuf,
    output: OutputTarget,
    device: PathBuf,
    read_retries: u32,
    prime_reads: u32,
    max_draws: Option<NonZeroU32>,
    timeout: Option<Duration>,
    max_depth: Option<usize>,
    follow_symlinks: bool,
}

impl PlaylistConfig {
    /// Starts a builder for the given music root and output target.
    #[must_use]
    pub fn builder<P: Into<PathBuf>>(root: P, output: OutputTarget) -> PlaylistConfigBuilder {
        PlaylistConfigBuilder::new(root.into(), output)
    }

    /// Directory whose leaves form the candidate pool.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Playlist destination.
    #[must_use]
    pub const fn output(&self) -> &OutputTarget {
        &self.output
    }

    /// Entropy device path.
    #[must_use]
    pub fn device(&self) -> &Path {
        &self.device
    }

    /// Number of times a short device read is retried before failing.
    #[must_use]
    pub const fn read_retries(&self) -> u32 {
        self.read_retries
    }

    /// Values discarded from the device before sampling starts.
    #[must_use]
    pub const fn prime_reads(&self) -> u32 {
        self.prime_reads
    }

    /// Per-value bound on rejection-loop draws.
    #[must_use]
    pub const fn max_draws(&self) -> Option<NonZeroU32> {
        self.max_draws
    }

    /// Time allowed for drawing the whole permutation.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Deepest directory level descended into; the root is level `0`.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Whether directory symlinks are descended.
    #[must_use]
    pub const fn follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    pub(crate) fn walk_builder(&self) -> walk::WalkBuilder {
        walk::WalkBuilder::new(self.root.clone())
            .follow_symlinks(self.follow_symlinks)
            .max_depth(self.max_depth)
    }
}

/// Builder for [`PlaylistConfig`].
#[derive(Clone, Debug)]
pub struct PlaylistConfigBuilder {
    config: PlaylistConfig,
}

impl PlaylistConfigBuilder {
    fn new(root: PathBuf, output: OutputTarget) -> Self {
        Self {
            config: PlaylistConfig {
                root,
                output,
                device: PathBuf::from(DEFAULT_DEVICE),
                read_retries: 0,
                prime_reads: 0,
                max_draws: None,
                timeout: None,
                max_depth: None,
                follow_symlinks: false,
            },
        }
    }

    /// Selects the entropy device.
    #[must_use]
    pub fn device<P: Into<PathBuf>>(mut self, device: P) -> Self {
        self.config.device = device.into();
        self
    }

    /// Sets how many times a short read is retried.
    #[must_use]
    pub const fn read_retries(mut self, retries: u32) -> Self {
        self.config.read_retries = retries;
        self
    }

    /// Sets how many values are discarded after opening the device.
    #[must_use]
    pub const fn prime_reads(mut self, count: u32) -> Self {
        self.config.prime_reads = count;
        self
    }

    /// Bounds the draws spent on a single value.
    #[must_use]
    pub const fn max_draws(mut self, draws: Option<NonZeroU32>) -> Self {
        self.config.max_draws = draws;
        self
    }

    /// Bounds the time spent drawing the permutation.
    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Bounds the traversal depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Enables descending into directory symlinks.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.config.follow_symlinks = follow;
        self
    }

    /// Finishes the configuration.
    #[must_use]
    pub fn build(self) -> PlaylistConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = PlaylistConfig::builder("/music", OutputTarget::Stdout).build();
        assert_eq!(config.root(), Path::new("/music"));
        assert_eq!(config.output(), &OutputTarget::Stdout);
        assert_eq!(config.device(), Path::new("/dev/urandom"));
        assert_eq!(config.read_retries(), 0);
        assert_eq!(config.prime_reads(), 0);
        assert_eq!(config.max_draws(), None);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.max_depth(), None);
        assert!(!config.follow_symlinks());
    }

    #[test]
    fn builder_overrides() {
        let config = PlaylistConfig::builder("/music", OutputTarget::File("out.m3u".into()))
            .device("/dev/TrueRNG")
            .read_retries(3)
            .prime_reads(10)
            .max_draws(NonZeroU32::new(64))
            .timeout(Some(Duration::from_secs(2)))
            .max_depth(Some(4))
            .follow_symlinks(true)
            .build();

        assert_eq!(config.device(), Path::new("/dev/TrueRNG"));
        assert_eq!(config.read_retries(), 3);
        assert_eq!(config.prime_reads(), 10);
        assert_eq!(config.max_draws().map(NonZeroU32::get), Some(64));
        assert_eq!(config.timeout(), Some(Duration::from_secs(2)));
        assert_eq!(config.max_depth(), Some(4));
        assert!(config.follow_symlinks());
        assert_eq!(config.output().path(), Some(Path::new("out.m3u")));
    }

    #[test]
    fn output_target_display() {
        assert_eq!(OutputTarget::Stdout.to_string(), "standard output");
        assert_eq!(
            OutputTarget::File(PathBuf::from("a b.m3u")).to_string(),
            "'a b.m3u'"
        );
    }
}
