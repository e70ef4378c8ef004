use crate::error::WalkError;
use crate::flatten::CandidatePool;
use crate::walker::Walker;
use std::path::PathBuf;

/// Configures a traversal rooted at a specific directory.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    follow_symlinks: bool,
    max_depth: Option<usize>,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            max_depth: None,
        }
    }

    /// Configures whether directory symlinks should be traversed.
    ///
    /// By default a symlink is a leaf like any other non-directory. When this
    /// option is enabled and the symlink points to a directory, the walker
    /// descends into it instead. Canonical paths are tracked so each real
    /// directory is entered at most once, which also stops symlink cycles.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Limits how deep the walker descends.
    ///
    /// The root is at depth `0`; with `Some(0)` only the root's own leaves are
    /// produced. `None` removes the limit.
    #[must_use]
    pub const fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builds a [`Walker`] using the configured options.
    pub fn build(self) -> Result<Walker, WalkError> {
        Walker::new(self.root, self.follow_symlinks, self.max_depth)
    }

    /// Walks the whole tree and collects its leaves into a [`CandidatePool`].
    ///
    /// A root that cannot be opened yields an empty pool; failures below the
    /// root are returned.
    pub fn flatten(self) -> Result<CandidatePool, WalkError> {
        CandidatePool::collect(self)
    }
}
