use crate::builder::WalkBuilder;
use crate::error::WalkError;
use logging::info_log;
use std::ops::Index;
use std::path::{Path, PathBuf};

const GROWTH_CHUNK: usize = 256;

/// Ordered, fixed-size list of the leaves found under a root.
///
/// Indices run from `0` to `len() - 1` in traversal order. The pool never
/// changes after construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidatePool {
    entries: Vec<PathBuf>,
}

impl CandidatePool {
    pub(crate) fn collect(builder: WalkBuilder) -> Result<Self, WalkError> {
        let walker = match builder.build() {
            Ok(walker) => walker,
            Err(error) if error.is_root_failure() => {
                tracing::warn!(target: "trng_playlist::flist", "{error}; no candidates");
                return Ok(Self::default());
            }
            Err(error) => return Err(error),
        };

        let root = walker.root().to_path_buf();
        let mut entries: Vec<PathBuf> = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entries.len() == entries.capacity() {
                entries
                    .try_reserve(GROWTH_CHUNK.max(entries.len()))
                    .map_err(|source| WalkError::allocation(root.clone(), source))?;
            }
            entries.push(entry.into_path());
        }

        info_log!(Flist, "found {} candidates under {}", entries.len(), root.display());
        Ok(Self { entries })
    }

    /// Number of candidates (`n`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the pool has no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the candidate at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    /// Candidates in traversal order.
    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Iterates over the candidates in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    /// Consumes the pool and returns the candidates.
    #[must_use]
    pub fn into_vec(self) -> Vec<PathBuf> {
        self.entries
    }
}

impl From<Vec<PathBuf>> for CandidatePool {
    fn from(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }
}

impl Index<usize> for CandidatePool {
    type Output = Path;

    fn index(&self, index: usize) -> &Path {
        &self.entries[index]
    }
}

/// Flattens the tree under `root` with default options.
///
/// Equivalent to `WalkBuilder::new(root).flatten()`.
pub fn flatten<P: Into<PathBuf>>(root: P) -> Result<CandidatePool, WalkError> {
    WalkBuilder::new(root).flatten()
}
