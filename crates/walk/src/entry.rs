use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// A leaf discovered during traversal.
///
/// Leaves are every non-directory entry: regular files, symbolic links that
/// are not followed, and special files.
#[derive(Clone, Debug)]
pub struct WalkEntry {
    pub(crate) full_path: PathBuf,
    pub(crate) relative_path: PathBuf,
    pub(crate) file_type: fs::FileType,
    pub(crate) depth: usize,
}

impl WalkEntry {
    /// Returns the traversal root joined with the entry's relative path.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Returns the path relative to the traversal root.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// File type reported by the directory listing, without following links.
    #[must_use]
    pub const fn file_type(&self) -> fs::FileType {
        self.file_type
    }

    /// Returns the final component of the entry's path.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::WalkBuilder;
    /// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
    /// let temp = tempfile::tempdir()?;
    /// std::fs::write(temp.path().join("song.flac"), b"")?;
    /// let mut walker = WalkBuilder::new(temp.path()).build()?;
    /// let entry = walker.next().unwrap()?;
    /// assert_eq!(entry.file_name(), Some(std::ffi::OsStr::new("song.flac")));
    /// # Ok(())
    /// # }
    /// # demo().unwrap();
    /// ```
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        self.relative_path.file_name()
    }

    /// Depth of the entry relative to the root; the root's children are at `1`.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Consumes the entry and returns its full path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.full_path
    }
}
