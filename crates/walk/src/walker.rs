use crate::entry::WalkEntry;
use crate::error::WalkError;
use logging::trace_flist;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Depth-first iterator over the leaves below a directory.
///
/// Pending directories live on an explicit stack, so deep trees never grow
/// the call stack. Within each directory the leaves are yielded first, in
/// lexicographic order, then each subdirectory is descended in lexicographic
/// order.
pub struct Walker {
    pub(crate) root: PathBuf,
    pub(crate) follow_symlinks: bool,
    pub(crate) max_depth: Option<usize>,
    pub(crate) stack: Vec<DirectoryState>,
    pub(crate) visited: HashSet<PathBuf>,
    pub(crate) finished: bool,
}

impl Walker {
    pub(crate) fn new(
        root: PathBuf,
        follow_symlinks: bool,
        max_depth: Option<usize>,
    ) -> Result<Self, WalkError> {
        trace_flist!("building candidate pool from {:?}", root);

        fs::symlink_metadata(&root)
            .map_err(|error| WalkError::root_metadata(root.clone(), error))?;

        let mut walker = Self {
            root,
            follow_symlinks,
            max_depth,
            stack: Vec::new(),
            visited: HashSet::new(),
            finished: false,
        };

        if walker.follow_symlinks {
            let canonical = fs::canonicalize(&walker.root)
                .map_err(|error| WalkError::canonicalize(walker.root.clone(), error))?;
            walker.visited.insert(canonical);
        }

        let state = DirectoryState::new(&walker.root, PathBuf::new(), 0, follow_symlinks)
            .map_err(|failure| failure.into_root_error())?;
        walker.stack.push(state);
        Ok(walker)
    }

    /// Returns the traversal root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn descend(&mut self, name: &OsString) -> Result<(), WalkError> {
        let (fs_path, relative_path, depth) = {
            let Some(parent) = self.stack.last() else {
                return Ok(());
            };
            (
                parent.fs_path.join(name),
                parent.relative_prefix.join(name),
                parent.depth + 1,
            )
        };

        if self.max_depth.is_some_and(|max| depth > max) {
            trace_flist!("skipping {:?}: deeper than {:?}", fs_path, self.max_depth);
            return Ok(());
        }

        if self.follow_symlinks {
            let canonical = fs::canonicalize(&fs_path)
                .map_err(|error| WalkError::canonicalize(fs_path.clone(), error))?;
            if !self.visited.insert(canonical) {
                trace_flist!("skipping already visited directory: {:?}", fs_path);
                return Ok(());
            }
        }

        trace_flist!("entering directory: {:?}", fs_path);
        let state = DirectoryState::new(&fs_path, relative_path, depth, self.follow_symlinks)
            .map_err(DirectoryFailure::into_error)?;
        self.stack.push(state);
        Ok(())
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let state = self.stack.last_mut()?;

            if let Some((name, file_type)) = state.next_leaf() {
                let entry = WalkEntry {
                    full_path: state.fs_path.join(&name),
                    relative_path: state.relative_prefix.join(&name),
                    file_type,
                    depth: state.depth + 1,
                };
                return Some(Ok(entry));
            }

            if let Some(name) = state.next_directory() {
                if let Err(error) = self.descend(&name) {
                    self.finished = true;
                    return Some(Err(error));
                }
                continue;
            }

            self.stack.pop();
        }
    }
}

/// Listing of one directory, split into leaves and subdirectories.
#[derive(Debug)]
pub(crate) struct DirectoryState {
    fs_path: PathBuf,
    relative_prefix: PathBuf,
    leaves: Vec<(OsString, fs::FileType)>,
    directories: Vec<OsString>,
    leaf_index: usize,
    directory_index: usize,
    depth: usize,
}

/// Listing failure, kept separate so the root can be reported distinctly.
enum DirectoryFailure {
    Open(PathBuf, std::io::Error),
    Other(WalkError),
}

impl DirectoryFailure {
    fn into_error(self) -> WalkError {
        match self {
            Self::Open(path, source) => WalkError::read_dir(path, source),
            Self::Other(error) => error,
        }
    }

    fn into_root_error(self) -> WalkError {
        match self {
            Self::Open(path, source) => WalkError::root_unreadable(path, source),
            Self::Other(error) => error,
        }
    }
}

impl DirectoryState {
    fn new(
        fs_path: &Path,
        relative_prefix: PathBuf,
        depth: usize,
        follow_symlinks: bool,
    ) -> Result<Self, DirectoryFailure> {
        let read_dir = fs::read_dir(fs_path)
            .map_err(|error| DirectoryFailure::Open(fs_path.to_path_buf(), error))?;

        let mut leaves = Vec::new();
        let mut directories = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|error| {
                DirectoryFailure::Other(WalkError::read_dir_entry(fs_path.to_path_buf(), error))
            })?;
            let file_type = entry.file_type().map_err(|error| {
                DirectoryFailure::Other(WalkError::metadata(entry.path(), error))
            })?;

            if file_type.is_dir() || (follow_symlinks && points_to_directory(&entry.path(), file_type))
            {
                directories.push(entry.file_name());
            } else {
                leaves.push((entry.file_name(), file_type));
            }
        }
        leaves.sort_by(|a, b| a.0.cmp(&b.0));
        directories.sort();

        trace_flist!(
            "found {} leaves and {} directories in {:?}",
            leaves.len(),
            directories.len(),
            fs_path
        );

        Ok(Self {
            fs_path: fs_path.to_path_buf(),
            relative_prefix,
            leaves,
            directories,
            leaf_index: 0,
            directory_index: 0,
            depth,
        })
    }

    fn next_leaf(&mut self) -> Option<(OsString, fs::FileType)> {
        let leaf = self.leaves.get(self.leaf_index)?.clone();
        self.leaf_index += 1;
        Some(leaf)
    }

    fn next_directory(&mut self) -> Option<OsString> {
        let name = self.directories.get(self.directory_index)?.clone();
        self.directory_index += 1;
        Some(name)
    }
}

/// Broken links and links to non-directories stay leaves.
fn points_to_directory(path: &Path, file_type: fs::FileType) -> bool {
    file_type.is_symlink() && fs::metadata(path).is_ok_and(|target| target.is_dir())
}
