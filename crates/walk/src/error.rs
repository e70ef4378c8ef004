use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error that stops a music library scan.
///
/// Failures on the root are reported by [`WalkBuilder::build`](crate::WalkBuilder::build)
/// but swallowed by [`flatten`](crate::flatten), which treats an unreadable
/// root as an empty library. Failures below the root always abort the scan so
/// that a playlist never silently omits part of the tree.
#[derive(Debug)]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    pub(crate) fn root_metadata(path: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::RootMetadata { path, source }.into()
    }

    pub(crate) fn root_unreadable(path: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::RootUnreadable { path, source }.into()
    }

    pub(crate) fn read_dir(path: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::ReadDir { path, source }.into()
    }

    pub(crate) fn read_dir_entry(path: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::ReadDirEntry { path, source }.into()
    }

    pub(crate) fn metadata(path: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::Metadata { path, source }.into()
    }

    pub(crate) fn canonicalize(path: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::Canonicalize { path, source }.into()
    }

    pub(crate) fn allocation(path: PathBuf, source: TryReserveError) -> Self {
        WalkErrorKind::Allocation { path, source }.into()
    }

    /// Returns the failure that stopped the scan.
    #[must_use]
    pub fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }

    /// Returns the path the scan was working on when it failed.
    ///
    /// ```
    /// use walk::WalkBuilder;
    ///
    /// let error = match WalkBuilder::new("./no_such_music_library").build() {
    ///     Ok(_) => panic!("missing root yields error"),
    ///     Err(error) => error,
    /// };
    /// assert!(error.path().ends_with("no_such_music_library"));
    /// ```
    #[must_use]
    pub fn path(&self) -> &Path {
        self.kind.path()
    }

    /// Reports whether the library root itself could not be opened.
    #[must_use]
    pub const fn is_root_failure(&self) -> bool {
        matches!(
            self.kind,
            WalkErrorKind::RootMetadata { .. } | WalkErrorKind::RootUnreadable { .. }
        )
    }
}

impl From<WalkErrorKind> for WalkError {
    fn from(kind: WalkErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path().display();
        match &self.kind {
            WalkErrorKind::RootMetadata { source, .. } => {
                write!(f, "music library '{path}' is not accessible: {source}")
            }
            WalkErrorKind::RootUnreadable { source, .. } => {
                write!(f, "music library '{path}' cannot be listed: {source}")
            }
            WalkErrorKind::ReadDir { source, .. } => {
                write!(f, "cannot list '{path}', playlist would be incomplete: {source}")
            }
            WalkErrorKind::ReadDirEntry { source, .. } => {
                write!(f, "lost an entry while listing '{path}': {source}")
            }
            WalkErrorKind::Metadata { source, .. } => {
                write!(f, "cannot tell whether '{path}' is a track or a folder: {source}")
            }
            WalkErrorKind::Canonicalize { source, .. } => {
                write!(f, "cannot resolve linked folder '{path}': {source}")
            }
            WalkErrorKind::Allocation { source, .. } => {
                write!(f, "out of memory collecting tracks under '{path}': {source}")
            }
        }
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            WalkErrorKind::Allocation { source, .. } => Some(source),
            WalkErrorKind::RootMetadata { source, .. }
            | WalkErrorKind::RootUnreadable { source, .. }
            | WalkErrorKind::ReadDir { source, .. }
            | WalkErrorKind::ReadDirEntry { source, .. }
            | WalkErrorKind::Metadata { source, .. }
            | WalkErrorKind::Canonicalize { source, .. } => Some(source),
        }
    }
}

/// What went wrong while scanning the library.
#[derive(Debug)]
pub enum WalkErrorKind {
    /// The root does not exist or its metadata cannot be read.
    RootMetadata {
        /// Library root.
        path: PathBuf,
        /// Operating system error.
        source: io::Error,
    },
    /// The root exists but is not a listable directory.
    RootUnreadable {
        /// Library root.
        path: PathBuf,
        /// Operating system error.
        source: io::Error,
    },
    /// A folder below the root cannot be listed.
    ReadDir {
        /// Folder that could not be listed.
        path: PathBuf,
        /// Operating system error.
        source: io::Error,
    },
    /// Iterating a folder's listing failed part way.
    ReadDirEntry {
        /// Folder being listed.
        path: PathBuf,
        /// Operating system error.
        source: io::Error,
    },
    /// The type of an entry cannot be determined.
    Metadata {
        /// Entry whose type is unknown.
        path: PathBuf,
        /// Operating system error.
        source: io::Error,
    },
    /// A followed symlink's target cannot be resolved for cycle detection.
    Canonicalize {
        /// Link or folder that failed to resolve.
        path: PathBuf,
        /// Operating system error.
        source: io::Error,
    },
    /// The candidate pool could not grow.
    Allocation {
        /// Folder being collected when the reservation failed.
        path: PathBuf,
        /// Reservation failure.
        source: TryReserveError,
    },
}

impl WalkErrorKind {
    /// Returns the path tied to the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::RootMetadata { path, .. }
            | Self::RootUnreadable { path, .. }
            | Self::ReadDir { path, .. }
            | Self::ReadDirEntry { path, .. }
            | Self::Metadata { path, .. }
            | Self::Canonicalize { path, .. }
            | Self::Allocation { path, .. } => path,
        }
    }
}
