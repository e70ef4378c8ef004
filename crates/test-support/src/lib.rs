#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Shared fixtures for the trng-playlist test suites.
//!
//! Trees are described as slash-separated relative paths. A path ending in
//! `/` is created as an empty directory; anything else is created as an empty
//! file, with parent directories created as needed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates the described entries below `root`.
pub fn create_tree(root: &Path, entries: &[&str]) -> io::Result<()> {
    for entry in entries {
        let path = root.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path)?;
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, entry.as_bytes())?;
        }
    }
    Ok(())
}

/// Temporary directory populated with the described entries.
///
/// The directory is removed when the returned guard is dropped.
pub fn tree(entries: &[&str]) -> io::Result<TempDir> {
    let temp = tempfile::tempdir()?;
    create_tree(temp.path(), entries)?;
    Ok(temp)
}

/// Joins each relative entry onto `root`, preserving order.
#[must_use]
pub fn joined(root: &Path, entries: &[&str]) -> Vec<PathBuf> {
    entries.iter().map(|entry| root.join(entry)).collect()
}

/// Reports whether permission bits actually restrict the current process.
///
/// Privileged users bypass directory permissions, so tests that rely on an
/// unreadable directory must skip themselves when this returns `false`.
#[cfg(unix)]
#[must_use]
pub fn permissions_enforced(probe: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    if fs::create_dir_all(probe).is_err() {
        return false;
    }
    if fs::set_permissions(probe, fs::Permissions::from_mode(0o000)).is_err() {
        return false;
    }
    let enforced = fs::read_dir(probe).is_err();
    let _ = fs::set_permissions(probe, fs::Permissions::from_mode(0o755));
    enforced
}
