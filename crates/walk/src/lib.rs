#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` flattens a directory tree into the ordered candidate pool that the
//! playlist shuffler draws from. Every non-directory entry reachable from the
//! root becomes one candidate, identified by the root joined with its
//! relative path. Directories themselves never appear in the pool.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures the traversal: whether directory symlinks are
//!   followed and how deep the walker may descend.
//! - [`Walker`] implements [`Iterator`] and yields [`WalkEntry`] leaves in
//!   depth-first order. Pending directories live on an explicit stack so the
//!   tree depth is bounded by memory rather than by the call stack.
//! - [`CandidatePool`] is the immutable, indexable result of a full walk,
//!   produced by [`WalkBuilder::flatten`] or the [`flatten`] shorthand.
//!
//! # Invariants
//!
//! - Within a directory, leaves are yielded first in lexicographic order and
//!   subdirectories are then descended in lexicographic order, so the pool
//!   order is stable across platforms and runs.
//! - Symbolic links are leaves unless symlink following is enabled; with it,
//!   canonical paths are tracked so a directory is entered at most once.
//! - Traversal never panics; filesystem failures are reported via
//!   [`WalkError`].
//!
//! # Errors
//!
//! [`Walker`] reports every failure through [`WalkError`]. When flattening, a
//! root that is missing or cannot be opened produces an empty pool and a
//! warning; failures below the root abort the walk with the error.
//!
//! # Examples
//!
//! ```
//! use std::fs;
//! use std::path::Path;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path();
//! fs::write(root.join("a"), b"")?;
//! fs::write(root.join("b"), b"")?;
//! fs::create_dir(root.join("c"))?;
//! fs::write(root.join("c").join("d"), b"")?;
//!
//! let pool = walk::flatten(root)?;
//! assert_eq!(pool.len(), 3);
//! assert_eq!(&pool[2], root.join("c").join("d").as_path());
//! assert!(pool.iter().all(|path| path != Path::new("c")));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # See also
//!
//! - `permute` for the shuffle that consumes the pool.

mod builder;
mod entry;
mod error;
mod flatten;
mod walker;


pub use crate::builder::WalkBuilder;
pub use crate::entry::WalkEntry;
pub use crate::error::{WalkError, WalkErrorKind};
pub use crate::flatten::{CandidatePool, flatten};
pub use crate::walker::Walker;
