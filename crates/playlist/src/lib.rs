#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `playlist` wires the workspace together: it flattens a music tree into a
//! candidate pool, draws an unbiased permutation of the pool from an entropy
//! source, and writes the permuted paths one per line.
//!
//! # Design
//!
//! - [`PlaylistConfig`] is the only input; it is passed explicitly and never
//!   read from globals.
//! - [`run_playlist`] opens the configured device and delegates to
//!   [`run_with_source`], which accepts any
//!   [`EntropySource`](entropy::EntropySource) so runs can be reproduced with
//!   a scripted source.
//! - Each phase is timed and reported through the `trng_playlist::timing`
//!   target; the totals are also returned in [`PlaylistSummary`].
//!
//! # Errors
//!
//! Every failure is a [`PlaylistError`]; [`PlaylistError::exit_code`] maps it
//! to the process [`ExitCode`]. A root with no candidates is not an error:
//! the run completes without drawing or writing anything.
//!
//! # Examples
//!
//! ```
//! use entropy::SequenceSource;
//! use playlist::{OutputTarget, PlaylistConfig, run_with_source};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::write(temp.path().join("a.flac"), b"")?;
//! std::fs::write(temp.path().join("b.flac"), b"")?;
//!
//! let config = PlaylistConfig::builder(temp.path(), OutputTarget::Stdout).build();
//! let mut out = Vec::new();
//! let summary = run_with_source(&config, SequenceSource::new([1, 0]), &mut out)?;
//!
//! assert_eq!(summary.written, 2);
//! assert!(String::from_utf8(out)?.starts_with(&*temp.path().join("b.flac").to_string_lossy()));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod config;
mod error;
mod exit_code;
mod filter;
mod run;
mod writer;

pub use crate::config::{OutputTarget, PlaylistConfig, PlaylistConfigBuilder};
pub use crate::error::PlaylistError;
pub use crate::exit_code::ExitCode;
pub use crate::filter::is_audio_candidate;
pub use crate::run::{
    PhaseTimings, PlaylistSummary, list_pool, run_playlist, run_with_source, shuffle_pool,
    write_playlist,
};
pub use crate::writer::PlaylistWriter;
