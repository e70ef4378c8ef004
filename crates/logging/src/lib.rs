#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` centralises diagnostics for the trng-playlist workspace. Events
//! are emitted with the standard [`tracing`] macros on fixed, per-subsystem
//! targets (`trng_playlist::flist`, `trng_playlist::entropy`, ...) and are
//! rendered by a `tracing_subscriber` fmt layer on stderr.
//!
//! # Design
//!
//! - [`Subsystem`] names the tunable diagnostic categories and their targets.
//! - [`VerbosityConfig`] maps `--verbose` counts, `--quiet`, and `--debug`
//!   tokens to per-subsystem levels and renders them as an `EnvFilter`
//!   directive.
//! - [`init_tracing`] installs the global subscriber once per process.
//! - The `trace_*!` macros keep call sites short and the targets consistent.
//!
//! # Examples
//!
//! ```
//! use logging::{Subsystem, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_debug_flag("entropy2").unwrap();
//! assert_eq!(config.get(Subsystem::Entropy), 2);
//! assert!(config.filter_directive().contains("trng_playlist::entropy=debug"));
//! ```

mod config;
mod levels;
mod tracing_bridge;
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::Subsystem;
pub use tracing_bridge::{LOG_ENV, env_filter, init_tracing, init_tracing_with_writer};
