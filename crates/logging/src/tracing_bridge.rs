//! crates/logging/src/tracing_bridge.rs
//! Installs the tracing subscriber that renders diagnostics.
//!
//! The subscriber is a `tracing_subscriber::fmt` layer filtered by an
//! [`EnvFilter`] built from a [`VerbosityConfig`]. Setting the
//! `TRNG_PLAYLIST_LOG` environment variable replaces the computed filter with
//! an arbitrary directive string.

use super::config::VerbosityConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Environment variable that overrides the computed filter directive.
pub const LOG_ENV: &str = "TRNG_PLAYLIST_LOG";

/// Builds the filter for `config`, honouring [`LOG_ENV`] when set.
pub fn env_filter(config: &VerbosityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(config.filter_directive()))
}

/// Installs a global subscriber writing to stderr.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is left untouched.
pub fn init_tracing(config: &VerbosityConfig) -> bool {
    init_tracing_with_writer(config, std::io::stderr)
}

/// Installs a global subscriber writing through `writer`.
pub fn init_tracing_with_writer<W>(config: &VerbosityConfig, writer: W) -> bool
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(writer)
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Subsystem;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn scoped_subscriber_respects_subsystem_levels() {
        let mut config = VerbosityConfig::default();
        config.set(Subsystem::Flist, 2);
        let captured = Captured::default();
        let sink = captured.clone();

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(config.filter_directive()))
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            crate::trace_flist!("flist detail");
            crate::trace_entropy!("entropy detail");
            tracing::warn!(target: "trng_playlist::sample", "sample warning");
        });

        let output = String::from_utf8(captured.0.lock().expect("lock").clone()).expect("utf8");
        assert!(output.contains("flist detail"));
        assert!(!output.contains("entropy detail"));
        assert!(output.contains("sample warning"));
    }
}
