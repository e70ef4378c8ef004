//! crates/logging/src/tracing_macros.rs
//! Convenience macros for subsystem-scoped tracing.
//!
//! Each macro forwards to the standard tracing macro with the subsystem's
//! fixed target so verbosity can be tuned per subsystem. Callers must depend
//! on `tracing` directly.

/// Emit a directory traversal trace.
///
/// # Example
/// ```ignore
/// trace_flist!("entering directory {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_flist {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "trng_playlist::flist", $($arg)*);
    };
}

/// Emit an entropy device trace.
///
/// # Example
/// ```ignore
/// trace_entropy!("opened {}", device.display());
/// ```
#[macro_export]
macro_rules! trace_entropy {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "trng_playlist::entropy", $($arg)*);
    };
}

/// Emit a sampling trace.
///
/// # Example
/// ```ignore
/// trace_sample!("rejected {} below threshold {}", value, min);
/// ```
#[macro_export]
macro_rules! trace_sample {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "trng_playlist::sample", $($arg)*);
    };
}

/// Emit a playlist output trace.
///
/// # Example
/// ```ignore
/// trace_output!("[{}:{}] {}", position, index, path.display());
/// ```
#[macro_export]
macro_rules! trace_output {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "trng_playlist::output", $($arg)*);
    };
}

/// Emit a phase timing trace.
///
/// # Example
/// ```ignore
/// trace_timing!("flattened tree in {} ms", elapsed.as_millis());
/// ```
#[macro_export]
macro_rules! trace_timing {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "trng_playlist::timing", $($arg)*);
    };
}

/// Emit a subsystem summary at info level.
///
/// # Example
/// ```ignore
/// info_log!(Flist, "found {} candidates", count);
/// ```
#[macro_export]
macro_rules! info_log {
    (Flist, $($arg:tt)*) => {
        ::tracing::info!(target: "trng_playlist::flist", $($arg)*);
    };
    (Entropy, $($arg:tt)*) => {
        ::tracing::info!(target: "trng_playlist::entropy", $($arg)*);
    };
    (Sample, $($arg:tt)*) => {
        ::tracing::info!(target: "trng_playlist::sample", $($arg)*);
    };
    (Output, $($arg:tt)*) => {
        ::tracing::info!(target: "trng_playlist::output", $($arg)*);
    };
}
