use std::fs::File;
use std::io::Write;
use std::time::{Duration, Instant};

use entropy::{DeviceSource, EntropySource, RetryingSource};
use logging::{info_log, trace_entropy, trace_output, trace_timing};
use permute::{Permutation, PermutationGenerator, SamplerLimits, UniformSampler};
use walk::CandidatePool;

use crate::config::{OutputTarget, PlaylistConfig};
use crate::error::PlaylistError;
use crate::filter::is_audio_candidate;
use crate::writer::PlaylistWriter;

/// Wall-clock time spent in each phase of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    /// Opening and priming the entropy device.
    pub open_device: Duration,
    /// Flattening the music tree.
    pub flatten: Duration,
    /// Drawing the permutation.
    pub shuffle: Duration,
    /// Writing the playlist.
    pub write: Duration,
    /// The whole run.
    pub total: Duration,
}

/// Outcome of a successful run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaylistSummary {
    /// Size of the candidate pool.
    pub candidates: usize,
    /// Lines written to the playlist.
    pub written: usize,
    /// Entropy values consumed while shuffling.
    pub draws: u64,
    /// Draws that hit an index already emitted.
    pub collisions: u64,
    /// Per-phase timings.
    pub timings: PhaseTimings,
}

/// Runs the whole pipeline against the configured entropy device.
///
/// The device is opened and primed, then wrapped in a
/// [`RetryingSource`] using the configured retry count. Playlist lines go to
/// the configured file, or to `stdout` when the target is
/// [`OutputTarget::Stdout`].
///
/// # Errors
///
/// Returns [`PlaylistError`] when the device, the tree walk, the sampler, or
/// the output fails. Resources acquired before the failure are released on
/// return.
pub fn run_playlist<O: Write>(
    config: &PlaylistConfig,
    stdout: O,
) -> Result<PlaylistSummary, PlaylistError> {
    let started = Instant::now();

    trace_entropy!("opening entropy device {}", config.device().display());
    let mut device = DeviceSource::open(config.device())?;
    if config.prime_reads() > 0 {
        device.prime(config.prime_reads())?;
    }
    let open_device = started.elapsed();
    trace_timing!("entropy device ready in {} ms", open_device.as_millis());

    let source = RetryingSource::new(device, config.read_retries());
    let mut summary = run_with_source(config, source, stdout)?;
    summary.timings.open_device = open_device;
    summary.timings.total = started.elapsed();
    trace_timing!("elapsed time: {} ms", summary.timings.total.as_millis());
    Ok(summary)
}

/// Runs flatten, shuffle and write with a caller-supplied entropy source.
///
/// A tree with no candidates is a no-op: nothing is drawn and no output is
/// created.
///
/// # Errors
///
/// Same as [`run_playlist`], minus device failures.
pub fn run_with_source<S: EntropySource, O: Write>(
    config: &PlaylistConfig,
    source: S,
    stdout: O,
) -> Result<PlaylistSummary, PlaylistError> {
    let started = Instant::now();
    let mut summary = PlaylistSummary::default();

    let phase = Instant::now();
    let pool = config.walk_builder().flatten()?;
    summary.candidates = pool.len();
    summary.timings.flatten = phase.elapsed();
    trace_timing!(
        "collected {} candidates in {} ms",
        pool.len(),
        summary.timings.flatten.as_millis()
    );

    if pool.is_empty() {
        tracing::warn!(
            target: "trng_playlist::output",
            "no candidates under {}; playlist not written",
            config.root().display()
        );
        summary.timings.total = started.elapsed();
        return Ok(summary);
    }

    let phase = Instant::now();
    let limits = SamplerLimits {
        max_attempts: config.max_draws(),
        // A timeout too large to represent as an instant never expires.
        deadline: config
            .timeout()
            .and_then(|timeout| phase.checked_add(timeout)),
    };
    let permutation = shuffle_pool(&pool, source, limits)?;
    summary.draws = permutation.draws();
    summary.collisions = permutation.collisions();
    summary.timings.shuffle = phase.elapsed();
    trace_timing!(
        "randomized {} items in {} ms",
        permutation.len(),
        summary.timings.shuffle.as_millis()
    );

    let phase = Instant::now();
    let target = config.output();
    let written = match target {
        OutputTarget::File(path) => {
            let file = File::create(path).map_err(|source| PlaylistError::Output {
                target: target.clone(),
                source,
            })?;
            write_playlist(&pool, &permutation, file)
        }
        OutputTarget::Stdout => write_playlist(&pool, &permutation, stdout),
    }
    .map_err(|source| PlaylistError::Output {
        target: target.clone(),
        source,
    })?;
    summary.written = written;
    summary.timings.write = phase.elapsed();
    info_log!(Output, "wrote {written} entries to {target}");
    trace_timing!("wrote playlist in {} ms", summary.timings.write.as_millis());

    summary.timings.total = started.elapsed();
    Ok(summary)
}

/// Draws a uniformly random ordering of `pool`.
///
/// # Errors
///
/// Returns [`PlaylistError::PoolTooLarge`] when the pool cannot be indexed by
/// a `u32`, and [`PlaylistError::Sample`] when sampling fails.
pub fn shuffle_pool<S: EntropySource>(
    pool: &CandidatePool,
    source: S,
    limits: SamplerLimits,
) -> Result<Permutation, PlaylistError> {
    let n = u32::try_from(pool.len()).map_err(|_| PlaylistError::PoolTooLarge { len: pool.len() })?;
    let mut generator = PermutationGenerator::new(UniformSampler::with_limits(source, limits));
    Ok(generator.generate(n)?)
}

/// Writes the permuted pool as playlist lines and returns how many were
/// written.
///
/// Each written entry is logged on the output target as
/// `[position:index] path`.
///
/// # Errors
///
/// Propagates write and flush failures from `out`.
///
/// # Panics
///
/// Panics if `permutation` refers to indices outside `pool`.
pub fn write_playlist<W: Write>(
    pool: &CandidatePool,
    permutation: &Permutation,
    out: W,
) -> std::io::Result<usize> {
    let mut writer = PlaylistWriter::new(out);
    let entries = permutation
        .indices()
        .iter()
        .zip(permutation.apply(pool.as_slice()));
    for (position, (index, path)) in entries.enumerate() {
        if !is_audio_candidate(path) {
            continue;
        }
        trace_output!("[{position}:{index}] {}", path.display());
        writer.write_path(path)?;
    }
    let written = writer.written();
    writer.finish()?;
    Ok(written)
}

/// Flattens the configured tree and prints the pool in traversal order.
///
/// # Errors
///
/// Returns [`PlaylistError::Walk`] for traversal failures and
/// [`PlaylistError::Output`] when `out` cannot be written.
pub fn list_pool<W: Write>(config: &PlaylistConfig, out: W) -> Result<usize, PlaylistError> {
    let pool = config.walk_builder().flatten()?;
    let to_error = |source| PlaylistError::Output {
        target: OutputTarget::Stdout,
        source,
    };

    let mut writer = PlaylistWriter::new(out);
    for path in pool.iter() {
        writer.write_path(path).map_err(to_error)?;
    }
    let listed = writer.written();
    writer.finish().map_err(to_error)?;
    Ok(listed)
}
