#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of `trng-playlist`. It parses
//! the arguments, installs the diagnostics subscriber, builds a
//! [`PlaylistConfig`] and hands it to [`playlist::run_playlist`] (or to
//! [`playlist::list_pool`] for `--list`).
//!
//! # Design
//!
//! [`run`] accepts the argument iterator together with handles for standard
//! output and error, so the binary and the tests drive exactly the same code.
//! Parsing uses a [`clap`] builder with the built-in help and version flags
//! disabled: `-H`/`--help` and `-v`/`--version` keep their historical
//! letters, and the help text is a fixed snapshot rendered by
//! [`render_help`].
//!
//! # Invariants
//!
//! - `run` never panics; failures become non-zero exit codes.
//! - Playlist lines written to standard output (`--output -`) are the only
//!   bytes `run` writes to `stdout`; diagnostics go to stderr.
//!
//! # Errors
//!
//! Usage errors return `1`. Run failures return
//! [`PlaylistError::exit_code`](playlist::PlaylistError::exit_code).
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["trng-playlist", "--version"], &mut stdout, &mut stderr);
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("trng-playlist, version"));
//! ```

use std::ffi::OsString;
use std::io::{self, Write};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Arg, ArgAction, Command, value_parser};
use logging::VerbosityConfig;
use playlist::{ExitCode, OutputTarget, PlaylistConfig};


const PROGRAM_NAME: &str = "trng-playlist";

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

const USAGE: &str =
    "Typical usage: trng-playlist --dir \"/my_music_folder\" --output \"/my_truly_random_playlist.m3u\"";

const HELP_TEXT: &str = "\
Special parameters:
    -H, --help                 Show this help and exit.
    -v, --version              Show version and licensing information, and exit.
    --list                     Print the candidate pool in traversal order and exit.
Override parameters:
    -e, --device PATH          Set the random number generator device to use.
    --read-retries N           Retry a short device read up to N times.
    --prime N                  Discard N values after opening the device.
    --max-draws N              Give up after N draws without a new entry.
    --timeout SECS             Give up when shuffling takes longer than SECS.
    --max-depth N              Do not descend more than N directories below --dir.
    --follow-symlinks          Descend into symbolic links to directories.
    -q, --quiet                Only report errors.
    --verbose                  Report progress; repeat for more detail.
    --debug FLAGS              Enable per-category detail (flist, entropy, sample,
                               output, timing, all), e.g. --debug=sample2.
Required parameters:
    -d, --dir PATH             Set the directory to use.
    -o, --output PATH          Set the filename to use as output ('-' for stdout).
";

/// Arguments after parsing, before validation.
#[derive(Debug, Default)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    list: bool,
    quiet: bool,
    verbose: u8,
    debug: Vec<String>,
    dir: Option<PathBuf>,
    output: Option<OsString>,
    device: Option<PathBuf>,
    follow_symlinks: bool,
    max_depth: Option<usize>,
    max_draws: Option<NonZeroU32>,
    timeout: Option<Duration>,
    read_retries: u32,
    prime: u32,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('H')
                .help("Show this help and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('v')
                .help("Show version and licensing information, and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .short('d')
                .value_name("PATH")
                .help("Set the directory to use.")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .help("Set the filename to use as output.")
                .value_parser(value_parser!(OsString)),
        )
        .arg(
            Arg::new("device")
                .long("device")
                .short('e')
                .value_name("PATH")
                .help("Set the random number generator device to use.")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("follow-symlinks")
                .long("follow-symlinks")
                .help("Descend into symbolic links to directories.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .value_name("N")
                .help("Do not descend more than N directories below --dir.")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("max-draws")
                .long("max-draws")
                .value_name("N")
                .help("Give up after N draws without a new entry.")
                .value_parser(value_parser!(NonZeroU32)),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .help("Give up when shuffling takes longer than SECS.")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("read-retries")
                .long("read-retries")
                .value_name("N")
                .help("Retry a short device read up to N times.")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("prime")
                .long("prime")
                .value_name("N")
                .help("Discard N values after opening the device.")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("Print the candidate pool in traversal order and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only report errors.")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Report progress; repeat for more detail.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Enable per-category detail.")
                .action(ArgAction::Append),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        list: matches.get_flag("list"),
        quiet: matches.get_flag("quiet"),
        verbose: matches.get_count("verbose"),
        debug: matches
            .remove_many::<String>("debug")
            .map(Iterator::collect)
            .unwrap_or_default(),
        dir: matches.remove_one::<PathBuf>("dir"),
        output: matches.remove_one::<OsString>("output"),
        device: matches.remove_one::<PathBuf>("device"),
        follow_symlinks: matches.get_flag("follow-symlinks"),
        max_depth: matches.remove_one::<usize>("max-depth"),
        max_draws: matches.remove_one::<NonZeroU32>("max-draws"),
        timeout: matches
            .remove_one::<u64>("timeout")
            .map(Duration::from_secs),
        read_retries: matches.remove_one::<u32>("read-retries").unwrap_or(0),
        prime: matches.remove_one::<u32>("prime").unwrap_or(0),
    })
}

/// Returns the help text.
#[must_use]
pub fn render_help() -> String {
    format!(
        "{}\n{USAGE}\n\n{HELP_TEXT}\nThe default device is {}.\n",
        version_banner(),
        entropy::DEFAULT_DEVICE
    )
}

/// Returns the version and licensing banner.
#[must_use]
pub fn version_banner() -> String {
    format!(
        "{PROGRAM_NAME}, version {}.\n\
         This program comes with ABSOLUTELY NO WARRANTY. This is free software, and you\n\
         are welcome to redistribute it under certain conditions. See the GNU General\n\
         Public License (version 3.0) for more details.\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The function returns the process exit code that should be used by the
/// caller. On success, `0` is returned.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let _ = write!(stderr, "{error}");
            let _ = writeln!(stderr, "{USAGE}");
            ExitCode::Syntax.as_i32()
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return emit(stdout, stderr, &render_help());
    }
    if parsed.show_version {
        return emit(stdout, stderr, &version_banner());
    }

    let verbosity = match verbosity_from(&parsed) {
        Ok(verbosity) => verbosity,
        Err(message) => return usage_error(stderr, &message),
    };
    logging::init_tracing(&verbosity);

    let Some(dir) = parsed.dir.clone() else {
        return usage_error(stderr, "music repo path missing!");
    };

    if parsed.list {
        let config = build_config(&parsed, dir, OutputTarget::Stdout);
        return match playlist::list_pool(&config, &mut *stdout) {
            Ok(_) => ExitCode::Ok.as_i32(),
            Err(error) => report(stderr, &error),
        };
    }

    let Some(output) = parsed.output.as_deref() else {
        return usage_error(stderr, "output playlist path missing!");
    };
    let config = build_config(&parsed, dir, OutputTarget::from_arg(output));

    match playlist::run_playlist(&config, &mut *stdout) {
        Ok(summary) => {
            tracing::debug!(
                target: "trng_playlist::output",
                "{} of {} candidates written using {} draws ({} collisions)",
                summary.written,
                summary.candidates,
                summary.draws,
                summary.collisions
            );
            ExitCode::Ok.as_i32()
        }
        Err(error) => report(stderr, &error),
    }
}

fn verbosity_from(parsed: &ParsedArgs) -> Result<VerbosityConfig, String> {
    if parsed.quiet {
        return Ok(VerbosityConfig::quiet());
    }
    let mut verbosity = VerbosityConfig::from_verbose_level(parsed.verbose);
    for token in &parsed.debug {
        verbosity.apply_debug_flag(token)?;
    }
    Ok(verbosity)
}

fn build_config(parsed: &ParsedArgs, dir: PathBuf, output: OutputTarget) -> PlaylistConfig {
    let mut builder = PlaylistConfig::builder(dir, output)
        .read_retries(parsed.read_retries)
        .prime_reads(parsed.prime)
        .max_draws(parsed.max_draws)
        .timeout(parsed.timeout)
        .max_depth(parsed.max_depth)
        .follow_symlinks(parsed.follow_symlinks);
    if let Some(device) = &parsed.device {
        builder = builder.device(device);
    }
    builder.build()
}

fn emit<Out: Write, Err: Write>(stdout: &mut Out, stderr: &mut Err, text: &str) -> i32 {
    match stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
        Ok(()) => ExitCode::Ok.as_i32(),
        Err(error) => report_io(stderr, &error),
    }
}

fn usage_error<Err: Write>(stderr: &mut Err, message: &str) -> i32 {
    let _ = writeln!(stderr, "{PROGRAM_NAME}: {message}");
    let _ = writeln!(stderr, "{USAGE}");
    ExitCode::Syntax.as_i32()
}

fn report<Err: Write>(stderr: &mut Err, error: &playlist::PlaylistError) -> i32 {
    let code = error.exit_code();
    let _ = writeln!(
        stderr,
        "{PROGRAM_NAME}: {error} ({}, code {})",
        code,
        code.as_i32()
    );
    code.as_i32()
}

fn report_io<Err: Write>(stderr: &mut Err, error: &io::Error) -> i32 {
    let _ = writeln!(stderr, "{PROGRAM_NAME}: failed to write to stdout: {error}");
    ExitCode::FileIo.as_i32()
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
