#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `codenotify` command. It collects a change set,
//! either the paths given on the command line or the files changed since a
//! git revision, resolves the owners of every path through
//! [`owners::Resolver`] and prints one report per path.
//!
//! # Design
//!
//! [`run`] accepts the argument list together with handles for standard
//! output and error so the whole command can be driven from tests. Parsing
//! lives in [`options`], change-set discovery in [`change_set`] and
//! rendering in [`report`].
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as exit codes.
//! - A path that fails to resolve is reported on standard error and does not
//!   stop the remaining paths.
//! - Output order follows the change set even when paths resolve in
//!   parallel.
//!
//! # Errors
//!
//! | Exit code | Meaning |
//! |-----------|---------|
//! | [`EXIT_OK`] | every path resolved |
//! | [`EXIT_PARTIAL`] | at least one path failed, or output could not be written |
//! | [`EXIT_USAGE`] | the command line was rejected |
//! | [`EXIT_CHANGE_SET`] | the change set could not be produced |
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["codenotify", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, cli::EXIT_OK);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("codenotify "));
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;

use owners::{FsSource, Resolver};

pub mod change_set;
pub mod options;
pub mod report;

pub use change_set::{ChangeSet, DiffError, ExplicitPaths, GitDiff};
pub use options::{DEFAULT_FROM_REF, Options, OutputFormat, command, parse_args};
pub use report::{PathReport, Renderer, resolve_all};

/// Name the command reports itself as.
pub const PROGRAM_NAME: &str = "codenotify";

/// Version reported by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Every path resolved.
pub const EXIT_OK: i32 = 0;
/// At least one path failed to resolve, or the report could not be written.
pub const EXIT_PARTIAL: i32 = 1;
/// The command line was rejected.
pub const EXIT_USAGE: i32 = 2;
/// The change set could not be produced.
pub const EXIT_CHANGE_SET: i32 = 3;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the command with `arguments`, whose first item is the program name,
/// and returns the exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let options = match parse_args(arguments) {
        Ok(options) => options,
        Err(error) => {
            let _ = write!(stderr, "{}", error.render());
            return EXIT_USAGE;
        }
    };

    if options.show_help {
        let help = command().render_help();
        return match write!(stdout, "{help}") {
            Ok(()) => EXIT_OK,
            Err(_) => EXIT_PARTIAL,
        };
    }

    if options.show_version {
        return match writeln!(stdout, "{PROGRAM_NAME} {VERSION}") {
            Ok(()) => EXIT_OK,
            Err(_) => EXIT_PARTIAL,
        };
    }

    logging::init_tracing(options.verbosity);
    execute(&options, stdout, stderr)
}

fn execute<Out, Err>(options: &Options, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let changed = if options.paths.is_empty() {
        GitDiff::new(&options.root, &options.from_ref).changed_paths()
    } else {
        ExplicitPaths::new(options.paths.iter().cloned()).changed_paths()
    };
    let paths = match changed {
        Ok(paths) => paths,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            return EXIT_CHANGE_SET;
        }
    };
    tracing::info!(target: "cli", paths = paths.len(), root = %options.root.display(), "resolving change set");

    let resolver = Resolver::new(
        FsSource::new(&options.root).with_file_name(options.owners_file.as_str()),
    );
    let reports = resolve_all(&resolver, &paths);

    let renderer = Renderer {
        explain: options.explain,
        declaration_file: &options.owners_file,
    };
    let rendered = match options.format {
        OutputFormat::Text => renderer.text(&reports, stdout, stderr),
        OutputFormat::Json => renderer.json(&reports, stdout, stderr),
    };

    match rendered {
        Ok(0) => EXIT_OK,
        Ok(failures) => {
            tracing::debug!(target: "cli", failures, "some paths failed to resolve");
            EXIT_PARTIAL
        }
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: failed to write report: {error}");
            EXIT_PARTIAL
        }
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    std::process::ExitCode::from(clamp_status(status))
}

fn clamp_status(status: i32) -> u8 {
    u8::try_from(status.clamp(0, MAX_EXIT_CODE)).unwrap_or(u8::MAX)
}
