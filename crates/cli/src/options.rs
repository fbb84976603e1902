//! Command-line definition and the options it produces.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use logging::VerbosityConfig;
use owners::DEFAULT_DECLARATION_FILE;

use crate::PROGRAM_NAME;

/// Diff base used when no paths are given.
pub const DEFAULT_FROM_REF: &str = "origin/main";

/// Rendering selected with `--format`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    /// One line per path: `path [required...] [optional...]`.
    #[default]
    Text,
    /// A pretty-printed JSON array.
    Json,
}

/// Parsed command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    /// Tree root holding the declaration files and the git checkout.
    pub root: PathBuf,
    /// Declaration file name looked up in every directory.
    pub owners_file: String,
    /// Revision diffed against `HEAD` when `paths` is empty.
    pub from_ref: String,
    /// Output rendering.
    pub format: OutputFormat,
    /// Whether to report which declaration supplied each owner list.
    pub explain: bool,
    /// Diagnostic verbosity.
    pub verbosity: VerbosityConfig,
    /// Explicit change set; empty means "ask git".
    pub paths: Vec<String>,
    /// `--help` was requested.
    pub show_help: bool,
    /// `--version` was requested.
    pub show_version: bool,
}

/// Builds the clap command definition.
///
/// Help and version are handled by [`crate::run`] so they render to the
/// caller's stdout rather than the process's.
pub fn command() -> Command {
    Command::new(PROGRAM_NAME)
        .about("Print the owners of changed files from per-directory OWNERS declarations.")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .short('C')
                .value_name("DIR")
                .help("Repository root containing the declaration files.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("owners-file")
                .long("owners-file")
                .value_name("NAME")
                .help("Declaration file name looked up in every directory.")
                .default_value(DEFAULT_DECLARATION_FILE),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .value_name("REF")
                .help("Resolve files changed between REF and HEAD when no paths are given.")
                .default_value(DEFAULT_FROM_REF),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Output format.")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("explain")
                .long("explain")
                .help("Show the declaration, pattern and approvals behind each owner list.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output; repeat for more.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .help("Changed paths relative to the root. Defaults to the git diff.")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

/// Parses `arguments`, whose first item is the program name.
pub fn parse_args<I, S>(arguments: I) -> Result<Options, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(arguments)?;
    Ok(Options::from_matches(&matches))
}

impl Options {
    fn from_matches(matches: &ArgMatches) -> Self {
        let string = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

        let format = match matches.get_one::<String>("format").map(String::as_str) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };

        Self {
            root: matches
                .get_one::<PathBuf>("root")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            owners_file: string("owners-file"),
            from_ref: string("from"),
            format,
            explain: matches.get_flag("explain"),
            verbosity: VerbosityConfig::from_verbose_level(matches.get_count("verbose")),
            paths: matches
                .get_many::<String>("paths")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            show_help: matches.get_flag("help"),
            show_version: matches.get_flag("version"),
        }
    }
}
