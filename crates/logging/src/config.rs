//! Verbosity configuration derived from repeated `-v` flags.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Crates whose diagnostics become visible one verbosity step before the
/// rest of the dependency graph.
const WORKSPACE_TARGETS: [&str; 2] = ["owners", "cli"];

/// Verbosity requested on the command line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    verbose: u8,
}

impl VerbosityConfig {
    /// Creates a configuration from the number of `-v` flags.
    ///
    /// | level | output                                      |
    /// |-------|---------------------------------------------|
    /// | 0     | warnings and errors                         |
    /// | 1     | progress messages                           |
    /// | 2     | resolution details from workspace crates    |
    /// | 3+    | everything, including per-directory loads   |
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        Self { verbose: level }
    }

    /// Returns the number of `-v` flags this configuration was built from.
    #[must_use]
    pub const fn verbose_level(self) -> u8 {
        self.verbose
    }

    /// Returns the most verbose level emitted by workspace crates.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Renders the filter directives used when `RUST_LOG` is not set.
    #[must_use]
    pub fn directives(self) -> String {
        match self.verbose {
            0 => "warn".to_owned(),
            1 => "info".to_owned(),
            2 => {
                let mut directives = String::from("info");
                for target in WORKSPACE_TARGETS {
                    directives.push(',');
                    directives.push_str(target);
                    directives.push_str("=debug");
                }
                directives
            }
            _ => "trace".to_owned(),
        }
    }

    /// Builds a filter from [`directives`](Self::directives), ignoring the
    /// environment.
    #[must_use]
    pub fn directive_filter(self) -> EnvFilter {
        EnvFilter::new(self.directives())
    }

    /// Builds a filter from `RUST_LOG` when it is set and valid, falling
    /// back to [`directive_filter`](Self::directive_filter).
    #[must_use]
    pub fn env_filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| self.directive_filter())
    }
}
