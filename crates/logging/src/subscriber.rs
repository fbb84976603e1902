//! Installation of the `tracing` subscriber used by the command line.

use std::io;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::VerbosityConfig;

/// Builds a formatting subscriber that writes to `writer`.
///
/// Timestamps are omitted; output is meant for a terminal running a single
/// short-lived command.
pub fn build_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_target(true)
        .without_time()
        .finish()
}

/// Installs the global subscriber, writing diagnostics to standard error.
///
/// `RUST_LOG` takes precedence over `config` when set. Returns `false` when
/// a global subscriber was already installed, leaving that one in place.
pub fn init_tracing(config: VerbosityConfig) -> bool {
    let subscriber = build_subscriber(config.env_filter(), io::stderr);
    tracing::subscriber::set_global_default(subscriber).is_ok()
}
