#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` maps the command line's verbosity flags onto `tracing`
//! filters and installs the subscriber that renders diagnostics on standard
//! error. Library crates only emit events; choosing what is shown lives
//! here.
//!
//! # Examples
//!
//! ```
//! use logging::VerbosityConfig;
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! assert_eq!(config.directives(), "info,owners=debug,cli=debug");
//! ```

mod config;
mod subscriber;

pub use config::VerbosityConfig;
pub use subscriber::{build_subscriber, init_tracing};
