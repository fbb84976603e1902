//! Verbosity levels decide which events reach the rendered output.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use logging::{VerbosityConfig, build_subscriber};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(level: u8, emit: impl FnOnce()) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = build_subscriber(
        VerbosityConfig::from_verbose_level(level).directive_filter(),
        move || writer.clone(),
    );
    tracing::subscriber::with_default(subscriber, emit);
    buffer.contents()
}

fn emit_all() {
    tracing::warn!(target: "cli", "warn-event");
    tracing::info!(target: "cli", "info-event");
    tracing::debug!(target: "owners::resolve", "workspace-debug-event");
    tracing::debug!(target: "globset", "dependency-debug-event");
    tracing::trace!(target: "owners::load", "trace-event");
}

// ============================================================================
// Level Mapping
// ============================================================================

#[test]
fn level_zero_shows_only_warnings() {
    let output = capture(0, emit_all);
    assert!(output.contains("warn-event"));
    assert!(!output.contains("info-event"));
}

#[test]
fn level_one_adds_info() {
    let output = capture(1, emit_all);
    assert!(output.contains("info-event"));
    assert!(!output.contains("workspace-debug-event"));
}

#[test]
fn level_two_adds_workspace_debug_only() {
    let output = capture(2, emit_all);
    assert!(output.contains("workspace-debug-event"));
    assert!(!output.contains("dependency-debug-event"));
    assert!(!output.contains("trace-event"));
}

#[test]
fn level_three_shows_everything() {
    let output = capture(3, emit_all);
    assert!(output.contains("dependency-debug-event"));
    assert!(output.contains("trace-event"));
}

#[test]
fn output_includes_event_target() {
    let output = capture(0, emit_all);
    assert!(output.contains("cli"));
}

#[cfg(feature = "serde")]
#[test]
fn config_round_trips_through_json() {
    let config = VerbosityConfig::from_verbose_level(3);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<VerbosityConfig>(&json).unwrap(), config);
}
