use std::process::Command;

use assert_cmd::Command as AssertCommand;
use test_support::TempTree;

const BINARY: &str = env!("CARGO_BIN_EXE_codenotify");

fn binary_output(args: &[&str]) -> std::process::Output {
    Command::new(BINARY)
        .args(args)
        .output()
        .unwrap_or_else(|error| panic!("failed to run {BINARY}: {error}"))
}

#[test]
fn codenotify_help_lists_usage() {
    let output = binary_output(&["--help"]);
    assert!(output.status.success(), "--help should succeed");
    assert!(
        output.stderr.is_empty(),
        "help output should not write to stderr"
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("codenotify"));
}

#[test]
fn codenotify_version_names_program() {
    AssertCommand::new(BINARY)
        .arg("--version")
        .assert()
        .success()
        .stdout(format!("codenotify {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn codenotify_rejects_unknown_flag() {
    let output = binary_output(&["--definitely-not-a-flag"]);
    assert_eq!(output.status.code(), Some(2), "usage errors exit with 2");
    let stderr = String::from_utf8(output.stderr).expect("stderr is UTF-8");
    assert!(stderr.contains("--definitely-not-a-flag"));
}

#[test]
fn codenotify_resolves_explicit_paths() {
    let tree = TempTree::new();
    tree.write("OWNERS", "**/*.md @docs\n^[optional]\n*.go @watchers\n")
        .write("src/OWNERS", "*.go @core\n");

    AssertCommand::new(BINARY)
        .arg("-C")
        .arg(tree.path())
        .args(["main.go", "src/lib.go", "src/README.md"])
        .assert()
        .success()
        .stdout("main.go [] [@watchers]\nsrc/lib.go [@core] []\nsrc/README.md [@docs] []\n");
}

#[test]
fn codenotify_reports_partial_failure() {
    let tree = TempTree::new();
    tree.write("OWNERS", "*.go @root\n")
        .write("bad/OWNERS", "[never closed\n");

    let output = Command::new(BINARY)
        .arg("-C")
        .arg(tree.path())
        .args(["bad/x.go", "y.go"])
        .output()
        .expect("run codenotify");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "y.go [@root] []\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad/OWNERS"));
}
