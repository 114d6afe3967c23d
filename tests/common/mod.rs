//! Shared integration-test helpers for running the `monocle-sanitizer`
//! binary and locating fixtures.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Runs the binary with `args` and waits for it to exit.
///
/// Logging environment is cleared so output does not depend on the
/// caller's shell.
#[allow(clippy::missing_panics_doc)]
pub fn spawn_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_monocle-sanitizer"))
        .args(args)
        .env_remove("MONOCLE_LOG_LEVEL")
        .env_remove("MONOCLE_CONFIG")
        .env_remove("MONOCLE_INSTALL_DIR")
        .env("MONOCLE_COLOR", "never")
        .output()
        .expect("failed to run monocle-sanitizer")
}

/// Returns the path to a test fixture.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Fixture path as a `&str`-friendly `String`.
#[must_use]
pub fn fixture(name: &str) -> String {
    fixture_path(name).display().to_string()
}

/// Standard output as text.
#[must_use]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Standard error as text.
#[must_use]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
