//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod check;
pub mod options;
pub mod show;
pub mod version;

use std::path::Path;

use crate::cli::args::{Cli, Commands};
use crate::config::{ConfigLoader, Sanitized, sanitize_monocle};
use crate::error::SanitizerError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), SanitizerError> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Check(args) => check::run(&args, quiet),
        Commands::Show(args) => show::run(&args, quiet),
        Commands::Options(args) => options::run(&args),
        Commands::Version(args) => version::run(&args),
    }
}

/// Loads one file and sanitizes it against the Monocle option table.
fn load_and_sanitize(path: &Path, install_dir: &Path) -> Result<Sanitized, SanitizerError> {
    tracing::info!(file = %path.display(), "checking configuration");
    let raw = ConfigLoader::with_defaults().load(path)?;
    sanitize_monocle(&raw, install_dir)
}
