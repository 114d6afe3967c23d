//! Version information display
//!
//! Prints the package name and version in human or JSON format.

use serde_json::json;

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::SanitizerError;

/// Print version information.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &VersionArgs) -> Result<(), SanitizerError> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => println!("{name} {version}"),
        OutputFormat::Json => {
            let doc = json!({ "name": name, "version": version });
            println!("{}", serde_json::to_string(&doc)?);
        }
    }
    Ok(())
}
