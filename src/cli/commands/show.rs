//! `show` command
//!
//! Prints resolved option values with their origin.

use serde::Serialize;

use crate::cli::args::{OutputFormat, ShowArgs, resolve_install_dir};
use crate::cli::commands::load_and_sanitize;
use crate::config::{Config, ResolvedOption, Value};
use crate::error::SanitizerError;

#[derive(Debug, Serialize)]
struct ShownOption<'a> {
    name: &'static str,
    origin: &'static str,
    expected: String,
    value: Option<&'a Value>,
}

impl<'a> From<ResolvedOption<'a>> for ShownOption<'a> {
    fn from(option: ResolvedOption<'a>) -> Self {
        Self {
            name: option.name,
            origin: option.origin.label(),
            expected: option.expected.to_string(),
            value: option.value,
        }
    }
}

/// Print resolved options. `quiet` drops the unknown-key warnings.
///
/// # Errors
///
/// Returns an error if the file does not load or sanitize, or if a
/// requested option is not declared.
pub fn run(args: &ShowArgs, quiet: bool) -> Result<(), SanitizerError> {
    let install_dir = resolve_install_dir(args.install_dir.as_deref())?;
    let sanitized = load_and_sanitize(&args.file, &install_dir)?;

    if !quiet {
        for warning in &sanitized.warnings {
            eprintln!("{warning}");
        }
    }

    let shown = select(&sanitized.config, &args.options)?;

    match args.format {
        OutputFormat::Human => {
            let width = shown.iter().map(|o| o.name.len()).max().unwrap_or(0);
            for option in &shown {
                let value = option
                    .value
                    .map_or_else(|| "<unset>".to_string(), ToString::to_string);
                println!("{:width$}  {value}  ({})", option.name, option.origin);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shown)?),
    }
    Ok(())
}

/// Every option, or just the named ones in the order given.
fn select<'a>(config: &'a Config, names: &[String]) -> Result<Vec<ShownOption<'a>>, SanitizerError> {
    if names.is_empty() {
        return Ok(config.iter().map(ShownOption::from).collect());
    }

    names
        .iter()
        .map(|name| {
            config
                .iter()
                .find(|o| o.name == name.as_str())
                .map(ShownOption::from)
                .ok_or_else(|| {
                    // Reuse the accessor's error, which carries a suggestion.
                    match config.get(name) {
                        Err(err) => SanitizerError::Config(err),
                        Ok(_) => SanitizerError::Usage(format!("cannot show {name}")),
                    }
                })
        })
        .collect()
}
