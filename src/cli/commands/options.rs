//! `options` command
//!
//! Lists the declared options with their accepted types and defaults.

use serde::Serialize;

use crate::cli::args::{OptionsArgs, OutputFormat, resolve_install_dir};
use crate::config::{HostContext, OptionSpec, Value, monocle_schema};
use crate::error::SanitizerError;

#[derive(Debug, Serialize)]
struct ListedOption<'a> {
    name: &'static str,
    expected: Vec<&'static str>,
    required: bool,
    default: Option<&'a Value>,
}

impl<'a> From<&'a OptionSpec> for ListedOption<'a> {
    fn from(spec: &'a OptionSpec) -> Self {
        Self {
            name: spec.name,
            expected: spec.expected.type_names(),
            required: spec.is_required(),
            default: spec.default.as_ref(),
        }
    }
}

/// Print the option table.
///
/// Worker-derived defaults need a `GRID`, so they are listed as required.
///
/// # Errors
///
/// Returns an error if the option table is malformed or JSON
/// serialization fails.
pub fn run(args: &OptionsArgs) -> Result<(), SanitizerError> {
    let install_dir = resolve_install_dir(args.install_dir.as_deref())?;
    let schema = monocle_schema(&HostContext::new(install_dir, None))?;
    let listed: Vec<ListedOption<'_>> = schema.iter().map(ListedOption::from).collect();

    match args.format {
        OutputFormat::Human => {
            let width = listed.iter().map(|o| o.name.len()).max().unwrap_or(0);
            for (option, spec) in listed.iter().zip(schema.iter()) {
                let default = option
                    .default
                    .map_or_else(|| "required".to_string(), |v| format!("default {v}"));
                println!("{:width$}  {}  {default}", option.name, spec.expected);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listed)?),
    }
    Ok(())
}
