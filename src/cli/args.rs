//! CLI argument definitions
//!
//! All Clap derive structs for `monocle-sanitizer` command-line parsing.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Validate and inspect Monocle configuration files.
#[derive(Parser, Debug)]
#[command(name = "monocle-sanitizer", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print only errors and the data a command was asked for.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "MONOCLE_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration files against the option table.
    Check(CheckArgs),

    /// Print resolved option values and where they came from.
    Show(ShowArgs),

    /// List every declared option with its type and default.
    Options(OptionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration files to validate.
    #[arg(required = true, env = "MONOCLE_CONFIG", value_delimiter = ',')]
    pub files: Vec<PathBuf>,

    /// Treat unknown options as errors.
    #[arg(long)]
    pub strict: bool,

    /// Installation directory used for computed defaults.
    #[arg(long, env = "MONOCLE_INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,

    /// Fail if this option is unset after sanitizing (repeatable).
    #[arg(long = "require", value_name = "NAME")]
    pub require: Vec<String>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration file to resolve.
    #[arg(env = "MONOCLE_CONFIG")]
    pub file: PathBuf,

    /// Only show these options (repeatable).
    #[arg(long = "option", value_name = "NAME")]
    pub options: Vec<String>,

    /// Installation directory used for computed defaults.
    #[arg(long, env = "MONOCLE_INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `options`.
#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Installation directory used for computed defaults.
    #[arg(long, env = "MONOCLE_INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Returns the installation directory, defaulting to the working directory.
///
/// # Errors
///
/// Returns an I/O error if no directory was given and the working
/// directory cannot be determined.
pub fn resolve_install_dir(arg: Option<&Path>) -> std::io::Result<PathBuf> {
    arg.map_or_else(std::env::current_dir, |dir| Ok(dir.to_path_buf()))
}
