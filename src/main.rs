//! `monocle-sanitizer` - validate and inspect Monocle configuration files

use clap::Parser;

use monocle_sanitizer::cli::args::Cli;
use monocle_sanitizer::cli::commands;
use monocle_sanitizer::error::ExitCode;
use monocle_sanitizer::observability::init_logging;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format, cli.verbose, cli.quiet, cli.color);

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
