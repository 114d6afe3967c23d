//! `check` command
//!
//! Loads and sanitizes each file, reports warnings and errors per file, and
//! fails if any file does not pass.

use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::cli::args::{CheckArgs, OutputFormat, resolve_install_dir};
use crate::cli::commands::load_and_sanitize;
use crate::error::{ConfigError, SanitizerError};

/// Outcome for one file.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    valid: bool,
    warnings: Vec<String>,
    errors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Summary {
    files: usize,
    valid: usize,
    invalid: usize,
    warnings: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    files: Vec<FileReport>,
    summary: Summary,
}

/// Validate configuration files.
///
/// With `quiet`, human output lists only the files that failed.
///
/// # Errors
///
/// Returns the error of the first file that failed, so the exit code
/// reflects its kind.
pub fn run(args: &CheckArgs, quiet: bool) -> Result<(), SanitizerError> {
    let install_dir = resolve_install_dir(args.install_dir.as_deref())?;

    let mut reports = Vec::with_capacity(args.files.len());
    let mut first_failure = None;

    for path in &args.files {
        let (report, failure) = check_file(path, &install_dir, args);
        if first_failure.is_none() {
            first_failure = failure;
        }
        reports.push(report);
    }

    let summary = Summary {
        files: reports.len(),
        valid: reports.iter().filter(|r| r.valid).count(),
        invalid: reports.iter().filter(|r| !r.valid).count(),
        warnings: reports.iter().map(|r| r.warnings.len()).sum(),
    };

    match args.format {
        OutputFormat::Human => print!("{}", render_human(&reports, &summary, quiet)),
        OutputFormat::Json => {
            let report = Report {
                files: reports,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    first_failure.map_or(Ok(()), Err)
}

fn check_file(
    path: &Path,
    install_dir: &Path,
    args: &CheckArgs,
) -> (FileReport, Option<SanitizerError>) {
    let mut report = FileReport {
        path: path.display().to_string(),
        valid: false,
        warnings: Vec::new(),
        errors: Vec::new(),
    };

    let outcome = load_and_sanitize(path, install_dir).and_then(|sanitized| {
        report.warnings = sanitized
            .warnings
            .iter()
            .map(ToString::to_string)
            .collect();

        if args.strict && !sanitized.warnings.is_empty() {
            return Err(ConfigError::StrictWarnings {
                count: sanitized.warnings.len(),
            }
            .into());
        }

        let required: Vec<&str> = args.require.iter().map(String::as_str).collect();
        sanitized.config.require(&required)?;
        Ok(())
    });

    match outcome {
        Ok(()) => {
            tracing::info!(file = %path.display(), "configuration valid");
            report.valid = true;
            (report, None)
        }
        Err(err) => {
            tracing::debug!(file = %path.display(), error = %err, "configuration rejected");
            report.errors = err.to_string().lines().map(ToString::to_string).collect();
            (report, Some(err))
        }
    }
}

fn render_human(reports: &[FileReport], summary: &Summary, quiet: bool) -> String {
    let mut out = String::new();
    for report in reports.iter().filter(|r| !quiet || !r.valid) {
        let status = if report.valid { "ok" } else { "FAILED" };
        let _ = writeln!(out, "{}: {status}", report.path);
        if !quiet {
            for warning in &report.warnings {
                let _ = writeln!(out, "  {warning}");
            }
        }
        for error in &report.errors {
            let _ = writeln!(out, "  error: {error}");
        }
    }
    if !quiet {
        let _ = writeln!(
            out,
            "{} file(s) checked: {} valid, {} invalid, {} warning(s)",
            summary.files, summary.valid, summary.invalid, summary.warnings
        );
    }
    out
}
