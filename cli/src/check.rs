#![deny(missing_docs)]

//! # Check Command
//!
//! Live diagnostics only: validates every contract, renders nothing.

use crate::error::CliResult;
use crate::inputs::SourceArgs;
use crate::report;
use svcgen_core::{diagnose, Diagnostic};

/// Output format of the check report.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Source excerpts with carets.
    Human,
    /// A JSON array of diagnostics.
    Json,
}

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Report format.
    #[clap(long, value_enum, default_value_t = Format::Human)]
    pub format: Format,
}

/// Executes the check.
///
/// Returns `true` when no diagnostic was found and every file parsed.
pub fn execute(args: &CheckArgs) -> CliResult<bool> {
    let config = args.source.generator_config()?;
    let sources = args.source.load()?;

    let diagnostics = diagnose(
        &sources.interfaces(&config.marker),
        &sources.oracle(&config),
        &config,
    )?;

    for skipped in sources.skipped() {
        eprintln!("warning: {}", skipped);
    }
    println!("{}", format_report(&diagnostics, args.format)?);

    Ok(diagnostics.is_empty() && sources.skipped().is_empty())
}

/// The whole report as one string.
pub fn format_report(diagnostics: &[Diagnostic], format: Format) -> CliResult<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(diagnostics)?),
        Format::Human => {
            let mut out: Vec<String> = diagnostics.iter().map(report::render).collect();
            out.push(format!("{} diagnostic(s) found.", diagnostics.len()));
            Ok(out.join("\n\n"))
        }
    }
}
