#![deny(missing_docs)]

//! # Service Generator CLI
//!
//! Command line front end for `svcgen-core`.
//!
//! Supported Commands:
//! - `generate`: Service contracts -> HTTP client proxies + actix-web route table.
//! - `check`: Reports contract-shape violations without generating anything.

use crate::error::CliResult;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

mod check;
mod error;
mod generate;
mod inputs;
mod report;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Service contract client/route generator")]
struct Cli {
    /// Log every pipeline decision (debug level).
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate client proxies and the route table from service contracts.
    Generate(generate::GenerateArgs),
    /// Validate service contracts and report diagnostics.
    Check(check::CheckArgs),
}

/// `RUST_LOG` wins unless `--verbose` asks for debug output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn main() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let success = match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
        Commands::Check(args) => check::execute(args)?,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "svcgen",
            "generate",
            "--src",
            "app/src",
            "--input",
            "app/src/a.rs,app/src/b.rs",
            "--output",
            "app/src/generated",
            "--deny-errors",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.source.inputs.len(), 2);
                assert!(args.deny_errors);
                assert_eq!(args.output, std::path::PathBuf::from("app/src/generated"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_format() {
        let cli = Cli::try_parse_from(["svcgen", "check", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert_eq!(args.format, check::Format::Json),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
