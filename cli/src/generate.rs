#![deny(missing_docs)]

//! # Generate Command
//!
//! Sources -> contracts -> client proxies + route table, written as one module
//! directory (`mod.rs` plus one file per unit).

use crate::error::CliResult;
use crate::inputs::SourceArgs;
use crate::report;
use std::fs;
use std::path::{Path, PathBuf};
use svcgen_core::{generate, GenerationOutput, NeverCancelled};
use tracing::info;

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    #[clap(flatten)]
    pub source: SourceArgs,

    /// Directory receiving the generated module (e.g. src/generated).
    #[clap(long, env = "SVCGEN_OUTPUT", default_value = "src/generated")]
    pub output: PathBuf,

    /// Reformat generated units with prettyplease.
    #[clap(long, env = "SVCGEN_PRETTY")]
    pub pretty: bool,

    /// Exit with a failure status when any diagnostic was reported.
    #[clap(long)]
    pub deny_errors: bool,
}

/// Executes the generation pipeline.
///
/// Returns whether the run counts as a success for the exit status.
pub fn execute(args: &GenerateArgs) -> CliResult<bool> {
    // 1. Inputs
    let mut config = args.source.generator_config()?;
    if args.pretty {
        config.pretty_print = true;
    }
    let sources = args.source.load()?;
    println!(
        "Scanning {} file(s) under {:?}...",
        sources.files().len(),
        args.source.src
    );

    // 2. Generate
    let output = generate(
        &sources.interfaces(&config.marker),
        &sources.oracle(&config),
        &config,
        &NeverCancelled,
    )?;

    // 3. Report
    for diagnostic in &output.diagnostics {
        eprintln!("{}\n", report::render(diagnostic));
    }

    // 4. Write
    write_units(&output, &args.output)?;

    println!(
        "Generated {} contract(s) into {:?} ({} diagnostic(s)).",
        output.contracts.len(),
        args.output,
        output.diagnostics.len()
    );

    Ok(!(args.deny_errors && !output.diagnostics.is_empty()))
}

/// Writes every unit into `dir`, creating it if needed.
fn write_units(output: &GenerationOutput, dir: &Path) -> CliResult<()> {
    fs::create_dir_all(dir)?;
    for unit in &output.units {
        let path = dir.join(&unit.name);
        fs::write(&path, &unit.content)?;
        info!(unit = %unit.name, path = %path.display(), "unit written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(src: &Path, output: &Path) -> GenerateArgs {
        GenerateArgs {
            source: SourceArgs {
                src: src.to_path_buf(),
                inputs: Vec::new(),
                config: None,
                marker: None,
                route_root: None,
            },
            output: output.to_path_buf(),
            pretty: false,
            deny_errors: false,
        }
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_generate_writes_module() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let out = src.join("generated");
        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("services.rs"),
            r#"
pub trait ITodoService: BlazorService {
    async fn title(&self, id: u64) -> String;
}
"#,
        )
        .unwrap();

        let ok = execute(&args(&src, &out)).unwrap();
        assert!(ok);
        assert_eq!(
            file_names(&out),
            vec![
                "blazor_service.rs",
                "blazor_services.rs",
                "mod.rs",
                "todo_blazor_service.rs"
            ]
        );
        let client = fs::read_to_string(out.join("todo_blazor_service.rs")).unwrap();
        assert!(client.contains("use crate::services::*;"));
        assert!(client.contains("impl crate::services::ITodoService for TodoBlazorService {"));
    }

    #[test]
    fn test_deny_errors_fails_on_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("lib.rs"),
            "pub trait IBadService: BlazorService { fn sync(&self) -> u8; }",
        )
        .unwrap();

        let mut a = args(&src, &dir.path().join("out"));
        assert!(execute(&a).unwrap());

        a.deny_errors = true;
        assert!(!execute(&a).unwrap());
        // Invalid contracts produce no client, but the marker and index still exist.
        assert_eq!(
            file_names(&dir.path().join("out")),
            vec!["blazor_service.rs", "mod.rs"]
        );
    }
}
