#![deny(missing_docs)]

//! # Inputs
//!
//! Arguments shared by every subcommand: where the sources live, which files to
//! read and how to configure the generator.

use crate::error::CliResult;
use std::path::{Path, PathBuf};
use svcgen_core::{GeneratorConfig, SourceSet};
use tracing::debug;
use walkdir::WalkDir;

/// Source selection and generator settings.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Crate source root. Module paths are derived relative to it.
    #[clap(long, env = "SVCGEN_SRC", default_value = "src")]
    pub src: PathBuf,

    /// Files to read instead of every `.rs` file under `--src`.
    #[clap(long = "input", env = "SVCGEN_INPUT", value_delimiter = ',')]
    pub inputs: Vec<PathBuf>,

    /// YAML generator configuration.
    #[clap(long, env = "SVCGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Name of the marker supertrait. Overrides the configuration file.
    #[clap(long, env = "SVCGEN_MARKER")]
    pub marker: Option<String>,

    /// First path segment of every route. Overrides the configuration file.
    #[clap(long, env = "SVCGEN_ROUTE_ROOT")]
    pub route_root: Option<String>,
}

impl SourceArgs {
    /// The configuration file (or defaults) with command line overrides applied.
    pub fn generator_config(&self) -> CliResult<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(marker) = &self.marker {
            config.marker = marker.clone();
        }
        if let Some(route_root) = &self.route_root {
            config.route_root = route_root.clone();
        }
        config.validate()?;
        Ok(config)
    }

    /// Explicit inputs, or every `.rs` file under `--src` in path order.
    pub fn files(&self) -> CliResult<Vec<PathBuf>> {
        if !self.inputs.is_empty() {
            return Ok(self.inputs.clone());
        }
        collect_rust_files(&self.src)
    }

    /// Reads and parses the selected files.
    pub fn load(&self) -> CliResult<SourceSet> {
        let files = self.files()?;
        debug!(files = files.len(), src = %self.src.display(), "reading sources");
        Ok(SourceSet::load(&self.src, &files)?)
    }
}

/// Every `.rs` file below `root`, sorted so that runs are reproducible.
pub fn collect_rust_files(root: &Path) -> CliResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}
